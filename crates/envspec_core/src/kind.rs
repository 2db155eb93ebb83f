//! The capability interface every variable type supplies.

use crate::error::ValueError;
use crate::schema::Schema;

/// Type-specific behaviour plugged into the shared resolution engine.
///
/// The engine owns reading, defaults, caching and error reporting. A kind
/// only knows how to turn one raw string into a value and back.
pub trait Kind: Send + Sync + 'static {
    /// The parsed value type.
    type Value: Clone + Send + Sync + 'static;

    /// Describe the acceptable input.
    fn schema(&self) -> Schema;

    /// Parse a non-empty raw string.
    fn parse(&self, raw: &str) -> Result<Self::Value, ValueError>;

    /// Check a parsed value (or a default) against the declared constraints.
    fn validate(&self, value: &Self::Value) -> Result<(), ValueError>;

    /// Render a parsed value in canonical form.
    fn render(&self, value: &Self::Value) -> String;

    /// Render a raw string for inclusion in an error message.
    fn render_raw(&self, raw: &str) -> String {
        raw.to_string()
    }
}
