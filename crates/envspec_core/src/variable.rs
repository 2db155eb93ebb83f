//! Traits and result types shared by every declared variable.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::schema::Schema;

/// How a variable behaves when it is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Absence without a default is an error.
    #[default]
    Required,
    /// Absence without a default yields no value.
    Optional,
    /// Optional, and its use is discouraged.
    Deprecated,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Required => write!(f, "required"),
            Cardinality::Optional => write!(f, "optional"),
            Cardinality::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Snapshot of one variable after resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Name of the environment variable.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// The values the variable accepts.
    pub schema: Schema,

    /// The default, rendered for display. Quoting and number formatting
    /// follow the variable's kind, so this is not necessarily a raw value.
    pub default_value: Option<String>,

    /// The value taken from the source, rendered for display. When the
    /// value was rejected this is the raw input instead.
    pub explicit_value: Option<String>,

    /// True if the default is the variable's value.
    pub using_default: bool,

    /// Why validation failed, if it did.
    pub error: Option<SpecError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Anything that can report validation results to a registry.
pub trait Validator: Send + Sync {
    /// Resolve (if not already resolved) and report. Never panics on bad
    /// input.
    fn validate(&self) -> Vec<ValidationResult>;
}

/// A registered variable, as seen by reports and documentation.
pub trait Variable: Validator {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn cardinality(&self) -> Cardinality;

    /// The values the variable accepts under its current configuration.
    fn schema(&self) -> Schema;

    /// The default, rendered for display.
    fn default_value(&self) -> Option<String>;

    fn is_required(&self) -> bool {
        self.cardinality() == Cardinality::Required
    }

    fn is_deprecated(&self) -> bool {
        self.cardinality() == Cardinality::Deprecated
    }
}

/// A declared variable that other declarations can refer to by name.
pub trait Input {
    fn name(&self) -> &str;
}

/// Whether `name` is usable as an environment variable name.
pub fn is_valid_name(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern is valid"))
        .is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("PORT"));
        assert!(is_valid_name("_private_2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2FAST"));
        assert!(!is_valid_name("WITH SPACE"));
        assert!(!is_valid_name("DASH-ED"));
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::Deprecated.to_string(), "deprecated");
    }
}
