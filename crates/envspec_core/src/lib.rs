//! # envspec_core
//!
//! Declaration, resolution and validation of environment variables.
//!
//! Each variable is declared once through a fluent builder, registered in a
//! [`Registry`], and resolved lazily at most once. The whole environment can
//! be validated in one pass, producing a tabular report of every variable.
//!
//! # Architecture
//!
//! - **Kinds**: how raw text becomes a typed value and which values are legal
//! - **Builders**: fluent configuration ending in registration
//! - **Resolvers**: the one-shot lookup, parse and validate pipeline
//! - **Registry**: ordered collection driving bulk validation
//! - **Report**: the plain-text table shown when validation fails
//!
//! # Example
//!
//! ```rust,no_run
//! use envspec_core::{boolean, number, string};
//!
//! let port = number::<u16>("PORT", "the port to listen on")
//!     .with_minimum(1)
//!     .with_default(8080)
//!     .required();
//!
//! let host = string("HOST", "the interface to bind")
//!     .see_also(&port)
//!     .optional();
//!
//! let debug = boolean("DEBUG", "enable verbose output")
//!     .with_default(false)
//!     .required();
//!
//! // Exits with status 1 after printing a report if anything is invalid.
//! envspec_core::validate_environment();
//!
//! println!("{:?}:{} debug={}", host.value(), port.value(), debug.value());
//! ```

pub mod error;
pub mod kind;
pub mod kinds;
pub mod registry;
pub mod relationship;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod spec;
pub mod table;
pub mod variable;

// Re-export main types for convenience
pub use error::{MisuseError, RelationshipError, RelationshipResult, SpecError, ValueError};
pub use kind::Kind;
pub use kinds::{Boolean, File, Number, Numeric, Set, Text};
pub use registry::Registry;
pub use relationship::RefersTo;
pub use report::render_results;
pub use schema::{Schema, SchemaVisitor};
pub use source::{MapSource, ProcessEnv, Source};
pub use spec::{boolean, custom, file, number, set, string, Optional, Required, SpecBuilder};
pub use variable::{is_valid_name, Cardinality, Input, ValidationResult, Validator, Variable};

/// Validate every variable in the global registry.
///
/// On failure the report is written to stderr and the process exits with
/// status 1, unless the global registry's exit behaviour was replaced.
pub fn validate_environment() {
    Registry::global().validate_environment();
}

/// Validate every variable in the global registry without exiting.
pub fn validate_all() -> (String, bool) {
    Registry::global().validate_all()
}

/// Record a relationship in the global registry.
pub fn apply_relationship(rel: RefersTo) -> RelationshipResult<()> {
    Registry::global().apply_relationship(rel)
}

/// Clear the global registry. Intended for tests.
pub fn teardown() {
    Registry::global().reset();
}
