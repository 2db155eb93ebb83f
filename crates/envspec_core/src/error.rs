//! Error types for variable resolution and declaration.
//!
//! Two families live here. [`SpecError`] and [`ValueError`] describe bad
//! input found while resolving a variable; they are carried inside
//! validation results and reported in aggregate. [`MisuseError`] and
//! [`RelationshipError`] describe defects in the code that declares the
//! variables and are raised as panics at the point of misuse.

use serde::Serialize;
use thiserror::Error;

use crate::variable::Cardinality;

/// Result type alias for relationship operations.
pub type RelationshipResult<T> = Result<T, RelationshipError>;

/// Reason a present value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValueError {
    #[error("unrecognized {0} syntax")]
    Syntax(String),

    #[error("too low, expected {0} or greater")]
    TooLow(String),

    #[error("too high, expected {0} or less")]
    TooHigh(String),

    #[error("expected a finite number")]
    NonFinite,

    #[error("must not be empty")]
    Empty,

    #[error("too short, expected at least {0} characters")]
    TooShort(usize),

    #[error("too long, expected at most {0} characters")]
    TooLong(usize),

    #[error("must be one of {0}")]
    NotMember(String),

    #[error("no such file")]
    NoSuchFile,
}

/// A failed resolution of a single variable.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecError {
    #[error("{name} is undefined and does not have a default value")]
    Undefined { name: String },

    #[error("value of {name} ({value}) is invalid: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: ValueError,
    },
}

impl SpecError {
    /// Name of the variable that failed.
    pub fn name(&self) -> &str {
        match self {
            SpecError::Undefined { name } | SpecError::Invalid { name, .. } => name,
        }
    }

    /// The failure without the variable name, as shown in the report table.
    pub fn reason(&self) -> String {
        match self {
            SpecError::Undefined { .. } => "undefined and does not have a default value".to_string(),
            SpecError::Invalid { reason, .. } => reason.to_string(),
        }
    }
}

/// Programmer errors in variable declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MisuseError {
    #[error("{0:?} is not a valid environment variable name")]
    InvalidName(String),

    #[error("cannot modify {0} after its value has been used or validated")]
    Sealed(String),

    #[error("default value of {name} is invalid: {reason}")]
    InvalidDefault { name: String, reason: ValueError },

    #[error("bounds of {name} are inconsistent: minimum {min} exceeds maximum {max}")]
    InvalidBounds {
        name: String,
        min: String,
        max: String,
    },

    #[error("bound of {name} must be a finite number, got {bound}")]
    NonFiniteBound { name: String, bound: String },

    #[error("{name} is already declared as {declared}, cannot declare it as {requested}")]
    Redeclared {
        name: String,
        declared: Cardinality,
        requested: Cardinality,
    },

    #[error("relationship between variables is invalid: {0}")]
    Relationship(#[from] RelationshipError),
}

/// Errors recording a relationship between two variables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationshipError {
    #[error("{0:?} is not a valid environment variable name")]
    MalformedName(String),

    #[error("{0} is not registered")]
    Unregistered(String),
}
