//! Documentation links between variables.
//!
//! Relationships are advisory. They are checked when recorded but never
//! consulted during validation, and cycles are allowed.

use serde::Serialize;

use crate::error::{RelationshipError, RelationshipResult};
use crate::variable::is_valid_name;

/// A directed "see also" link from one variable to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RefersTo {
    pub from: String,
    pub to: String,
}

impl RefersTo {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check both endpoints against `is_registered`.
    pub(crate) fn check(&self, is_registered: impl Fn(&str) -> bool) -> RelationshipResult<()> {
        for name in [&self.from, &self.to] {
            if !is_valid_name(name) {
                return Err(RelationshipError::MalformedName(name.clone()));
            }
        }

        for name in [&self.from, &self.to] {
            if !is_registered(name) {
                return Err(RelationshipError::Unregistered(name.clone()));
            }
        }

        Ok(())
    }
}
