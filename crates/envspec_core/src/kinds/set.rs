//! Variables restricted to an enumerated set of members.

use std::fmt;

use crate::error::ValueError;
use crate::kind::Kind;
use crate::schema::Schema;

/// A value chosen from a fixed list of members, matched by their `Display`
/// form.
#[derive(Debug, Clone, PartialEq)]
pub struct Set<T> {
    pub(crate) members: Vec<T>,
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T: Clone + fmt::Display + Send + Sync + 'static> Set<T> {
    pub fn new(members: impl IntoIterator<Item = T>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    fn expected(&self) -> String {
        self.members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T: Clone + fmt::Display + Send + Sync + 'static> Kind for Set<T> {
    type Value = T;

    fn schema(&self) -> Schema {
        Schema::one_of(self.members.iter().map(|m| Schema::literal(m.to_string())).collect())
    }

    fn parse(&self, raw: &str) -> Result<T, ValueError> {
        self.members
            .iter()
            .find(|m| m.to_string() == raw)
            .cloned()
            .ok_or_else(|| ValueError::NotMember(self.expected()))
    }

    fn validate(&self, value: &T) -> Result<(), ValueError> {
        let literal = value.to_string();
        if self.members.iter().any(|m| m.to_string() == literal) {
            Ok(())
        } else {
            Err(ValueError::NotMember(self.expected()))
        }
    }

    fn render(&self, value: &T) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Level {
        Debug,
        Info,
    }

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Level::Debug => write!(f, "debug"),
                Level::Info => write!(f, "info"),
            }
        }
    }

    #[test]
    fn test_parse_member() {
        let kind = Set::new([Level::Debug, Level::Info]);
        assert_eq!(kind.parse("info"), Ok(Level::Info));
        assert_eq!(
            kind.parse("trace"),
            Err(ValueError::NotMember("debug, info".to_string()))
        );
    }

    #[test]
    fn test_schema_lists_members_in_order() {
        let kind = Set::new(["b", "a"]);
        assert_eq!(kind.schema().literals(), vec!["b", "a"]);
    }
}
