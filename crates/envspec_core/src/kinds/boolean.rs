//! Boolean variables.

use crate::error::ValueError;
use crate::kind::Kind;
use crate::schema::Schema;

/// A boolean spelled with one of two literals, `true` and `false` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    pub(crate) true_literal: String,
    pub(crate) false_literal: String,
}

impl Default for Boolean {
    fn default() -> Self {
        Self::new()
    }
}

impl Boolean {
    pub fn new() -> Self {
        Self {
            true_literal: "true".to_string(),
            false_literal: "false".to_string(),
        }
    }
}

impl Kind for Boolean {
    type Value = bool;

    fn schema(&self) -> Schema {
        Schema::one_of(vec![
            Schema::literal(&self.true_literal),
            Schema::literal(&self.false_literal),
        ])
    }

    fn parse(&self, raw: &str) -> Result<bool, ValueError> {
        if raw == self.true_literal {
            Ok(true)
        } else if raw == self.false_literal {
            Ok(false)
        } else {
            Err(ValueError::NotMember(format!(
                "{}, {}",
                self.true_literal, self.false_literal
            )))
        }
    }

    fn validate(&self, _value: &bool) -> Result<(), ValueError> {
        Ok(())
    }

    fn render(&self, value: &bool) -> String {
        if *value {
            self.true_literal.clone()
        } else {
            self.false_literal.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_literals() {
        let kind = Boolean::new();
        assert_eq!(kind.parse("true"), Ok(true));
        assert_eq!(kind.parse("false"), Ok(false));
        assert_eq!(
            kind.parse("yes"),
            Err(ValueError::NotMember("true, false".to_string()))
        );
    }

    #[test]
    fn test_custom_literals_render() {
        let kind = Boolean {
            true_literal: "on".to_string(),
            false_literal: "off".to_string(),
        };
        assert_eq!(kind.parse("on"), Ok(true));
        assert_eq!(kind.render(&false), "off");
        assert_eq!(kind.schema().literals(), vec!["on", "off"]);
    }
}
