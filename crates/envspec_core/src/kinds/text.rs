//! Free-form string variables.

use crate::error::ValueError;
use crate::kind::Kind;
use crate::schema::Schema;

/// A non-empty string with optional length bounds, measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Kind for Text {
    type Value = String;

    fn schema(&self) -> Schema {
        Schema::of_type("string")
    }

    fn parse(&self, raw: &str) -> Result<String, ValueError> {
        Ok(raw.to_string())
    }

    fn validate(&self, value: &String) -> Result<(), ValueError> {
        if value.is_empty() {
            return Err(ValueError::Empty);
        }

        let length = value.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Err(ValueError::TooShort(min));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(ValueError::TooLong(max));
            }
        }

        Ok(())
    }

    fn render(&self, value: &String) -> String {
        format!("{:?}", value)
    }

    fn render_raw(&self, raw: &str) -> String {
        format!("{:?}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_quotes() {
        let kind = Text::new();
        assert_eq!(kind.render(&"<value>".to_string()), r#""<value>""#);
        assert_eq!(kind.render_raw("a\"b"), r#""a\"b""#);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Text::new().validate(&String::new()), Err(ValueError::Empty));
    }

    #[test]
    fn test_length_bounds_count_characters() {
        let kind = Text {
            min_length: Some(2),
            max_length: Some(3),
        };

        assert_eq!(kind.validate(&"é".to_string()), Err(ValueError::TooShort(2)));
        assert_eq!(kind.validate(&"éé".to_string()), Ok(()));
        assert_eq!(kind.validate(&"abcd".to_string()), Err(ValueError::TooLong(3)));
    }
}
