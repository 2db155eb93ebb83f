//! Descriptions of the values a variable accepts.
//!
//! A [`Schema`] is pure data. Renderers either `match` on it directly or
//! implement [`SchemaVisitor`] and call [`Schema::accept`], which is how the
//! report table and the markdown documentation share one description.

use serde::Serialize;

/// The shape of acceptable input for a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schema {
    /// An inclusive range. Either bound may be absent.
    Range {
        min: Option<String>,
        max: Option<String>,
    },
    /// Exactly one of the nested schemas, in declaration order.
    OneOf { options: Vec<Schema> },
    /// A fixed token accepted verbatim.
    Literal { value: String },
    /// Any value of a named type, such as `string` or `u16`.
    Type { name: String },
}

impl Schema {
    pub fn range(min: Option<String>, max: Option<String>) -> Self {
        Schema::Range { min, max }
    }

    pub fn one_of(options: Vec<Schema>) -> Self {
        Schema::OneOf { options }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Schema::Literal {
            value: value.into(),
        }
    }

    pub fn of_type(name: impl Into<String>) -> Self {
        Schema::Type { name: name.into() }
    }

    /// Dispatch to the visitor method matching this variant.
    pub fn accept<V: SchemaVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Schema::Range { min, max } => visitor.visit_range(min.as_deref(), max.as_deref()),
            Schema::OneOf { options } => visitor.visit_one_of(options),
            Schema::Literal { value } => visitor.visit_literal(value),
            Schema::Type { name } => visitor.visit_type(name),
        }
    }

    /// The literal tokens of a `OneOf` schema, in order.
    ///
    /// Nested non-literal options are skipped.
    pub fn literals(&self) -> Vec<&str> {
        match self {
            Schema::OneOf { options } => options
                .iter()
                .filter_map(|s| match s {
                    Schema::Literal { value } => Some(value.as_str()),
                    _ => None,
                })
                .collect(),
            Schema::Literal { value } => vec![value.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Double-dispatch target for [`Schema::accept`].
pub trait SchemaVisitor {
    fn visit_range(&mut self, min: Option<&str>, max: Option<&str>);
    fn visit_one_of(&mut self, options: &[Schema]);
    fn visit_literal(&mut self, value: &str);
    fn visit_type(&mut self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl SchemaVisitor for Trace {
        fn visit_range(&mut self, min: Option<&str>, max: Option<&str>) {
            self.0.push(format!("range {:?} {:?}", min, max));
        }

        fn visit_one_of(&mut self, options: &[Schema]) {
            self.0.push(format!("one_of {}", options.len()));
            for option in options {
                option.accept(self);
            }
        }

        fn visit_literal(&mut self, value: &str) {
            self.0.push(format!("literal {}", value));
        }

        fn visit_type(&mut self, name: &str) {
            self.0.push(format!("type {}", name));
        }
    }

    #[test]
    fn test_accept_dispatches_each_variant() {
        let schema = Schema::one_of(vec![
            Schema::literal("on"),
            Schema::range(Some("1".into()), None),
            Schema::of_type("string"),
        ]);

        let mut trace = Trace::default();
        schema.accept(&mut trace);

        assert_eq!(
            trace.0,
            vec![
                "one_of 3",
                "literal on",
                "range Some(\"1\") None",
                "type string",
            ]
        );
    }

    #[test]
    fn test_literals() {
        let schema = Schema::one_of(vec![Schema::literal("true"), Schema::literal("false")]);
        assert_eq!(schema.literals(), vec!["true", "false"]);
        assert!(Schema::of_type("u8").literals().is_empty());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(Schema::range(None, Some("10".into()))).unwrap();
        assert_eq!(json["kind"], "range");
        assert_eq!(json["max"], "10");
        assert!(json["min"].is_null());
    }
}
