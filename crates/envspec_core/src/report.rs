//! Rendering of validation results as a human-readable report.

use crate::schema::{Schema, SchemaVisitor};
use crate::table::Table;
use crate::variable::ValidationResult;

/// First line of every report.
pub const HEADER: &str = "ENVIRONMENT VARIABLES:";

/// Shown next to valid variables.
const VALID: &str = "✓";

/// Shown next to invalid variables.
const INVALID: &str = "✗";

/// Draws attention to the names of invalid variables.
const CHEVRON: &str = "❯";

/// Render results as a table sorted by name.
///
/// The sort is stable: results sharing a name keep their original order.
pub fn render_results(mut results: Vec<ValidationResult>) -> String {
    results.sort_by(|a, b| a.name.cmp(&b.name));

    let mut table = Table::new();

    for result in &results {
        let marker = if result.error.is_some() { CHEVRON } else { " " };
        let name = format!(" {} {}", marker, result.name);

        let mut input = render_input(&result.schema);
        if let Some(default) = &result.default_value {
            input.push_str(" = ");
            input.push_str(default);
        }

        let status = match (&result.error, &result.explicit_value) {
            (Some(err), _) => format!("{} {}", INVALID, err.reason()),
            (None, _) if result.using_default => format!("{} using default value", VALID),
            (None, Some(value)) => format!("{} set to {}", VALID, value),
            (None, None) => format!("{} undefined", VALID),
        };

        table.add_row([name, input, result.description.clone(), status]);
    }

    format!("{}\n{}", HEADER, table.render())
}

/// Render a schema in the compact form used by the report's input column.
pub fn render_input(schema: &Schema) -> String {
    let mut renderer = InputRenderer::default();
    schema.accept(&mut renderer);
    renderer.output
}

#[derive(Default)]
struct InputRenderer {
    output: String,
}

impl SchemaVisitor for InputRenderer {
    fn visit_range(&mut self, min: Option<&str>, max: Option<&str>) {
        let rendered = match (min, max) {
            (Some(min), Some(max)) => format!("({}..{})", min, max),
            (None, Some(max)) => format!("(...{})", max),
            (Some(min), None) => format!("({}...)", min),
            (None, None) => "(...)".to_string(),
        };
        self.output.push_str(&rendered);
    }

    fn visit_one_of(&mut self, options: &[Schema]) {
        for (i, option) in options.iter().enumerate() {
            if i > 0 {
                self.output.push('|');
            }
            option.accept(self);
        }
    }

    fn visit_literal(&mut self, value: &str) {
        self.output.push_str(value);
    }

    fn visit_type(&mut self, name: &str) {
        self.output.push('[');
        self.output.push_str(name);
        self.output.push(']');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SpecError, ValueError};

    fn result(name: &str, schema: Schema) -> ValidationResult {
        ValidationResult {
            name: name.to_string(),
            description: "<desc>".to_string(),
            schema,
            default_value: None,
            explicit_value: None,
            using_default: false,
            error: None,
        }
    }

    #[test]
    fn test_render_input_variants() {
        assert_eq!(render_input(&Schema::range(Some("1".into()), None)), "(1...)");
        assert_eq!(render_input(&Schema::range(None, Some("9".into()))), "(...9)");
        assert_eq!(
            render_input(&Schema::range(Some("1".into()), Some("9".into()))),
            "(1..9)"
        );
        assert_eq!(
            render_input(&Schema::one_of(vec![Schema::literal("true"), Schema::literal("false")])),
            "true|false"
        );
        assert_eq!(render_input(&Schema::of_type("string")), "[string]");
    }

    #[test]
    fn test_single_failing_row() {
        let mut r = result(
            "DEBUG",
            Schema::one_of(vec![Schema::literal("true"), Schema::literal("false")]),
        );
        r.error = Some(SpecError::Invalid {
            name: "DEBUG".to_string(),
            value: "\"\"".to_string(),
            reason: ValueError::Empty,
        });

        assert_eq!(
            render_results(vec![r]),
            "ENVIRONMENT VARIABLES:\n ❯ DEBUG    true|false  <desc>  ✗ must not be empty\n"
        );
    }

    #[test]
    fn test_statuses_and_sorting() {
        let mut set = result("B_SET", Schema::of_type("u16"));
        set.explicit_value = Some("8080".to_string());

        let mut defaulted = result("A_DEFAULT", Schema::range(Some("1".into()), None));
        defaulted.default_value = Some("10".to_string());
        defaulted.using_default = true;

        let absent = result("C_ABSENT", Schema::of_type("string"));

        let report = render_results(vec![set, absent, defaulted]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "   A_DEFAULT  (1...) = 10  <desc>  ✓ using default value");
        assert_eq!(lines[2], "   B_SET      [u16]        <desc>  ✓ set to 8080");
        assert_eq!(lines[3], "   C_ABSENT   [string]     <desc>  ✓ undefined");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut first = result("SAME", Schema::of_type("string"));
        first.description = "first".to_string();
        let mut second = result("SAME", Schema::of_type("string"));
        second.description = "second".to_string();

        let report = render_results(vec![first, second]);
        let first_at = report.find("first").unwrap();
        let second_at = report.find("second").unwrap();
        assert!(first_at < second_at);
    }
}
