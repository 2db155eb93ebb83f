//! Markdown rendering of a registry.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use envspec_core::{Registry, Schema, SchemaVisitor, Variable};
use tracing::{debug, info};

use crate::error::{DocsError, DocsResult};

/// Renders documentation for every variable in a registry.
pub struct MarkdownRenderer<'a> {
    registry: &'a Registry,
    app_name: Option<String>,
    index: bool,
    explanatory_text: bool,
    usage_examples: bool,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a renderer with the index, explanatory text and usage
    /// examples enabled.
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            app_name: None,
            index: true,
            explanatory_text: true,
            usage_examples: true,
        }
    }

    /// Name the application in the introduction.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Omit the index table.
    pub fn without_index(mut self) -> Self {
        self.index = false;
        self
    }

    /// Omit the introduction and the usage notes.
    pub fn without_explanatory_text(mut self) -> Self {
        self.explanatory_text = false;
        self
    }

    /// Omit the example `export` lines under each variable.
    pub fn without_usage_examples(mut self) -> Self {
        self.usage_examples = false;
        self
    }

    /// Render the document.
    pub fn render(&self) -> String {
        let mut variables = self.registry.variables();
        variables.sort_by(|a, b| a.name().cmp(b.name()));
        debug!("Rendering documentation for {} variable(s)", variables.len());

        let mut doc = Document::default();
        doc.line("# Environment Variables");

        if self.explanatory_text {
            self.render_introduction(&mut doc);
        }

        if variables.is_empty() {
            doc.blank();
            doc.line("**There do not appear to be any environment variables.**");
            return doc.finish();
        }

        if self.index {
            render_index(&mut doc, &variables);
        }

        doc.blank();
        doc.line("## Specification");
        for variable in &variables {
            self.render_variable(&mut doc, variable.as_ref());
        }

        if self.explanatory_text {
            render_usage(&mut doc);
        }

        doc.finish()
    }

    /// Render the document and write it to `path`, creating parent
    /// directories as needed.
    pub fn write_to(&self, path: &Path) -> DocsResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.render()).map_err(|source| DocsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Wrote documentation to {:?}", path);
        Ok(())
    }

    fn render_introduction(&self, doc: &mut Document) {
        doc.blank();
        match &self.app_name {
            Some(name) => doc.line(&format!(
                "This document describes the environment variables used by `{}`.",
                name
            )),
            None => doc.line("This document describes the environment variables used by this application."),
        }

        doc.blank();
        doc.line("If any of the environment variable values do not meet the requirements herein,");
        doc.line("the application will print usage information to `STDERR` then exit with a");
        doc.line("non-zero exit code. Please note that **undefined** variables and **empty**");
        doc.line("values are considered equivalent.");
    }

    fn render_variable(&self, doc: &mut Document, variable: &dyn Variable) {
        let schema = variable.schema();
        let default = variable.default_value();

        doc.blank();
        doc.line(&format!("### `{}`", variable.name()));
        doc.blank();
        doc.line(&format!("> {}", variable.description()));

        if variable.is_deprecated() {
            doc.blank();
            doc.line(&format!(
                "⚠️ `{}` is **deprecated**; its use is discouraged and it may be removed in a future version.",
                variable.name()
            ));
        }

        let accepted = describe(&schema);
        doc.blank();
        match &default {
            Some(default) => {
                doc.line(&format!("This variable **MAY** be set to {}.", accepted));
                doc.line(&format!("If left undefined the default value of `{}` is used.", default));
            }
            None if variable.is_required() => {
                doc.line(&format!("This variable **MUST** be set to {}.", accepted));
                doc.line("If left undefined the application will print usage information to `STDERR` then");
                doc.line("exit with a non-zero exit code.");
            }
            None => {
                doc.line(&format!(
                    "This variable **MAY** be set to {} or left undefined.",
                    accepted
                ));
            }
        }

        let members = schema.literals();
        if matches!(schema, Schema::OneOf { .. }) && !members.is_empty() {
            doc.blank();
            for member in members {
                doc.line(&format!("- `{}`", member));
            }
        }

        if self.usage_examples {
            render_examples(doc, variable.name(), &schema, default.as_deref());
        }

        let related = self.registry.refers_to(variable.name());
        if !related.is_empty() {
            doc.blank();
            doc.line("#### See also");
            doc.blank();
            for name in related {
                match self.registry.get(&name) {
                    Some(other) => doc.line(&format!(
                        "- [`{}`](#{}): {}",
                        name,
                        anchor(&name),
                        other.description()
                    )),
                    None => doc.line(&format!("- [`{}`](#{})", name, anchor(&name))),
                }
            }
        }
    }
}

fn render_index(doc: &mut Document, variables: &[Arc<dyn Variable>]) {
    doc.blank();
    doc.line("## Index");
    doc.blank();
    doc.line("| Name | Usage | Description |");
    doc.line("| ---- | ----- | ----------- |");

    for variable in variables {
        let usage = if variable.is_deprecated() {
            "⚠️ deprecated".to_string()
        } else if let Some(default) = variable.default_value() {
            format!("defaults to `{}`", default)
        } else if variable.is_required() {
            "**required**".to_string()
        } else {
            "optional".to_string()
        };

        doc.line(&format!(
            "| [`{}`](#{}) | {} | {} |",
            variable.name(),
            anchor(variable.name()),
            usage,
            variable.description().replace('|', "\\|")
        ));
    }
}

fn render_examples(doc: &mut Document, name: &str, schema: &Schema, default: Option<&str>) {
    let mut examples = Examples::default();
    if let Some(default) = default {
        // Already rendered by the kind, quotes included.
        examples.push_word(default.to_string(), Some("default value"));
    }
    schema.accept(&mut examples);

    if examples.words.is_empty() {
        return;
    }

    doc.blank();
    doc.line("```sh");
    for (word, note) in examples.words {
        match note {
            Some(note) => doc.line(&format!("export {}={} # ({})", name, word, note)),
            None => doc.line(&format!("export {}={}", name, word)),
        }
    }
    doc.line("```");
}

fn render_usage(doc: &mut Document) {
    doc.blank();
    doc.line("## Usage");
    doc.blank();
    doc.line("Variables are read from the process environment when the application starts.");
    doc.line("An environment variable set to an empty string is treated as if it were not set.");
}

/// Heading anchors as generated by common markdown renderers.
fn anchor(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Describe the values a schema accepts, as the object of "set to ...".
fn describe(schema: &Schema) -> String {
    let mut prose = Prose::default();
    schema.accept(&mut prose);
    prose.text
}

#[derive(Default)]
struct Prose {
    text: String,
}

impl SchemaVisitor for Prose {
    fn visit_range(&mut self, min: Option<&str>, max: Option<&str>) {
        self.text = match (min, max) {
            (Some(min), Some(max)) => format!("a value between `{}` and `{}`", min, max),
            (Some(min), None) => format!("`{}` or greater", min),
            (None, Some(max)) => format!("`{}` or less", max),
            (None, None) => "a number".to_string(),
        };
    }

    fn visit_one_of(&mut self, _options: &[Schema]) {
        self.text = "one of the values below".to_string();
    }

    fn visit_literal(&mut self, value: &str) {
        self.text = format!("`{}`", value);
    }

    fn visit_type(&mut self, name: &str) {
        self.text = match name {
            "string" => "a non-empty string".to_string(),
            other => format!("a `{}` value", other),
        };
    }
}

/// Example values for a schema as shell words, each with an optional note.
#[derive(Default)]
struct Examples {
    words: Vec<(String, Option<&'static str>)>,
}

impl Examples {
    fn push(&mut self, value: &str, note: Option<&'static str>) {
        self.push_word(shell_quote(value), note);
    }

    fn push_word(&mut self, word: String, note: Option<&'static str>) {
        if !self.words.iter().any(|(w, _)| *w == word) {
            self.words.push((word, note));
        }
    }
}

impl SchemaVisitor for Examples {
    fn visit_range(&mut self, min: Option<&str>, max: Option<&str>) {
        if let Some(min) = min {
            self.push(min, Some("the minimum accepted value"));
        }
        if let Some(max) = max {
            self.push(max, Some("the maximum accepted value"));
        }
    }

    fn visit_one_of(&mut self, options: &[Schema]) {
        for option in options {
            option.accept(self);
        }
    }

    fn visit_literal(&mut self, value: &str) {
        self.push(value, None);
    }

    fn visit_type(&mut self, name: &str) {
        let sample = match name {
            "string" => "foo",
            "file path" => "/path/to/file",
            "f32" | "f64" => "123.45",
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
            | "usize" => "123",
            _ => return,
        };
        self.push(sample, Some("non-normative"));
    }
}

/// Quote `value` for a POSIX shell unless it is a plain word.
fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:+,@%".contains(c));

    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// Line-oriented markdown buffer.
#[derive(Default)]
struct Document {
    text: String,
}

impl Document {
    fn line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_schemas() {
        assert_eq!(describe(&Schema::range(Some("1".into()), None)), "`1` or greater");
        assert_eq!(describe(&Schema::range(None, Some("9".into()))), "`9` or less");
        assert_eq!(
            describe(&Schema::range(Some("1".into()), Some("9".into()))),
            "a value between `1` and `9`"
        );
        assert_eq!(describe(&Schema::of_type("string")), "a non-empty string");
        assert_eq!(describe(&Schema::of_type("u16")), "a `u16` value");
        assert_eq!(
            describe(&Schema::one_of(vec![Schema::literal("a"), Schema::literal("b")])),
            "one of the values below"
        );
        assert_eq!(describe(&Schema::literal("on")), "`on`");
    }

    #[test]
    fn test_examples_for_schemas() {
        let words = |schema: &Schema| {
            let mut examples = Examples::default();
            schema.accept(&mut examples);
            examples.words
        };

        assert_eq!(
            words(&Schema::range(Some("1".into()), Some("9".into()))),
            vec![
                ("1".to_string(), Some("the minimum accepted value")),
                ("9".to_string(), Some("the maximum accepted value")),
            ]
        );
        assert_eq!(
            words(&Schema::one_of(vec![Schema::literal("on"), Schema::literal("on")])),
            vec![("on".to_string(), None)]
        );
        assert_eq!(
            words(&Schema::of_type("u16")),
            vec![("123".to_string(), Some("non-normative"))]
        );
        assert!(words(&Schema::of_type("uuid")).is_empty());
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("debug"), "debug");
        assert_eq!(shell_quote("/path/to/file"), "/path/to/file");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("LOG_LEVEL"), "log_level");
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        let doc = MarkdownRenderer::new(&registry)
            .without_explanatory_text()
            .render();

        assert_eq!(
            doc,
            "# Environment Variables\n\n**There do not appear to be any environment variables.**\n"
        );
    }
}
