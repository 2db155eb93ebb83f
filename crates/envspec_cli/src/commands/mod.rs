//! CLI command definitions.
//!
//! Both subcommands read the same manifest, given globally with
//! `--manifest` or `ENVSPEC_MANIFEST`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod check;
pub mod docs;

/// envspec - declare, validate and document environment variables
#[derive(Parser)]
#[command(name = "envspec")]
#[command(version, about = "envspec - declare, validate and document environment variables")]
#[command(long_about = r#"
envspec reads a manifest declaring the environment variables an application
depends on, then validates the current environment against it or renders
documentation for it.

COMMANDS:
  check  → Validate the process environment against the manifest
  docs   → Render markdown documentation for the manifest

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid manifest
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manifest declaring the variables (.toml, .yaml or .yml)
    #[arg(
        short,
        long,
        global = true,
        env = "ENVSPEC_MANIFEST",
        default_value = "envspec.toml"
    )]
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the process environment
    Check(check::CheckArgs),

    /// Render markdown documentation
    Docs(docs::DocsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["envspec", "check", "--format", "json", "-m", "app.yaml"]).unwrap();

        assert_eq!(cli.manifest, PathBuf::from("app.yaml"));
        assert!(matches!(
            cli.command,
            Commands::Check(check::CheckArgs {
                format: check::OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_docs() {
        let cli = Cli::try_parse_from(["envspec", "docs", "--output", "ENV.md", "--no-index", "-v"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Docs(args) => {
                assert_eq!(args.output, Some(PathBuf::from("ENV.md")));
                assert!(args.no_index);
                assert!(!args.no_explanatory_text);
                assert!(!args.no_usage_examples);
            }
            _ => panic!("expected docs command"),
        }
    }

    #[test]
    fn test_parse_docs_without_usage_examples() {
        let cli = Cli::try_parse_from(["envspec", "docs", "--no-usage-examples"]).unwrap();

        match cli.command {
            Commands::Docs(args) => {
                assert!(args.no_usage_examples);
                assert!(!args.no_index);
            }
            _ => panic!("expected docs command"),
        }
    }
}
