//! Check command - Validate the environment against a manifest.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use envspec_core::{render_results, ProcessEnv, Registry, ValidationResult};

use crate::error::ValidationFailed;
use crate::manifest::Manifest;

#[derive(Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The aligned report table
    Table,
    /// Machine-readable results
    Json,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    valid: bool,
    variables: &'a [ValidationResult],
}

pub fn execute(manifest_path: &Path, args: CheckArgs) -> Result<()> {
    info!("Checking environment against {:?}", manifest_path);

    let manifest = Manifest::load(manifest_path)?;
    let registry = Arc::new(Registry::new());
    manifest.declare(&registry, &ProcessEnv)?;

    let (results, ok) = registry.results();
    let failures = results.iter().filter(|r| !r.is_valid()).count();

    print!("{}", render(results, args.format)?);

    if !ok {
        return Err(ValidationFailed(failures).into());
    }
    Ok(())
}

/// Format results for output. Every format ends with a newline.
pub fn render(results: Vec<ValidationResult>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_results(results)),
        OutputFormat::Json => {
            let report = CheckReport {
                valid: results.iter().all(ValidationResult::is_valid),
                variables: &results,
            };
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize results")?;
            Ok(format!("{}\n", json))
        }
    }
}
