//! envspec CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid manifest
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;
mod manifest;

use commands::{Cli, Commands};
use error::{ManifestError, ValidationFailed};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_MANIFEST: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "envspec=debug" } else { "envspec=info" };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(&cli.manifest, args),
        Commands::Docs(args) => commands::docs::execute(&cli.manifest, args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ValidationFailed>().is_some() {
        ExitCodes::VALIDATION_FAILURE
    } else if e.downcast_ref::<ManifestError>().is_some() {
        ExitCodes::INVALID_MANIFEST
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_error() {
        let failed = anyhow::Error::from(ValidationFailed(2));
        assert_eq!(categorize_error(&failed), ExitCodes::VALIDATION_FAILURE);

        let manifest = anyhow::Error::from(ManifestError::UnsupportedFormat(PathBuf::from("a.ini")));
        assert_eq!(categorize_error(&manifest), ExitCodes::INVALID_MANIFEST);

        let wrapped = anyhow::Error::from(ManifestError::Duplicate("A".to_string())).context("loading");
        assert_eq!(categorize_error(&wrapped), ExitCodes::INVALID_MANIFEST);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(categorize_error(&other), ExitCodes::GENERAL_ERROR);
    }
}
