//! Error types for the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while loading or declaring a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Cannot read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported manifest format: {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),

    #[error("Variable {0} is declared more than once")]
    Duplicate(String),

    #[error("Invalid declaration of {name}: {message}")]
    InvalidVariable { name: String, message: String },

    #[error("Variable {name} refers to {to}, which is not declared before it")]
    UnknownReference { name: String, to: String },
}

/// The environment did not satisfy the manifest.
#[derive(Error, Debug)]
#[error("{0} environment variable(s) failed validation")]
pub struct ValidationFailed(pub usize);
