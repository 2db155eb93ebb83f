//! Error types for documentation output.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

/// Errors that can occur while writing documentation.
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Cannot write documentation to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
