use std::path::PathBuf;

use thiserror::Error;

/// Errors that can surface from outline extraction.
///
/// Probe failures never appear here: they are folded into a zero
/// duration inside [`crate::probe`] and never reach callers.
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to read outline '{}': {source}", path.display())]
    ReadOutline {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write JSON output: {source}")]
    WriteOutput {
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for outline operations
pub type OutlineResult<T> = std::result::Result<T, OutlineError>;
