//! Error types for fpa-sheets-snapshot

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from snapshot storage
#[derive(Debug, Error)]
pub enum Error {
    /// No snapshot file with the given id
    #[error("Snapshot '{id}' not found in {}", dir.display())]
    NotFound { id: String, dir: PathBuf },

    /// No home directory to anchor the default storage location
    #[error("Could not determine a home directory for snapshot storage")]
    NoHomeDir,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed snapshot file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
