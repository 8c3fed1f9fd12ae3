//! Error types for batch output.

use magicgen_generator::RecordError;
use thiserror::Error;

/// Errors that can occur while running a generation job.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Schema parsing or record generation failed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
