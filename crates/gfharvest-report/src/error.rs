//! Error types for report persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File could not be created, written or opened.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized or parsed.
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
