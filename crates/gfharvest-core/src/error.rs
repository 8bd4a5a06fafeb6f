//! Error types for crawl operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a storage access port.
///
/// None of these abort a crawl. Each one is scoped to the directory or
/// file it names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// A directory could not be opened.
    #[error("unable to list {url}: {message}")]
    List { url: String, message: String },

    /// A single entry read failed in the middle of a listing.
    #[error("error reading {url}: {message}")]
    Read { url: String, message: String },

    /// A checksum could not be computed for a file.
    #[error("unable to compute {algorithm} checksum of {url}: {message}")]
    Checksum {
        url: String,
        algorithm: String,
        message: String,
    },
}

impl StorageError {
    /// Create a listing error.
    pub fn list(url: impl Into<String>, message: impl ToString) -> Self {
        Self::List {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an entry read error.
    pub fn read(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Read {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a checksum error.
    pub fn checksum(
        url: impl Into<String>,
        algorithm: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::Checksum {
            url: url.into(),
            algorithm: algorithm.into(),
            message: message.to_string(),
        }
    }

    /// Wrap an I/O error with the given kind and path context.
    pub fn from_io(kind: WarningKind, url: impl Into<String>, source: &std::io::Error) -> Self {
        let url = url.into();
        let message = match source.kind() {
            std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            std::io::ErrorKind::NotFound => "no such file or directory".to_string(),
            _ => source.to_string(),
        };
        match kind {
            WarningKind::ListError => Self::List { url, message },
            WarningKind::ReadError => Self::Read { url, message },
            WarningKind::ChecksumError => Self::Checksum {
                url,
                algorithm: String::new(),
                message,
            },
        }
    }

    /// The URL the error refers to.
    pub fn url(&self) -> &str {
        match self {
            Self::List { url, .. } | Self::Read { url, .. } | Self::Checksum { url, .. } => url,
        }
    }

    /// The warning kind this error is recorded as.
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::List { .. } => WarningKind::ListError,
            Self::Read { .. } => WarningKind::ReadError,
            Self::Checksum { .. } => WarningKind::ChecksumError,
        }
    }
}

/// Kind of crawl warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A directory could not be opened.
    ListError,
    /// A directory entry could not be read.
    ReadError,
    /// A checksum could not be computed.
    ChecksumError,
}

/// Non-fatal failure encountered during a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlWarning {
    /// URL where the failure occurred.
    pub url: String,
    /// Human-readable message.
    pub message: String,
    /// Kind of failure.
    pub kind: WarningKind,
}

impl CrawlWarning {
    /// Create a new crawl warning.
    pub fn new(url: impl Into<String>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
            kind,
        }
    }
}

impl From<&StorageError> for CrawlWarning {
    fn from(err: &StorageError) -> Self {
        Self {
            url: err.url().to_string(),
            message: err.to_string(),
            kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_from_io() {
        let err = StorageError::from_io(
            WarningKind::ListError,
            "/test/path",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StorageError::List { .. }));
        assert_eq!(err.url(), "/test/path");
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_warning_from_error() {
        let err = StorageError::checksum("/data/f1", "ADLER32", "timeout");
        let warning = CrawlWarning::from(&err);
        assert_eq!(warning.kind, WarningKind::ChecksumError);
        assert_eq!(warning.url, "/data/f1");
        assert!(warning.message.contains("ADLER32"));
    }
}
