//! Harvested file records and ledger entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stat::StatRecord;

/// Mapping from checksum algorithm name to its value.
pub type Checksums = BTreeMap<String, String>;

/// One harvested entry: its URL, stat snapshot and optional checksums.
///
/// Records are produced once per entry and never mutated after they are
/// appended to a harvest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full URL of the entry.
    pub url: String,

    /// Stat snapshot returned by the listing.
    #[serde(rename = "fstat")]
    pub stat: StatRecord,

    /// Checksums keyed by algorithm (absent when disabled or failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksums: Option<Checksums>,
}

impl FileRecord {
    /// Create a record without checksums.
    pub fn new(url: impl Into<String>, stat: StatRecord) -> Self {
        Self {
            url: url.into(),
            stat,
            checksums: None,
        }
    }

    /// Attach a single checksum value.
    pub fn with_checksum(mut self, algorithm: impl Into<String>, value: impl Into<String>) -> Self {
        self.checksums
            .get_or_insert_with(Checksums::new)
            .insert(algorithm.into(), value.into());
        self
    }

    /// Last path component of the URL.
    pub fn name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    /// Check if the record carries checksum data.
    pub fn has_checksums(&self) -> bool {
        self.checksums.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Entry in the directory ledger.
///
/// The ledger gets one entry for every directory that was opened
/// successfully. Directories that fail to open are not recorded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryError {
    /// URL of the directory.
    pub url: String,
}

impl DirectoryError {
    /// Create a ledger entry.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
