//! Storage access port.
//!
//! The crawl engine only talks to storage through these traits, so the
//! same engine drives a remote storage client, the local filesystem or a
//! scripted in-memory tree.

use compact_str::CompactString;

use crate::error::StorageError;
use crate::stat::StatRecord;

/// One entry returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not a full URL). An empty name marks the end of a listing.
    pub name: CompactString,
    /// Stat snapshot for the entry.
    pub stat: StatRecord,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<CompactString>, stat: StatRecord) -> Self {
        Self {
            name: name.into(),
            stat,
        }
    }

    /// Check if this entry signals the end of the listing.
    pub fn is_end_marker(&self) -> bool {
        self.name.is_empty()
    }
}

/// An open directory handle.
pub trait DirectoryListing {
    /// Read the next entry.
    ///
    /// Returns `Ok(None)` at the end of the listing. A read error is
    /// transient: callers may keep calling after an `Err`.
    fn next_entry(&mut self) -> Result<Option<DirEntry>, StorageError>;
}

/// Capabilities the crawl engine needs from a storage endpoint.
pub trait StorageAccess {
    /// Handle type for an open directory.
    type Directory: DirectoryListing;

    /// Open a directory for listing.
    fn open_directory(&self, url: &str) -> Result<Self::Directory, StorageError>;

    /// Compute the named checksum of the entry at `url`.
    fn checksum(&self, url: &str, algorithm: &str) -> Result<String, StorageError>;
}

impl<T: StorageAccess + ?Sized> StorageAccess for &T {
    type Directory = T::Directory;

    fn open_directory(&self, url: &str) -> Result<Self::Directory, StorageError> {
        (**self).open_directory(url)
    }

    fn checksum(&self, url: &str, algorithm: &str) -> Result<String, StorageError> {
        (**self).checksum(url, algorithm)
    }
}
