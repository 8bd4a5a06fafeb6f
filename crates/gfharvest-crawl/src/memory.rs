//! Scripted in-memory storage.
//!
//! Lets tests describe a namespace, including failing listings, failing
//! reads and failing checksums, without a storage endpoint.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use gfharvest_core::{DirEntry, DirectoryListing, StatRecord, StorageAccess, StorageError, join_url};

#[derive(Debug, Clone)]
enum Item {
    Entry(DirEntry),
    ReadError(String),
    RepeatReadError(String),
}

#[derive(Debug, Clone, Default)]
struct Listing {
    items: Vec<Item>,
    open_error: Option<String>,
}

/// In-memory namespace implementing [`StorageAccess`].
///
/// Checksums that were not set explicitly are derived from the URL, so every
/// entry has a stable value unless told to fail.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    listings: HashMap<String, Listing>,
    checksums: HashMap<String, Result<String, String>>,
    open_calls: RefCell<Vec<String>>,
    checksum_calls: RefCell<Vec<(String, String)>>,
}

impl MemoryStorage {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    fn listing(&mut self, url: &str) -> &mut Listing {
        self.listings.entry(url.to_string()).or_default()
    }

    /// Ensure a directory exists at `url`.
    pub fn add_dir(&mut self, url: &str) -> &mut Self {
        self.listing(url);
        self
    }

    /// Add a non-directory entry to the listing of `parent`.
    pub fn add_file(&mut self, parent: &str, name: &str, stat: StatRecord) -> &mut Self {
        self.listing(parent)
            .items
            .push(Item::Entry(DirEntry::new(name, stat)));
        self
    }

    /// Add a subdirectory entry to `parent` and create its listing.
    pub fn add_subdir(&mut self, parent: &str, name: &str, stat: StatRecord) -> &mut Self {
        self.add_file(parent, name, stat);
        self.add_dir(&join_url(parent, name))
    }

    /// Make opening `url` fail.
    pub fn fail_open(&mut self, url: &str, message: &str) -> &mut Self {
        self.listing(url).open_error = Some(message.to_string());
        self
    }

    /// Queue a single failed read in the listing of `url`.
    pub fn push_read_error(&mut self, url: &str, message: &str) -> &mut Self {
        self.listing(url)
            .items
            .push(Item::ReadError(message.to_string()));
        self
    }

    /// Make every read after the current position of `url` fail.
    pub fn fail_reads_forever(&mut self, url: &str, message: &str) -> &mut Self {
        self.listing(url)
            .items
            .push(Item::RepeatReadError(message.to_string()));
        self
    }

    /// Queue an entry with an empty name, which ends a listing.
    pub fn push_end_marker(&mut self, url: &str) -> &mut Self {
        self.listing(url)
            .items
            .push(Item::Entry(DirEntry::new("", StatRecord::default())));
        self
    }

    /// Set the checksum value returned for `url`.
    pub fn set_checksum(&mut self, url: &str, value: &str) -> &mut Self {
        self.checksums.insert(url.to_string(), Ok(value.to_string()));
        self
    }

    /// Make checksum computation for `url` fail.
    pub fn fail_checksum(&mut self, url: &str, message: &str) -> &mut Self {
        self.checksums
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// URLs passed to `open_directory`, in call order.
    pub fn open_calls(&self) -> Vec<String> {
        self.open_calls.borrow().clone()
    }

    /// `(url, algorithm)` pairs passed to `checksum`, in call order.
    pub fn checksum_calls(&self) -> Vec<(String, String)> {
        self.checksum_calls.borrow().clone()
    }
}

/// Open handle over a [`MemoryStorage`] listing.
#[derive(Debug)]
pub struct MemoryListing {
    url: String,
    items: VecDeque<Item>,
}

impl DirectoryListing for MemoryListing {
    fn next_entry(&mut self) -> Result<Option<DirEntry>, StorageError> {
        match self.items.pop_front() {
            None => Ok(None),
            Some(Item::Entry(entry)) => Ok(Some(entry)),
            Some(Item::ReadError(message)) => Err(StorageError::read(&self.url, message)),
            Some(Item::RepeatReadError(message)) => {
                let error = StorageError::read(&self.url, &message);
                self.items.push_front(Item::RepeatReadError(message));
                Err(error)
            }
        }
    }
}

impl StorageAccess for MemoryStorage {
    type Directory = MemoryListing;

    fn open_directory(&self, url: &str) -> Result<MemoryListing, StorageError> {
        self.open_calls.borrow_mut().push(url.to_string());

        let listing = self
            .listings
            .get(url)
            .ok_or_else(|| StorageError::list(url, "No such file or directory"))?;
        if let Some(message) = &listing.open_error {
            return Err(StorageError::list(url, message));
        }

        Ok(MemoryListing {
            url: url.to_string(),
            items: listing.items.iter().cloned().collect(),
        })
    }

    fn checksum(&self, url: &str, algorithm: &str) -> Result<String, StorageError> {
        self.checksum_calls
            .borrow_mut()
            .push((url.to_string(), algorithm.to_string()));

        match self.checksums.get(url) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(StorageError::checksum(url, algorithm, message)),
            None => Ok(blake3::hash(url.as_bytes()).to_hex().as_str()[..8].to_string()),
        }
    }
}
