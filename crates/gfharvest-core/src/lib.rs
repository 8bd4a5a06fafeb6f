//! Core types and traits for gfharvest.
//!
//! This crate provides the data structures shared by the crawl engine and
//! the report emitter: stat snapshots, file records, the harvest aggregate,
//! crawl configuration and the storage access port.

mod config;
mod error;
mod harvest;
mod port;
mod record;
pub mod stat;
mod url;

pub use config::{CrawlConfig, CrawlConfigBuilder, CrawlConfigBuilderError, DEFAULT_MAX_DEPTH};
pub use error::{CrawlWarning, StorageError, WarningKind};
pub use harvest::{HarvestState, MIN_ELAPSED_SECS};
pub use port::{DirEntry, DirectoryListing, StorageAccess};
pub use record::{Checksums, DirectoryError, FileRecord};
pub use stat::{FileKind, StatRecord};
pub use url::join_url;
