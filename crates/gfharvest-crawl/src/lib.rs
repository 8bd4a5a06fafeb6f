//! Storage crawl engine for gfharvest.
//!
//! This crate walks a storage namespace through a
//! [`StorageAccess`](gfharvest_core::StorageAccess) port and builds a
//! [`HarvestState`]: one record per entry, a running byte total and a ledger
//! of listed directories.
//!
//! # Overview
//!
//! - **Depth-first, sequential** descent bounded by `max_depth`
//! - **Failure isolation**: a directory that cannot be listed, an entry that
//!   cannot be read or a checksum that cannot be computed is reported and
//!   skipped, never fatal
//! - **Progress stream**: one human-readable line per entry
//!
//! # Example
//!
//! ```rust,no_run
//! use gfharvest_crawl::{CrawlConfig, Crawler, LocalStorage};
//!
//! let config = CrawlConfig::builder()
//!     .max_depth(3u32)
//!     .checksum_algorithm(Some("SHA256"))
//!     .build()
//!     .unwrap();
//!
//! let crawler = Crawler::new(LocalStorage::new(), config);
//! let harvest = crawler.crawl("/data/store", &mut std::io::stdout());
//!
//! println!("{} files, {} bytes", harvest.file_count(), harvest.size_so_far());
//! ```

mod crawler;
pub mod format;
mod local;
mod memory;
mod progress;

pub use crawler::Crawler;
pub use local::{LOCAL_ALGORITHMS, LocalListing, LocalStorage, local_path, stat_from_metadata};
pub use memory::{MemoryListing, MemoryStorage};
pub use progress::{ChecksumSummary, FailureLine, ProgressLine, indent};

// Re-export core types for convenience
pub use gfharvest_core::{
    Checksums, CrawlConfig, CrawlWarning, DirEntry, DirectoryError, DirectoryListing, FileRecord,
    HarvestState, StatRecord, StorageAccess, StorageError, WarningKind,
};
