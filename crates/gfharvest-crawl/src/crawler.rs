//! Depth-first recursive crawl engine.

use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use gfharvest_core::{
    CrawlConfig, CrawlWarning, DirEntry, DirectoryListing, FileRecord, HarvestState,
    StorageAccess, WarningKind, join_url,
};

use crate::format::{render_long, render_short};
use crate::progress::{FailureLine, ProgressLine};

/// Walks a storage namespace through a [`StorageAccess`] port.
///
/// The crawl is sequential and depth-first. Failures are scoped to the
/// directory or file they occur on and never abort the walk.
pub struct Crawler<S> {
    storage: S,
    config: CrawlConfig,
}

impl<S: StorageAccess> Crawler<S> {
    /// Create a new crawler.
    pub fn new(storage: S, config: CrawlConfig) -> Self {
        Self { storage, config }
    }

    /// The configuration this crawler runs with.
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// The storage port this crawler drives.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Crawl everything under `root`, writing progress lines to `out`.
    pub fn crawl(&self, root: &str, out: &mut impl Write) -> HarvestState {
        let mut harvest = HarvestState::new();
        self.crawl_into(root, out, &mut harvest);
        harvest
    }

    /// Crawl `root` into a harvest created by the caller.
    pub fn crawl_into(&self, root: &str, out: &mut impl Write, harvest: &mut HarvestState) {
        self.crawl_dir(root, 0, out, harvest);
    }

    fn crawl_dir(&self, url: &str, depth: u32, out: &mut dyn Write, harvest: &mut HarvestState) {
        debug!(url, depth, "opening");
        let started = Instant::now();

        let mut directory = match self.storage.open_directory(url) {
            Ok(directory) => directory,
            Err(error) => {
                warn!(url, %error, "listing failed");
                emit(out, FailureLine { depth, url, error: &error });
                harvest.record_warning(CrawlWarning::from(&error));
                return;
            }
        };

        harvest.record_listing(url);
        debug!(url, elapsed = ?started.elapsed(), "opened");

        let entries = self.read_entries(url, depth, &mut directory, out, harvest);
        debug!(url, count = entries.len(), "found entries");

        for entry in entries {
            self.process_entry(url, depth, entry, out, harvest);
        }
    }

    /// Drain a listing into memory, skipping over failed reads.
    fn read_entries(
        &self,
        url: &str,
        depth: u32,
        directory: &mut S::Directory,
        out: &mut dyn Write,
        harvest: &mut HarvestState,
    ) -> Vec<DirEntry> {
        let mut entries = Vec::new();
        let mut consecutive_errors = 0u32;

        loop {
            match directory.next_entry() {
                Ok(Some(entry)) if !entry.is_end_marker() => {
                    consecutive_errors = 0;
                    entries.push(entry);
                }
                Ok(_) => break,
                Err(error) => {
                    warn!(url, %error, "entry read failed");
                    emit(out, FailureLine { depth, url, error: &error });
                    harvest.record_warning(CrawlWarning::from(&error));

                    consecutive_errors += 1;
                    if self
                        .config
                        .max_consecutive_read_errors
                        .is_some_and(|limit| consecutive_errors >= limit)
                    {
                        warn!(url, consecutive_errors, "abandoning listing");
                        harvest.record_warning(CrawlWarning::new(
                            url,
                            format!(
                                "listing abandoned after {consecutive_errors} consecutive read errors"
                            ),
                            WarningKind::ReadError,
                        ));
                        break;
                    }
                }
            }
        }

        entries
    }

    fn process_entry(
        &self,
        parent: &str,
        depth: u32,
        entry: DirEntry,
        out: &mut dyn Write,
        harvest: &mut HarvestState,
    ) {
        let url = join_url(parent, &entry.name);
        let mut record = FileRecord::new(url.clone(), entry.stat);

        if let Some(algorithm) = self.config.checksum_algorithm() {
            match self.storage.checksum(&url, algorithm) {
                Ok(value) => record = record.with_checksum(algorithm, value),
                Err(error) => {
                    warn!(url = %url, %error, "unable to compute checksum");
                    harvest.record_warning(CrawlWarning::from(&error));
                }
            }
        }

        let listing = if self.config.long_format {
            render_long(&entry.name, &entry.stat)
        } else {
            render_short(&entry.name)
        };

        harvest.record_file(record);

        let now = Utc::now();
        emit(
            out,
            ProgressLine {
                size_gigabytes: harvest.size_gigabytes(),
                file_count: harvest.file_count(),
                files_per_second: harvest.files_per_second(now),
                depth,
                listing: &listing,
                checksums: harvest.files().last().and_then(|r| r.checksums.as_ref()),
            },
        );

        if entry.stat.is_dir() && self.config.should_descend(depth) {
            self.crawl_dir(&url, depth + 1, out, harvest);
        }
    }
}

/// Write one progress line. A broken sink is logged, never fatal.
fn emit(out: &mut dyn Write, line: impl Display) {
    if let Err(err) = writeln!(out, "{line}") {
        warn!(%err, "failed to write progress line");
    }
}
