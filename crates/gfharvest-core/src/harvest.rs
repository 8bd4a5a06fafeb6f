//! The mutable aggregate threaded through a crawl.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CrawlWarning;
use crate::record::{DirectoryError, FileRecord};

/// Elapsed time used in place of zero when computing throughput.
pub const MIN_ELAPSED_SECS: f64 = 1e-9;

const BYTES_PER_GIGABYTE: f64 = 1024.0 * 1024.0 * 1024.0;

/// Accumulated result of one crawl.
///
/// Created once by the caller of the top-level crawl and passed down by
/// mutable reference to every recursive step. `files`, `errors` and
/// `warnings` are append-only, and `size_so_far` always equals the sum of
/// the sizes of `files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestState {
    size_so_far: u64,
    files: Vec<FileRecord>,
    errors: Vec<DirectoryError>,
    #[serde(default)]
    warnings: Vec<CrawlWarning>,
    start_time: DateTime<Utc>,
}

impl HarvestState {
    /// Create an empty harvest starting now.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Create an empty harvest with an explicit start time.
    pub fn started_at(start_time: DateTime<Utc>) -> Self {
        Self {
            size_so_far: 0,
            files: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            start_time,
        }
    }

    /// Append a file record and add its size to the running total.
    pub fn record_file(&mut self, record: FileRecord) {
        self.size_so_far = self.size_so_far.saturating_add(record.stat.size);
        self.files.push(record);
    }

    /// Append a ledger entry for a directory that was opened.
    pub fn record_listing(&mut self, url: impl Into<String>) {
        self.errors.push(DirectoryError::new(url));
    }

    /// Append a non-fatal failure.
    pub fn record_warning(&mut self, warning: CrawlWarning) {
        self.warnings.push(warning);
    }

    /// Total bytes over all harvested records.
    pub fn size_so_far(&self) -> u64 {
        self.size_so_far
    }

    /// Total size expressed in GiB.
    pub fn size_gigabytes(&self) -> f64 {
        self.size_so_far as f64 / BYTES_PER_GIGABYTE
    }

    /// Harvested records, in crawl order.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Number of harvested records.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Directory ledger, in crawl order.
    pub fn errors(&self) -> &[DirectoryError] {
        &self.errors
    }

    /// Non-fatal failures, in crawl order.
    pub fn warnings(&self) -> &[CrawlWarning] {
        &self.warnings
    }

    /// Check if any failures were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// When the crawl started.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Seconds elapsed between the start and `now`, never below
    /// [`MIN_ELAPSED_SECS`].
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = (now - self.start_time)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        elapsed.max(MIN_ELAPSED_SECS)
    }

    /// Records harvested per second as of `now`.
    pub fn files_per_second(&self, now: DateTime<Utc>) -> f64 {
        self.files.len() as f64 / self.elapsed_secs(now)
    }

    /// Check that the running total matches the record list.
    pub fn is_consistent(&self) -> bool {
        self.files
            .iter()
            .try_fold(0u64, |acc, f| acc.checked_add(f.stat.size))
            .is_some_and(|sum| sum == self.size_so_far)
    }
}

impl Default for HarvestState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::stat::StatRecord;

    #[test]
    fn test_harvest_default() {
        let harvest = HarvestState::new();
        assert_eq!(harvest.size_so_far(), 0);
        assert_eq!(harvest.file_count(), 0);
        assert!(harvest.errors().is_empty());
        assert!(harvest.is_consistent());
    }

    #[test]
    fn test_record_file_tracks_size() {
        let mut harvest = HarvestState::new();
        harvest.record_file(FileRecord::new("/a/f1", StatRecord::file(0o644, 100)));
        harvest.record_file(FileRecord::new("/a/f2", StatRecord::file(0o644, 50)));

        assert_eq!(harvest.size_so_far(), 150);
        assert_eq!(harvest.file_count(), 2);
        assert_eq!(harvest.files()[0].url, "/a/f1");
        assert!(harvest.is_consistent());
    }

    #[test]
    fn test_files_per_second() {
        let start = Utc::now();
        let mut harvest = HarvestState::started_at(start);
        for i in 0..10 {
            harvest.record_file(FileRecord::new(format!("/a/{i}"), StatRecord::default()));
        }

        let rate = harvest.files_per_second(start + TimeDelta::seconds(2));
        assert!((rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_guarded() {
        let start = Utc::now();
        let mut harvest = HarvestState::started_at(start);
        harvest.record_file(FileRecord::new("/a/f1", StatRecord::default()));

        let rate = harvest.files_per_second(start);
        assert!(rate.is_finite());
        assert!(rate > 0.0);

        // A clock that went backwards is treated the same way.
        assert_eq!(harvest.elapsed_secs(start - TimeDelta::seconds(5)), MIN_ELAPSED_SECS);
    }

    #[test]
    fn test_size_gigabytes() {
        let mut harvest = HarvestState::new();
        harvest.record_file(FileRecord::new("/big", StatRecord::file(0o644, 3 * 1024 * 1024 * 1024)));
        assert!((harvest.size_gigabytes() - 3.0).abs() < 1e-12);
    }
}
