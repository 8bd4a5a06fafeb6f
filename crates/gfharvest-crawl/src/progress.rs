//! Progress stream lines.
//!
//! One line is written per processed entry, plus one per listing failure.
//! The stream is meant for people watching a crawl, not for parsing.

use std::fmt;

use itertools::Itertools;

use gfharvest_core::{Checksums, StorageError};

/// Indentation for an entry at the given depth.
pub fn indent(depth: u32) -> String {
    "  ".repeat(depth as usize)
}

/// Progress line emitted after an entry has been harvested.
#[derive(Debug, Clone)]
pub struct ProgressLine<'a> {
    /// Cumulative size in GiB.
    pub size_gigabytes: f64,
    /// Records harvested so far.
    pub file_count: usize,
    /// Current throughput.
    pub files_per_second: f64,
    /// Depth of the directory holding the entry.
    pub depth: u32,
    /// Short or long listing of the entry.
    pub listing: &'a str,
    /// Checksums attached to the entry's record.
    pub checksums: Option<&'a Checksums>,
}

impl fmt::Display for ProgressLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} Gb in {} files {:.1} fps {} {} {}",
            self.size_gigabytes,
            self.file_count,
            self.files_per_second,
            indent(self.depth),
            self.listing,
            ChecksumSummary(self.checksums)
        )
    }
}

/// Renders a checksum mapping, or `no checksums` when there is none.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumSummary<'a>(pub Option<&'a Checksums>);

impl fmt::Display for ChecksumSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(sums) if !sums.is_empty() => write!(
                f,
                "{{{}}}",
                sums.iter().map(|(alg, value)| format!("{alg}: {value}")).join(", ")
            ),
            _ => f.write_str("no checksums"),
        }
    }
}

/// Progress line for a directory that failed to open or a failed entry read.
#[derive(Debug, Clone, Copy)]
pub struct FailureLine<'a> {
    /// Depth of the directory.
    pub depth: u32,
    /// Directory URL.
    pub url: &'a str,
    /// The failure.
    pub error: &'a StorageError,
}

impl fmt::Display for FailureLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}: {}", indent(self.depth), self.url, self.error)
    }
}
