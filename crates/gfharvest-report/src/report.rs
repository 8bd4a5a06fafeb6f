//! Persisted harvest record.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use gfharvest_core::HarvestState;

use crate::error::ReportError;
use crate::tag::{report_file_name, report_tag};

/// Durable record of one finished crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestReport {
    /// The finalized harvest.
    pub harvest: HarvestState,
    /// Root URL that was crawled.
    pub url: String,
    /// Crawl start, unix seconds.
    pub start_timestamp: f64,
    /// Wall-clock duration of the crawl in seconds.
    #[serde(alias = "collected_in")]
    pub elapsed_seconds: f64,
}

impl HarvestReport {
    /// Wrap a finished harvest.
    pub fn new(url: impl Into<String>, harvest: HarvestState, finished_at: DateTime<Utc>) -> Self {
        let start = harvest.start_time();
        let elapsed_seconds = (finished_at - start)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            start_timestamp: start.timestamp_micros() as f64 / 1e6,
            elapsed_seconds,
            url: url.into(),
            harvest,
        }
    }

    /// Crawl start time.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.harvest.start_time()
    }

    /// Identifier used to name the report file.
    pub fn tag(&self) -> String {
        report_tag(&self.url, &self.start_time().with_timezone(&Local))
    }

    /// File name the report is written under.
    pub fn file_name(&self) -> String {
        report_file_name(&self.tag())
    }
}

/// Write `report` as JSON into `dir`, returning the file path.
pub fn write_report(dir: &Path, report: &HarvestReport) -> Result<PathBuf, ReportError> {
    let path = dir.join(report.file_name());
    let file = File::create(&path).map_err(|e| ReportError::io(&path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, report)?;
    writer.flush().map_err(|e| ReportError::io(&path, e))?;

    info!(
        path = %path.display(),
        files = report.harvest.file_count(),
        "wrote harvest report"
    );
    Ok(path)
}

/// Read a report previously written by [`write_report`].
pub fn read_report(path: &Path) -> Result<HarvestReport, ReportError> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn test_elapsed_and_start() {
        let start = Utc::now();
        let harvest = HarvestState::started_at(start);
        let report = HarvestReport::new("/a", harvest, start + TimeDelta::milliseconds(2500));

        assert!((report.elapsed_seconds - 2.5).abs() < 1e-9);
        assert!((report.start_timestamp - start.timestamp_micros() as f64 / 1e6).abs() < 1e-6);
        assert_eq!(report.start_time(), start);
    }

    #[test]
    fn test_clock_skew_clamps_elapsed() {
        let start = Utc::now();
        let report = HarvestReport::new("/a", HarvestState::started_at(start), start - TimeDelta::seconds(1));
        assert_eq!(report.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_file_name_shape() {
        let report = HarvestReport::new("/pnfs/x", HarvestState::new(), Utc::now());
        let name = report.file_name();
        assert!(name.starts_with("dcache_files__pnfs_x_"));
        assert!(name.ends_with(".json"));
    }
}
