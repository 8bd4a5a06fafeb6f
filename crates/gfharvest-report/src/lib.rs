//! Persisted harvest reports for gfharvest.
//!
//! A finished [`HarvestState`] is wrapped in a [`HarvestReport`] together
//! with the root URL and timing, and written as a single JSON document
//! named after the URL and start time.
//!
//! ```rust,ignore
//! use gfharvest_report::{HarvestReport, write_report};
//!
//! let report = HarvestReport::new(url, harvest, chrono::Utc::now());
//! let path = write_report(std::path::Path::new("."), &report)?;
//! ```

mod error;
mod report;
mod tag;

pub use error::ReportError;
pub use report::{HarvestReport, read_report, write_report};
pub use tag::{URL_HASH_LEN, report_file_name, report_tag, sanitize_url, url_hash};

// Re-export core types
pub use gfharvest_core::HarvestState;
