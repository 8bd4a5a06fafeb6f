//! Crawl configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default recursion limit, matching the command-line default.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

/// Immutable per-run configuration for a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CrawlConfig {
    /// Render progress entries as long listings.
    #[builder(default = "false")]
    #[serde(default)]
    pub long_format: bool,

    /// Deepest level whose subdirectories are still descended into.
    ///
    /// The root is level 0. A directory found at level `d` is entered
    /// when `d <= max_depth`.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Checksum algorithm to request for every entry (None = disabled).
    #[builder(default, setter(custom))]
    #[serde(default)]
    pub checksum_algorithm: Option<String>,

    /// Give up on a directory after this many read errors in a row
    /// (None = keep reading until the listing ends).
    #[builder(default)]
    #[serde(default)]
    pub max_consecutive_read_errors: Option<u32>,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

/// Treat blank names and the literal `none` as "no checksum".
fn normalize_algorithm(algorithm: Option<String>) -> Option<String> {
    algorithm
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("none"))
}

impl CrawlConfigBuilder {
    /// Set the checksum algorithm. `None`, `""` and `"none"` disable checksums.
    pub fn checksum_algorithm<S: Into<String>>(&mut self, algorithm: Option<S>) -> &mut Self {
        self.checksum_algorithm = Some(normalize_algorithm(algorithm.map(Into::into)));
        self
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(Some(0)) = self.max_consecutive_read_errors {
            return Err("max_consecutive_read_errors must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CrawlConfig {
    /// Create a new crawl config builder.
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }

    /// Create a config with short listings, the default depth and no checksums.
    pub fn new() -> Self {
        Self {
            long_format: false,
            max_depth: DEFAULT_MAX_DEPTH,
            checksum_algorithm: None,
            max_consecutive_read_errors: None,
        }
    }

    /// The algorithm to request, if checksums are enabled.
    pub fn checksum_algorithm(&self) -> Option<&str> {
        self.checksum_algorithm
            .as_deref()
            .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("none"))
    }

    /// Check whether the crawl should call the checksum capability at all.
    pub fn checksums_enabled(&self) -> bool {
        self.checksum_algorithm().is_some()
    }

    /// Check whether a directory found at `depth` should be descended into.
    pub fn should_descend(&self, depth: u32) -> bool {
        depth <= self.max_depth
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new()
    }
}
