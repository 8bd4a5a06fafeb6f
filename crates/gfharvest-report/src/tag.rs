//! Report identifiers derived from the root URL.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};
use regex::Regex;

/// Runs of characters that are not allowed in a tag.
static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid tag regex"));

/// Number of hex characters of the URL hash kept in a tag.
pub const URL_HASH_LEN: usize = 8;

/// Lower-case `url` and collapse every run of non-alphanumerics into `_`.
pub fn sanitize_url(url: &str) -> String {
    UNSAFE_RUN.replace_all(&url.to_lowercase(), "_").into_owned()
}

/// Short content hash of the URL.
pub fn url_hash(url: &str) -> String {
    blake3::hash(url.as_bytes()).to_hex().as_str()[..URL_HASH_LEN].to_string()
}

/// Stable identifier for a crawl: `<sanitized url>_<hash>_<YYYYmmdd_HHMMSS>`.
pub fn report_tag<Tz>(url: &str, start: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}",
        sanitize_url(url),
        url_hash(url),
        start.format("%Y%m%d_%H%M%S")
    )
}

/// File name of the persisted report for a tag.
pub fn report_file_name(tag: &str) -> String {
    format!("dcache_files_{tag}.json")
}
