//! Listing formatters for progress output.

use chrono::{DateTime, Local, TimeZone};

use gfharvest_core::stat::{S_IRUSR, S_IWUSR, S_IXUSR};
use gfharvest_core::{FileKind, StatRecord};

/// Render mode bits as an `ls`-style 10 character string.
///
/// Each triad is read from the owner bit positions after shifting the mode
/// left by three bits per triad.
pub fn render_mode(mode: u32) -> String {
    let mut chars = ['-'; 10];
    chars[0] = match FileKind::from_mode(mode) {
        FileKind::Directory => 'd',
        FileKind::Symlink => 'l',
        FileKind::Regular => '-',
        FileKind::Other => '?',
    };

    let mut bits = mode;
    for triad in 0..3 {
        if bits & S_IRUSR != 0 {
            chars[1 + triad * 3] = 'r';
        }
        if bits & S_IWUSR != 0 {
            chars[2 + triad * 3] = 'w';
        }
        if bits & S_IXUSR != 0 {
            chars[3 + triad * 3] = 'x';
        }
        bits <<= 3;
    }

    chars.iter().collect()
}

/// Render an entry name on its own.
pub fn render_short(name: &str) -> String {
    name.to_string()
}

/// Render a long listing line using local time.
pub fn render_long(name: &str, stat: &StatRecord) -> String {
    render_long_in(name, stat, &Local)
}

/// Render a long listing line with the modification time in `tz`.
///
/// Columns: mode, link count, uid, gid, size, `%b %d %H:%M` mtime, name.
pub fn render_long_in<Tz>(name: &str, stat: &StatRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mtime = DateTime::from_timestamp(stat.mtime, 0)
        .unwrap_or_default()
        .with_timezone(tz)
        .format("%b %d %H:%M");

    format!(
        "{} {:>3} {:>5} {:>5} {:>10} {} {}",
        render_mode(stat.mode),
        stat.nlink,
        stat.uid,
        stat.gid,
        stat.size,
        mtime,
        name
    )
}
