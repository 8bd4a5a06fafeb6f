//! Local filesystem storage port.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs::{self, File, Metadata};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use compact_str::CompactString;
use sha2::{Digest, Sha256};

use gfharvest_core::{
    DirEntry, DirectoryListing, StatRecord, StorageAccess, StorageError, WarningKind, join_url,
};

/// Checksum algorithms supported by [`LocalStorage`].
pub const LOCAL_ALGORITHMS: &[&str] = &["BLAKE3", "SHA256"];

/// Storage port backed by `std::fs`.
///
/// Accepts plain paths and `file://` URLs. Symbolic links are reported as
/// links, never followed.
///
/// Names that are not valid UTF-8 are listed lossily. The child URL built
/// from such a name is remembered together with the real path, so the
/// entry can still be opened and checksummed.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    aliases: RefCell<HashMap<String, PathBuf>>,
}

impl LocalStorage {
    /// Create a new local storage port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filesystem path behind a URL handed out by this port.
    fn resolve(&self, url: &str) -> PathBuf {
        self.aliases
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| local_path(url).to_path_buf())
    }

    /// Remember paths whose URL no longer spells them out.
    fn record_aliases<'a>(&self, url: &str, paths: impl IntoIterator<Item = &'a PathBuf>) {
        let mut aliases = self.aliases.borrow_mut();
        for path in paths {
            let Some(name) = path.file_name() else {
                continue;
            };
            let child_url = join_url(url, &name.to_string_lossy());
            if local_path(&child_url) != path.as_path() {
                aliases.insert(child_url, path.clone());
            }
        }
    }
}

/// Strip a `file://` scheme, leaving a filesystem path.
pub fn local_path(url: &str) -> &Path {
    Path::new(url.strip_prefix("file://").unwrap_or(url))
}

/// Open directory on the local filesystem.
///
/// Entries are read eagerly and sorted by name so listings are stable.
#[derive(Debug)]
pub struct LocalListing {
    url: String,
    pending: VecDeque<io::Result<PathBuf>>,
}

impl DirectoryListing for LocalListing {
    fn next_entry(&mut self) -> Result<Option<DirEntry>, StorageError> {
        let Some(next) = self.pending.pop_front() else {
            return Ok(None);
        };

        let path = next.map_err(|e| StorageError::from_io(WarningKind::ReadError, &self.url, &e))?;
        let metadata = fs::symlink_metadata(&path)
            .map_err(|e| StorageError::from_io(WarningKind::ReadError, &self.url, &e))?;
        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();

        Ok(Some(DirEntry::new(name, stat_from_metadata(&metadata))))
    }
}

impl StorageAccess for LocalStorage {
    type Directory = LocalListing;

    fn open_directory(&self, url: &str) -> Result<LocalListing, StorageError> {
        let reader = fs::read_dir(self.resolve(url))
            .map_err(|e| StorageError::from_io(WarningKind::ListError, url, &e))?;

        let (mut paths, errors): (Vec<_>, Vec<_>) = reader
            .map(|entry| entry.map(|e| e.path()))
            .partition(|entry| entry.is_ok());
        paths.sort_by(|a, b| match (a, b) {
            (Ok(a), Ok(b)) => a.file_name().cmp(&b.file_name()),
            _ => std::cmp::Ordering::Equal,
        });
        self.record_aliases(url, paths.iter().flatten());

        Ok(LocalListing {
            url: url.to_string(),
            pending: errors.into_iter().chain(paths).collect(),
        })
    }

    fn checksum(&self, url: &str, algorithm: &str) -> Result<String, StorageError> {
        let path = self.resolve(url);
        let io_err = |e: io::Error| StorageError::checksum(url, algorithm, e);

        let mut reader = BufReader::new(File::open(&path).map_err(io_err)?);

        if algorithm.eq_ignore_ascii_case("BLAKE3") {
            let mut hasher = blake3::Hasher::new();
            io::copy(&mut reader, &mut hasher).map_err(io_err)?;
            Ok(hasher.finalize().to_hex().to_string())
        } else if algorithm.eq_ignore_ascii_case("SHA256") {
            let mut hasher = Sha256::new();
            io::copy(&mut reader, &mut hasher).map_err(io_err)?;
            Ok(format!("{:x}", hasher.finalize()))
        } else {
            Err(StorageError::checksum(
                url,
                algorithm,
                format!(
                    "unsupported algorithm (supported: {})",
                    LOCAL_ALGORITHMS.join(", ")
                ),
            ))
        }
    }
}

/// Convert filesystem metadata into a stat snapshot.
#[cfg(unix)]
pub fn stat_from_metadata(metadata: &Metadata) -> StatRecord {
    StatRecord {
        mode: metadata.mode(),
        nlink: metadata.nlink(),
        uid: metadata.uid(),
        gid: metadata.gid(),
        size: metadata.size(),
        atime: metadata.atime(),
        mtime: metadata.mtime(),
        ctime: metadata.ctime(),
    }
}

#[cfg(not(unix))]
pub fn stat_from_metadata(metadata: &Metadata) -> StatRecord {
    use gfharvest_core::stat::{S_IFDIR, S_IFLNK, S_IFREG};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn secs(time: io::Result<SystemTime>) -> i64 {
        time.ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        S_IFDIR
    } else if file_type.is_symlink() {
        S_IFLNK
    } else if file_type.is_file() {
        S_IFREG
    } else {
        0
    };
    let permissions = if metadata.permissions().readonly() { 0o444 } else { 0o644 };

    StatRecord {
        mode: kind | permissions,
        nlink: 1,
        uid: 0,
        gid: 0,
        size: metadata.len(),
        atime: secs(metadata.accessed()),
        mtime: secs(metadata.modified()),
        ctime: secs(metadata.created()),
    }
}
