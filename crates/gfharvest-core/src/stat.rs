//! Per-entry stat metadata.

use serde::{Deserialize, Serialize};

/// Bit mask for the file type portion of a mode.
pub const S_IFMT: u32 = 0o170_000;
/// Directory file type.
pub const S_IFDIR: u32 = 0o040_000;
/// Symbolic link file type.
pub const S_IFLNK: u32 = 0o120_000;
/// Regular file type.
pub const S_IFREG: u32 = 0o100_000;

/// Owner read permission.
pub const S_IRUSR: u32 = 0o400;
/// Owner write permission.
pub const S_IWUSR: u32 = 0o200;
/// Owner execute permission.
pub const S_IXUSR: u32 = 0o100;

/// Type of a storage entry, decoded from its mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// Regular file.
    Regular,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Anything else (devices, sockets, unknown bits).
    Other,
}

impl FileKind {
    /// Decode the file type bits of a mode.
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFDIR => Self::Directory,
            S_IFLNK => Self::Symlink,
            S_IFREG => Self::Regular,
            _ => Self::Other,
        }
    }
}

/// Immutable stat snapshot of one entry as returned by the storage port.
///
/// Field names follow `struct stat` without the `st_` prefix so persisted
/// harvests stay readable by tooling that expects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// File type and permission bits.
    pub mode: u32,
    /// Number of hard links.
    pub nlink: u64,
    /// Owner id.
    pub uid: u32,
    /// Group id.
    pub gid: u32,
    /// Size in bytes.
    pub size: u64,
    /// Last access time, unix seconds.
    #[serde(default)]
    pub atime: i64,
    /// Last modification time, unix seconds.
    pub mtime: i64,
    /// Last status change time, unix seconds.
    #[serde(default)]
    pub ctime: i64,
}

impl StatRecord {
    /// Stat for a regular file with the given permissions and size.
    pub fn file(permissions: u32, size: u64) -> Self {
        Self {
            mode: S_IFREG | (permissions & 0o7777),
            nlink: 1,
            size,
            ..Self::default()
        }
    }

    /// Stat for a directory with the given permissions.
    pub fn directory(permissions: u32) -> Self {
        Self {
            mode: S_IFDIR | (permissions & 0o7777),
            nlink: 2,
            ..Self::default()
        }
    }

    /// Set the modification time.
    pub fn with_mtime(mut self, mtime: i64) -> Self {
        self.mtime = mtime;
        self
    }

    /// Set owner and group ids.
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Decoded file type.
    pub fn kind(&self) -> FileKind {
        FileKind::from_mode(self.mode)
    }

    /// Check if the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind() == FileKind::Directory
    }

    /// Check if the entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.kind() == FileKind::Symlink
    }

    /// Check if the entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind() == FileKind::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mode() {
        assert_eq!(FileKind::from_mode(0o040_755), FileKind::Directory);
        assert_eq!(FileKind::from_mode(0o100_644), FileKind::Regular);
        assert_eq!(FileKind::from_mode(0o120_777), FileKind::Symlink);
        assert_eq!(FileKind::from_mode(0o020_666), FileKind::Other);
        assert_eq!(FileKind::from_mode(0o644), FileKind::Other);
    }

    #[test]
    fn test_constructors() {
        let file = StatRecord::file(0o644, 100);
        assert!(file.is_file());
        assert_eq!(file.size, 100);
        assert_eq!(file.mode, 0o100_644);

        let dir = StatRecord::directory(0o755).with_owner(1000, 100);
        assert!(dir.is_dir());
        assert_eq!(dir.uid, 1000);
        assert_eq!(dir.gid, 100);
    }
}
