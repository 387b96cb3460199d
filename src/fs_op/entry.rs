use chrono::{DateTime, Local};
use std::path::PathBuf;

/// A single directory listing entry.
///
/// Produced fresh on every listing call and never cached or persisted.
/// `size` and `modified` are carried for display purposes; `modified` is
/// `None` when the platform cannot report a modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Base name of the entry.
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// True when the entry is a directory.
    pub is_dir: bool,
    /// File size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time, if available.
    pub modified: Option<DateTime<Local>>,
}

impl FileEntry {
    /// Construct a directory entry.
    pub fn directory(name: String, path: PathBuf, modified: Option<DateTime<Local>>) -> Self {
        FileEntry {
            name,
            path,
            is_dir: true,
            size: 0,
            modified,
        }
    }

    /// Construct a regular-file entry.
    pub fn file(name: String, path: PathBuf, size: u64, modified: Option<DateTime<Local>>) -> Self {
        FileEntry {
            name,
            path,
            is_dir: false,
            size,
            modified,
        }
    }
}
