use chrono::{DateTime, Local};
use std::path::Path;

use crate::fs_op::entry::FileEntry;

/// List the immediate children of `dir`, directories first, then
/// case-insensitively by name.
///
/// A directory that cannot be read (missing, permission denied, not a
/// directory) yields an empty listing rather than an error, so callers
/// cannot distinguish "empty" from "unreadable" and must not rely on that
/// distinction. Entries whose metadata cannot be read are skipped.
pub fn list_dir(dir: impl AsRef<Path>) -> Vec<FileEntry> {
    let dir = dir.as_ref();
    let read = match std::fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            tracing::debug!("unreadable directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut ents = Vec::new();
    for entry in read {
        let Ok(e) = entry else { continue };
        let Ok(meta) = e.metadata() else { continue };
        let modified = meta.modified().ok().map(DateTime::<Local>::from);
        let name = e.file_name().to_string_lossy().into_owned();
        let path = e.path();
        if meta.is_dir() {
            ents.push(FileEntry::directory(name, path, modified));
        } else {
            ents.push(FileEntry::file(name, path, meta.len(), modified));
        }
    }
    // Single sort pass: directories before files, then by lowercased name.
    ents.sort_by_key(|e| (!e.is_dir, e.name.to_lowercase()));
    ents
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn lists_dirs_first_then_files_by_name() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("beta.txt").write_str("b").unwrap();
        temp.child("Alpha.txt").write_str("a").unwrap();
        temp.child("zdir").create_dir_all().unwrap();

        let names: Vec<_> = list_dir(temp.path()).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["zdir", "Alpha.txt", "beta.txt"]);
    }

    #[test]
    fn unreadable_directory_lists_empty() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(list_dir(&missing).is_empty());

        // A file path is also "unreadable as a directory".
        temp.child("plain.txt").write_str("x").unwrap();
        assert!(list_dir(temp.path().join("plain.txt")).is_empty());
    }

    #[test]
    fn entry_fields_reflect_metadata() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("data.bin").write_binary(&[0u8; 16]).unwrap();

        let ents = list_dir(temp.path());
        assert_eq!(ents.len(), 1);
        let e = &ents[0];
        assert_eq!(e.name, "data.bin");
        assert_eq!(e.size, 16);
        assert!(!e.is_dir);
        assert_eq!(e.path, temp.path().join("data.bin"));
    }
}
