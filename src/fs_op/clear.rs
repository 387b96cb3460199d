use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::fs_op::error::OpError;
use crate::fs_op::remove::remove_path;

/// Category folders used by [`sort_by_extension`], keyed by lowercased file
/// extension. Files with no match land in `Others`.
static CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        ("Images", &["jpg", "jpeg", "png", "gif", "svg", "webp"]),
        (
            "Documents",
            &["pdf", "doc", "docx", "txt", "xls", "xlsx", "ppt", "pptx"],
        ),
        ("Videos", &["mp4", "mkv", "mov", "avi", "webm"]),
        ("Audio", &["mp3", "wav", "flac", "ogg"]),
        ("Archives", &["zip", "rar", "7z", "tar", "gz"]),
        ("Installers", &["exe", "msi", "dmg", "iso", "apk"]),
        (
            "Code",
            &[
                "js", "jsx", "ts", "tsx", "html", "css", "json", "py", "java", "c", "cpp",
                "php", "sql",
            ],
        ),
    ];
    let mut map = HashMap::new();
    for (category, exts) in table {
        for ext in *exts {
            map.insert(*ext, *category);
        }
    }
    map
});

const FALLBACK_CATEGORY: &str = "Others";

/// Snapshot the immediate children of `dir` before any of them is mutated,
/// so moves/removals below cannot disturb the iteration. Unreadable
/// individual entries are logged and dropped.
fn read_children(dir: &Path) -> Result<Vec<fs::DirEntry>, OpError> {
    let read = fs::read_dir(dir).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            OpError::NotFound(dir.to_path_buf())
        } else {
            OpError::Io(e)
        }
    })?;
    let mut children = Vec::new();
    for entry in read {
        match entry {
            Ok(e) => children.push(e),
            Err(e) => tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    Ok(children)
}

/// Delete every immediate child of `dir` (recursively per child) and return
/// the number removed.
///
/// Children are processed sequentially; a child that cannot be removed is
/// logged and skipped rather than aborting the rest, and is not counted.
/// An empty directory yields `Ok(0)`.
pub fn clear_directory(dir: impl AsRef<Path>) -> Result<usize, OpError> {
    let dir = dir.as_ref();
    let mut removed = 0usize;
    for entry in read_children(dir)? {
        let child = entry.path();
        match remove_path(&child) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("could not remove {}: {}", child.display(), e),
        }
    }
    Ok(removed)
}

/// Sort the regular files of `dir` into category subfolders by extension
/// and return the number moved.
///
/// Dotfiles and directories are skipped. The category folder is created on
/// demand. A name collision inside the category folder is resolved by
/// suffixing the file stem with the current Unix timestamp in milliseconds.
/// Per-file failures are logged and skipped.
pub fn sort_by_extension(dir: impl AsRef<Path>) -> Result<usize, OpError> {
    let dir = dir.as_ref();
    let mut moved = 0usize;
    for entry in read_children(dir)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let child = entry.path();
        if !child.is_file() {
            continue;
        }

        match file_into_category(dir, &child, &name) {
            Ok(true) => moved += 1,
            Ok(false) => {}
            Err(e) => tracing::warn!("could not sort {}: {}", child.display(), e),
        }
    }
    Ok(moved)
}

/// Move one file into its category folder. Returns whether it was moved.
fn file_into_category(dir: &Path, child: &Path, name: &str) -> Result<bool, OpError> {
    let ext = child
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    let category = ext
        .as_deref()
        .and_then(|e| CATEGORIES.get(e).copied())
        .unwrap_or(FALLBACK_CATEGORY);

    let target_dir = dir.join(category);
    if !target_dir.exists() {
        fs::create_dir(&target_dir)?;
    }

    let mut target = target_dir.join(name);
    if target == child {
        return Ok(false);
    }
    if target.exists() {
        target = target_dir.join(collision_name(child, name));
    }
    fs::rename(child, &target)?;
    tracing::debug!("sorted {} -> {}", child.display(), target.display());
    Ok(true)
}

/// Timestamp-suffixed replacement name for a colliding file.
fn collision_name(child: &Path, name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let stem = child
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    match child.extension() {
        Some(ext) => format!("{}_{}.{}", stem, millis, ext.to_string_lossy()),
        None => format!("{}_{}", stem, millis),
    }
}
