use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::error::OpError;
use crate::fs_op::helpers::atomic_copy_file;
use crate::fs_op::stat::PathType;

/// Recursively copy `src` to `dest`.
///
/// A file source is copied byte-for-byte (via the atomic file-copy helper,
/// so readers never observe a half-written destination file). A directory
/// source is mirrored with an explicit work-list of `(src, dest)` pairs
/// instead of call-stack recursion, so arbitrarily deep trees cannot
/// overflow the stack. Directories are created before the files inside
/// them. Pre-existing unrelated entries under `dest` are left alone.
///
/// The operation is not transactional: a failure partway through leaves a
/// partially-copied tree behind.
pub fn copy_tree(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<(), OpError> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    match PathType::of(src) {
        PathType::NotFound => Err(OpError::NotFound(src.to_path_buf())),
        PathType::File => {
            atomic_copy_file(src, dest)?;
            Ok(())
        }
        PathType::Directory => {
            let mut pending: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dest.to_path_buf())];
            while let Some((from, to)) = pending.pop() {
                if !to.exists() {
                    fs::create_dir_all(&to)?;
                }
                for entry in fs::read_dir(&from)? {
                    let entry = entry?;
                    let child_src = entry.path();
                    let child_dest = to.join(entry.file_name());
                    let ft = entry.file_type()?;
                    if ft.is_dir() {
                        pending.push((child_src, child_dest));
                    } else if ft.is_file() {
                        atomic_copy_file(&child_src, &child_dest)?;
                    } else {
                        tracing::debug!("skipping non-regular entry {}", child_src.display());
                    }
                }
            }
            Ok(())
        }
        PathType::Other => Err(OpError::InvalidArgument(format!(
            "source is neither a file nor a directory: {}",
            src.display()
        ))),
    }
}

/// Copy each of `sources` into `target_dir` under its own base name.
///
/// Fails fast with `NotFound` when `target_dir` is not an existing
/// directory. Sources are processed sequentially and the first failure
/// aborts the remaining ones; on success the returned count equals the
/// number of sources. Already-copied items are left in place after an
/// abort (no rollback).
pub fn bulk_copy_into(
    sources: &[PathBuf],
    target_dir: impl AsRef<Path>,
) -> Result<usize, OpError> {
    let target_dir = target_dir.as_ref();
    if !target_dir.is_dir() {
        return Err(OpError::NotFound(target_dir.to_path_buf()));
    }

    let mut copied = 0usize;
    for src in sources {
        let name = src.file_name().ok_or_else(|| {
            OpError::InvalidArgument(format!("source has no base name: {}", src.display()))
        })?;
        let dest = target_dir.join(name);
        copy_tree(src, &dest)?;
        tracing::debug!("copied {} -> {}", src.display(), dest.display());
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn copies_nested_tree_parent_before_children() {
        let src = assert_fs::TempDir::new().unwrap();
        src.child("a.txt").write_str("alpha").unwrap();
        src.child("sub/b.txt").write_str("beta").unwrap();
        src.child("sub/deeper/c.txt").write_str("gamma").unwrap();

        let out = assert_fs::TempDir::new().unwrap();
        let dest = out.path().join("mirror");
        copy_tree(src.path(), &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "beta");
        assert_eq!(
            fs::read_to_string(dest.join("sub/deeper/c.txt")).unwrap(),
            "gamma"
        );
    }

    #[test]
    fn copy_into_existing_dest_keeps_unrelated_entries() {
        let src = assert_fs::TempDir::new().unwrap();
        src.child("new.txt").write_str("new").unwrap();

        let dest = assert_fs::TempDir::new().unwrap();
        dest.child("unrelated.txt").write_str("keep me").unwrap();

        copy_tree(src.path(), dest.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("unrelated.txt")).unwrap(),
            "keep me"
        );
        assert_eq!(fs::read_to_string(dest.path().join("new.txt")).unwrap(), "new");
    }

    #[test]
    fn missing_source_is_not_found() {
        let td = assert_fs::TempDir::new().unwrap();
        let res = copy_tree(td.path().join("ghost"), td.path().join("out"));
        assert!(matches!(res, Err(OpError::NotFound(_))));
    }

    #[test]
    fn bulk_copy_requires_existing_target() {
        let src = assert_fs::TempDir::new().unwrap();
        src.child("a.txt").write_str("a").unwrap();
        let sources = vec![src.path().join("a.txt")];

        let res = bulk_copy_into(&sources, src.path().join("no_such_dir"));
        assert!(matches!(res, Err(OpError::NotFound(_))));
    }

    #[test]
    fn bulk_copy_counts_top_level_items() {
        let src = assert_fs::TempDir::new().unwrap();
        src.child("one.txt").write_str("1").unwrap();
        src.child("pack/inner.txt").write_str("2").unwrap();

        let target = assert_fs::TempDir::new().unwrap();
        let sources = vec![src.path().join("one.txt"), src.path().join("pack")];
        let count = bulk_copy_into(&sources, target.path()).unwrap();

        assert_eq!(count, 2);
        assert!(target.path().join("one.txt").is_file());
        assert!(target.path().join("pack/inner.txt").is_file());
    }

    #[test]
    fn bulk_copy_aborts_on_first_failure() {
        let src = assert_fs::TempDir::new().unwrap();
        src.child("last.txt").write_str("x").unwrap();

        let target = assert_fs::TempDir::new().unwrap();
        // First source is missing, so nothing afterwards is copied.
        let sources = vec![src.path().join("ghost.txt"), src.path().join("last.txt")];
        let res = bulk_copy_into(&sources, target.path());

        assert!(matches!(res, Err(OpError::NotFound(_))));
        assert!(!target.path().join("last.txt").exists());
    }
}
