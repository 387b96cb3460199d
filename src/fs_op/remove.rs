use std::fs;
use std::path::Path;

use crate::fs_op::error::OpError;

/// Remove a file or directory at `path`.
///
/// Directories are removed recursively. A path that does not exist is
/// success, not an error, so callers can attempt removal without checking
/// for existence first (force semantics).
pub fn remove_path(path: impl AsRef<Path>) -> Result<(), OpError> {
    let p = path.as_ref();

    // symlink_metadata so a dangling symlink is still removable.
    let meta = match fs::symlink_metadata(p) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(OpError::Io(e)),
    };

    if meta.is_dir() {
        fs::remove_dir_all(p)?;
    } else {
        fs::remove_file(p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_file_and_nonempty_dir() {
        let td = tempdir().expect("tempdir");
        let dir = td.path().join("sub");
        fs::create_dir_all(dir.join("nested")).expect("mkdirs");
        let f = dir.join("f.txt");
        fs::write(&f, b"x").expect("write");

        remove_path(&f).expect("remove file");
        assert!(!f.exists());

        remove_path(&dir).expect("remove dir");
        assert!(!dir.exists());
    }

    #[test]
    fn removing_missing_path_is_success() {
        let td = tempdir().expect("tempdir");
        let p = td.path().join("does_not_exist");
        assert!(remove_path(&p).is_ok());
        // Idempotent: a second call still succeeds.
        assert!(remove_path(&p).is_ok());
    }
}
