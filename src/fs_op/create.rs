use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::fs_op::error::OpError;
use crate::fs_op::helpers::validate_name;

fn map_exists(e: io::Error, target: PathBuf) -> OpError {
    if e.kind() == io::ErrorKind::AlreadyExists {
        OpError::AlreadyExists(target)
    } else {
        OpError::Io(e)
    }
}

/// Create an empty file named `name` inside `dir`.
///
/// Uses the filesystem's exclusive-create primitive rather than a separate
/// existence check, so a concurrent external create still surfaces as
/// `AlreadyExists` instead of silently truncating.
pub fn create_file(dir: impl AsRef<Path>, name: &str) -> Result<PathBuf, OpError> {
    validate_name(name)?;
    let target = dir.as_ref().join(name);
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .map_err(|e| map_exists(e, target.clone()))?;
    Ok(target)
}

/// Create a directory named `name` inside `dir`.
///
/// Fails with `AlreadyExists` when an entry of that name is present,
/// regardless of its kind. Parents are not created; `dir` must exist.
pub fn create_dir(dir: impl AsRef<Path>, name: &str) -> Result<PathBuf, OpError> {
    validate_name(name)?;
    let target = dir.as_ref().join(name);
    fs::create_dir(&target).map_err(|e| map_exists(e, target.clone()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_file_then_collision() {
        let td = tempdir().unwrap();
        let p = create_file(td.path(), "f.txt").unwrap();
        assert!(p.is_file());
        assert_eq!(fs::read(&p).unwrap(), b"");

        match create_file(td.path(), "f.txt") {
            Err(OpError::AlreadyExists(path)) => assert_eq!(path, p),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }
    }

    #[test]
    fn create_dir_then_collision() {
        let td = tempdir().unwrap();
        let p = create_dir(td.path(), "sub").unwrap();
        assert!(p.is_dir());
        assert!(matches!(
            create_dir(td.path(), "sub"),
            Err(OpError::AlreadyExists(_))
        ));
    }

    #[test]
    fn dir_collides_with_existing_file() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("taken"), b"x").unwrap();
        assert!(matches!(
            create_dir(td.path(), "taken"),
            Err(OpError::AlreadyExists(_))
        ));
    }

    #[test]
    fn invalid_names_rejected() {
        let td = tempdir().unwrap();
        assert!(matches!(
            create_file(td.path(), ""),
            Err(OpError::InvalidArgument(_))
        ));
        assert!(matches!(
            create_dir(td.path(), "a/b"),
            Err(OpError::InvalidArgument(_))
        ));
    }
}
