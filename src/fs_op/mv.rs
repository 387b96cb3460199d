use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::error::OpError;
use crate::fs_op::helpers::validate_name;

/// Rename `path` to `new_name` within the same parent directory.
///
/// Returns the new path. Renaming to the current name is a no-op success.
/// Fails with `Conflict` when the destination already exists; the
/// pre-check is required because `fs::rename` would silently overwrite an
/// existing file on Unix; the check-then-rename window against concurrent
/// external mutation remains.
pub fn rename_path(path: impl AsRef<Path>, new_name: &str) -> Result<PathBuf, OpError> {
    let p = path.as_ref();
    validate_name(new_name)?;
    let parent = p
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| {
            OpError::InvalidArgument(format!("path has no parent: {}", p.display()))
        })?;

    let dest = parent.join(new_name);
    if dest == p {
        return Ok(dest);
    }
    if dest.exists() {
        return Err(OpError::Conflict(dest));
    }
    if !p.exists() {
        return Err(OpError::NotFound(p.to_path_buf()));
    }
    fs::rename(p, &dest)?;
    Ok(dest)
}
