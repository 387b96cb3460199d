use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};

use crate::fs_op::error::OpError;

/// Buffer size used for file copies.
const COPY_BUFFER: usize = 64 * 1024;

/// Validate a user-supplied entry or vault name.
///
/// Rejects empty/whitespace-only names and names containing a path
/// separator, so a name can never escape the directory it is joined onto.
pub(crate) fn validate_name(name: &str) -> Result<(), OpError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OpError::InvalidArgument("name must not be empty".into()));
    }
    if trimmed.contains(std::path::is_separator) {
        return Err(OpError::InvalidArgument(format!(
            "name must not contain a path separator: `{}`",
            name
        )));
    }
    Ok(())
}

/// Build a unique hidden temp-file name next to `target`.
///
/// The suffix combines pid, a per-thread hash and a global counter so
/// concurrent writers in one process never collide on the temp path.
fn temp_sibling(target: &Path, prefix: &str) -> std::path::PathBuf {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    let suffix = format!(
        "{:x}.{:x}.{:x}",
        std::process::id(),
        hasher.finish(),
        NEXT_ID.fetch_add(1, Ordering::Relaxed),
    );
    let mut tmp = target.to_path_buf();
    tmp.set_file_name(format!("{}.{}", prefix, suffix));
    tmp
}

/// Ensure the parent directory of `p` exists.
pub(crate) fn ensure_parent_exists(p: &Path) -> io::Result<()> {
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `data` to `target` atomically by writing to a temporary file in the
/// same directory and then renaming into place. Readers of `target` never
/// observe a partially-written document. The temp file is removed on error.
pub fn atomic_write(target: &Path, data: &[u8]) -> io::Result<()> {
    let Some(dir) = target.parent() else {
        // No parent to stage the temp file in; write directly.
        return fs::write(target, data);
    };
    fs::create_dir_all(dir)?;
    let tmp = temp_sibling(target, ".tmp_write");

    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if hooks::should_force_rename_fail_in_write() {
        let _ = fs::remove_file(&tmp);
        return Err(io::Error::other("forced rename failure (write)"));
    }
    match fs::rename(&tmp, target) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

/// Copy a single file atomically: copy into a temp file in the destination
/// directory then rename into place.
pub fn atomic_copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    ensure_parent_exists(dst)?;
    let tmp = temp_sibling(dst, ".tmp_copy");

    let mut options = CopyOptions::new();
    options.overwrite = false;
    options.buffer_size = COPY_BUFFER;

    let copied = match fs_extra_copy(src, &tmp, &options) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io::Error::other(e));
        }
    };
    if hooks::should_force_rename_fail_in_copy() {
        let _ = fs::remove_file(&tmp);
        return Err(io::Error::other("forced rename failure (copy)"));
    }
    match fs::rename(&tmp, dst) {
        Ok(()) => Ok(copied),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

/// Test-only hooks used to force rename-failure paths so unit tests can
/// verify temp-file cleanup. Gated behind the non-default `test-helpers`
/// feature; a no-op fallback keeps production builds free of test state.
#[cfg(feature = "test-helpers")]
pub mod hooks {
    use std::sync::atomic::{AtomicBool, Ordering};

    static FORCE_RENAME_FAIL_IN_WRITE: AtomicBool = AtomicBool::new(false);
    static FORCE_RENAME_FAIL_IN_COPY: AtomicBool = AtomicBool::new(false);

    pub fn set_force_rename_fail_in_write(v: bool) {
        FORCE_RENAME_FAIL_IN_WRITE.store(v, Ordering::SeqCst);
    }
    pub fn should_force_rename_fail_in_write() -> bool {
        FORCE_RENAME_FAIL_IN_WRITE.load(Ordering::SeqCst)
    }

    pub fn set_force_rename_fail_in_copy(v: bool) {
        FORCE_RENAME_FAIL_IN_COPY.store(v, Ordering::SeqCst);
    }
    pub fn should_force_rename_fail_in_copy() -> bool {
        FORCE_RENAME_FAIL_IN_COPY.load(Ordering::SeqCst)
    }
}

#[cfg(not(feature = "test-helpers"))]
pub mod hooks {
    pub fn should_force_rename_fail_in_write() -> bool {
        false
    }
    pub fn should_force_rename_fail_in_copy() -> bool {
        false
    }
}
