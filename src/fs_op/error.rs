use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by filesystem operation helpers and the vault registry.
///
/// Every public operation in this crate reports failure through this type so
/// callers always receive an error kind plus a message naming the offending
/// path. Raw `io::Error` values are wrapped, never re-thrown bare.
#[derive(Error, Debug)]
pub enum OpError {
    /// The operation requires a vault/path that does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A create collided with an existing filesystem entry or registry record.
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A rename destination is occupied.
    #[error("destination occupied: {}", .0.display())]
    Conflict(PathBuf),

    /// Missing or malformed input (empty names, names with separators, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Wrapper for underlying IO errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl OpError {
    /// True when the error reports a name collision, either directly or
    /// through a wrapped IO error with `AlreadyExists` kind.
    pub fn is_already_exists(&self) -> bool {
        match self {
            OpError::AlreadyExists(_) => true,
            OpError::Io(e) => e.kind() == io::ErrorKind::AlreadyExists,
            _ => false,
        }
    }
}
