use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::dirs;
use crate::fs_op::error::OpError;
use crate::fs_op::helpers::atomic_write;
use crate::vault::RegistryDocument;

/// Loads and persists the vault registry as a single JSON document.
///
/// Persistence is whole-document overwrite, staged through a temp file and
/// renamed into place so readers never observe a truncated document. The
/// store performs no filesystem validation beyond reading and writing;
/// consistency with disk reality is the registry's job.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Open the store at its default per-user location.
    pub fn open() -> io::Result<Self> {
        Ok(ConfigStore {
            path: dirs::default_registry_path()?,
        })
    }

    /// Open the store at an explicit location (tests, `--config` override).
    pub fn with_path(path: PathBuf) -> Self {
        ConfigStore { path }
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry document.
    ///
    /// An absent, unreadable or unparsable document loads as the empty
    /// registry; corruption never propagates to the caller. The next
    /// `save` rewrites the document whole.
    pub fn load(&self) -> RegistryDocument {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return RegistryDocument::default();
            }
            Err(e) => {
                tracing::warn!("could not read {}: {}", self.path.display(), e);
                return RegistryDocument::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "registry document {} is corrupt, treating as empty: {}",
                    self.path.display(),
                    e
                );
                RegistryDocument::default()
            }
        }
    }

    /// Persist the registry document, replacing the previous one atomically.
    pub fn save(&self, doc: &RegistryDocument) -> Result<(), OpError> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(io::Error::other)?;
        atomic_write(&self.path, &bytes)?;
        Ok(())
    }
}
