use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::{dirs, ConfigStore};
use crate::fs_op::error::OpError;
use crate::fs_op::helpers::validate_name;
use crate::fs_op::remove::remove_path;
use crate::vault::{RegistryDocument, Vault};

/// CRUD over vault records, kept consistent with disk reality.
///
/// All operations run their whole read-modify-write cycle under one mutex,
/// so two in-process mutations (a rename racing a delete, say) cannot lose
/// one side's update to the shared document. Multi-process writers are
/// still last-write-wins on the whole document; the atomic save in
/// `ConfigStore` only guarantees no torn reads.
pub struct VaultRegistry {
    store: ConfigStore,
    vault_root: PathBuf,
    lock: Mutex<()>,
}

impl VaultRegistry {
    /// Open the registry at its default per-user locations.
    pub fn open() -> io::Result<Self> {
        Ok(VaultRegistry::new(
            ConfigStore::open()?,
            dirs::default_vault_root()?,
        ))
    }

    /// Build a registry over an explicit store and vault root (tests,
    /// CLI overrides).
    pub fn new(store: ConfigStore, vault_root: PathBuf) -> Self {
        VaultRegistry {
            store,
            vault_root,
            lock: Mutex::new(()),
        }
    }

    /// Directory under which `create` derives default vault paths.
    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    /// List registered vaults, pruning records whose directory vanished.
    ///
    /// The filtered list is persisted back only when the filter removed
    /// something (self-healing read); the pruned list is returned either
    /// way. A failed persist downgrades to a warning so reads keep working.
    pub fn list(&self) -> Vec<Vault> {
        let _guard = self.lock.lock().expect("registry lock poisoned");
        let doc = self.store.load();
        let before = doc.vaults.len();
        let vaults: Vec<Vault> = doc
            .vaults
            .into_iter()
            .filter(|v| {
                let alive = v.path.is_dir();
                if !alive {
                    tracing::info!(
                        "pruning vault `{}`: {} no longer exists",
                        v.name,
                        v.path.display()
                    );
                }
                alive
            })
            .collect();

        if vaults.len() != before {
            let pruned = RegistryDocument {
                vaults: vaults.clone(),
            };
            if let Err(e) = self.store.save(&pruned) {
                tracing::warn!("could not persist pruned registry: {}", e);
            }
        }
        vaults
    }

    /// Create a vault named `name` under the vault root.
    ///
    /// The default path is `<vault_root>/<name>`. Fails with
    /// `AlreadyExists` when that path is already registered or already
    /// present on disk; otherwise the directory is created exclusively and
    /// the record appended and persisted.
    pub fn create(&self, name: &str) -> Result<Vault, OpError> {
        validate_name(name)?;
        let name = name.trim();
        let _guard = self.lock.lock().expect("registry lock poisoned");

        let mut doc = self.store.load();
        let path = self.vault_root.join(name);
        if doc.vaults.iter().any(|v| v.path == path) {
            return Err(OpError::AlreadyExists(path));
        }

        fs::create_dir_all(&self.vault_root)?;
        fs::create_dir(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                OpError::AlreadyExists(path.clone())
            } else {
                OpError::Io(e)
            }
        })?;

        let vault = Vault {
            name: name.to_string(),
            path: path.clone(),
        };
        doc.vaults.push(vault.clone());
        if let Err(e) = self.store.save(&doc) {
            // Do not leave an unregistered directory behind.
            let _ = fs::remove_dir(&path);
            return Err(e);
        }
        tracing::info!("created vault `{}` at {}", vault.name, path.display());
        Ok(vault)
    }

    /// Delete the vault at `path`: drop the record, then the directory.
    ///
    /// The registry is persisted before the tree is removed, so a crash
    /// mid-deletion never leaves a record pointing at a half-deleted vault.
    /// Deleting an unregistered or already-missing path is success
    /// (idempotent, force semantics).
    pub fn delete(&self, path: &Path) -> Result<(), OpError> {
        let _guard = self.lock.lock().expect("registry lock poisoned");

        let mut doc = self.store.load();
        let before = doc.vaults.len();
        doc.vaults.retain(|v| v.path != path);
        if doc.vaults.len() != before {
            self.store.save(&doc)?;
        }

        remove_path(path)?;
        tracing::info!("deleted vault at {}", path.display());
        Ok(())
    }

    /// Rename the vault at `old_path` to `new_name`, moving its directory
    /// to the sibling path and updating the record. Returns the new path.
    ///
    /// A rename that resolves to the current path is a no-op success. When
    /// the disk rename succeeds but the persist fails, registry and disk
    /// disagree until the next self-healing `list` prunes the stale record.
    pub fn rename(&self, old_path: &Path, new_name: &str) -> Result<PathBuf, OpError> {
        validate_name(new_name)?;
        let new_name = new_name.trim();
        let _guard = self.lock.lock().expect("registry lock poisoned");

        let mut doc = self.store.load();
        let index = doc
            .vaults
            .iter()
            .position(|v| v.path == old_path)
            .ok_or_else(|| OpError::NotFound(old_path.to_path_buf()))?;

        let parent = old_path.parent().ok_or_else(|| {
            OpError::InvalidArgument(format!("vault path has no parent: {}", old_path.display()))
        })?;
        let new_path = parent.join(new_name);
        if new_path == old_path {
            return Ok(new_path);
        }
        if new_path.exists() {
            return Err(OpError::Conflict(new_path));
        }

        // A record whose directory already vanished just gets its entry
        // updated; the next list() would have pruned it anyway.
        if old_path.exists() {
            fs::rename(old_path, &new_path)?;
        }

        doc.vaults[index].name = new_name.to_string();
        doc.vaults[index].path = new_path.clone();
        self.store.save(&doc)?;
        tracing::info!(
            "renamed vault {} -> {}",
            old_path.display(),
            new_path.display()
        );
        Ok(new_path)
    }
}
