use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod registry;

pub use registry::VaultRegistry;

/// A user-registered root directory tracked by name and path.
///
/// The path is the vault's identity: it is unique across the registry and
/// is the key every lookup, rename and delete goes through. No generated
/// id is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub name: String,
    pub path: PathBuf,
}

/// The single persisted structure listing all vaults.
///
/// Read-modify-written as a whole; there are no partial updates. A document
/// without a `vaults` field deserializes as empty (the pre-versioning
/// shape, treated as version 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub vaults: Vec<Vault>,
}
