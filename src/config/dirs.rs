use std::io;
use std::path::PathBuf;

use directories_next::ProjectDirs;

/// File name of the persisted vault registry document.
pub const REGISTRY_FILE: &str = "vault-config.json";

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("", "", "vaultfm")
        .ok_or_else(|| io::Error::other("could not determine user directories"))
}

/// Default location of the registry document:
/// `<per-user config dir>/vault-config.json`.
pub fn default_registry_path() -> io::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(REGISTRY_FILE))
}

/// Default directory under which new vaults are created:
/// `<per-user data dir>/vaults`.
pub fn default_vault_root() -> io::Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("vaults"))
}
