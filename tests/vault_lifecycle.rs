use std::fs;
use std::path::Path;

use tempfile::tempdir;

use vaultfm::config::ConfigStore;
use vaultfm::{OpError, VaultRegistry};

fn registry_in(td: &Path) -> VaultRegistry {
    VaultRegistry::new(
        ConfigStore::with_path(td.join("vault-config.json")),
        td.join("vaults"),
    )
}

#[test]
fn created_vault_is_listed_with_existing_directory() {
    let td = tempdir().unwrap();
    let reg = registry_in(td.path());

    reg.create("journal").unwrap();

    let vaults = reg.list();
    assert_eq!(vaults.len(), 1);
    assert_eq!(vaults[0].name, "journal");
    assert!(vaults[0].path.is_dir());
}

#[test]
fn second_create_with_same_name_fails_and_keeps_one_entry() {
    let td = tempdir().unwrap();
    let reg = registry_in(td.path());

    reg.create("media").unwrap();
    let err = reg.create("media").unwrap_err();
    assert!(matches!(err, OpError::AlreadyExists(_)));
    assert_eq!(reg.list().len(), 1);
}

#[test]
fn delete_removes_entry_and_nonempty_directory_idempotently() {
    let td = tempdir().unwrap();
    let reg = registry_in(td.path());

    let vault = reg.create("scratch").unwrap();
    fs::create_dir(vault.path.join("sub")).unwrap();
    fs::write(vault.path.join("sub/file.txt"), b"x").unwrap();

    reg.delete(&vault.path).unwrap();
    assert!(!vault.path.exists());
    assert!(reg.list().is_empty());

    // Deleting again is success, not an error.
    reg.delete(&vault.path).unwrap();
}

#[test]
fn rename_is_idempotent_for_the_current_name() {
    let td = tempdir().unwrap();
    let reg = registry_in(td.path());

    let vault = reg.create("inbox").unwrap();
    let before = fs::metadata(&vault.path).unwrap().modified().unwrap();

    let out = reg.rename(&vault.path, "inbox").unwrap();
    assert_eq!(out, vault.path);
    // No disk mutation happened.
    let after = fs::metadata(&vault.path).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn registry_survives_corrupt_document() {
    let td = tempdir().unwrap();
    let config = td.path().join("vault-config.json");
    fs::write(&config, b"\x00\xffgarbage").unwrap();

    let reg = VaultRegistry::new(ConfigStore::with_path(config), td.path().join("vaults"));
    assert!(reg.list().is_empty());

    // The registry is usable again and the next save rewrites the file.
    reg.create("recovered").unwrap();
    assert_eq!(reg.list().len(), 1);
}

#[test]
fn vanished_vault_is_pruned_on_next_read() {
    let td = tempdir().unwrap();
    let reg = registry_in(td.path());

    let vault = reg.create("ephemeral").unwrap();
    fs::remove_dir_all(&vault.path).unwrap();

    assert!(reg.list().is_empty());

    // A fresh registry over the same document no longer sees the record.
    let again = registry_in(td.path());
    assert!(again.list().is_empty());
}
