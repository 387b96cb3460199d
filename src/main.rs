use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaultfm::config::{dirs, ConfigStore};
use vaultfm::fs_op;
use vaultfm::vault::VaultRegistry;

#[derive(Parser)]
#[command(name = "vaultfm", version, about = "Vault-scoped file operations")]
struct Cli {
    /// Registry document to use instead of the per-user default.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory under which new vaults are created.
    #[arg(long, global = true, value_name = "DIR")]
    vault_root: Option<PathBuf>,

    /// Answer yes to confirmation prompts (required for destructive
    /// commands in non-interactive use).
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered vaults.
    Vaults,
    /// Create a new vault under the vault root.
    VaultNew { name: String },
    /// Delete a vault: its registry record and its directory tree.
    VaultRm { path: PathBuf },
    /// Rename a vault; its directory moves to the sibling path.
    VaultMv { path: PathBuf, new_name: String },
    /// List the immediate children of a directory.
    Ls { dir: PathBuf },
    /// Create an empty directory named NAME inside DIR.
    Mkdir { dir: PathBuf, name: String },
    /// Create an empty file named NAME inside DIR.
    Touch { dir: PathBuf, name: String },
    /// Remove a file or directory tree (missing path is fine).
    Rm { path: PathBuf },
    /// Rename a file or directory within its parent directory.
    Mv { path: PathBuf, new_name: String },
    /// Copy files/directories into DIR under their own base names.
    CopyInto {
        dir: PathBuf,
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// Delete every immediate child of DIR.
    Clear { dir: PathBuf },
    /// Sort the files of DIR into category folders by extension.
    Sort { dir: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn registry(cli: &Cli) -> anyhow::Result<VaultRegistry> {
    let store = match &cli.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::open().context("resolving registry location")?,
    };
    let root = match &cli.vault_root {
        Some(root) => root.clone(),
        None => dirs::default_vault_root().context("resolving vault root")?,
    };
    Ok(VaultRegistry::new(store, root))
}

/// Gate a destructive command. `--yes` skips the prompt; without a
/// terminal the command refuses instead of prompting, so scripts must pass
/// `--yes` explicitly.
fn confirmed(cli: &Cli, prompt: String) -> anyhow::Result<bool> {
    if cli.yes {
        return Ok(true);
    }
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("confirmation required; pass --yes to skip the prompt");
    }
    let answer = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("reading confirmation")?;
    Ok(answer)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Vaults => {
            for vault in registry(&cli)?.list() {
                println!("{}\t{}", vault.name, vault.path.display());
            }
        }
        Command::VaultNew { name } => {
            let vault = registry(&cli)?.create(name)?;
            println!("created {}", vault.path.display());
        }
        Command::VaultRm { path } => {
            if !confirmed(&cli, format!("Delete vault {} and all files?", path.display()))? {
                return Ok(());
            }
            registry(&cli)?.delete(path)?;
            println!("deleted {}", path.display());
        }
        Command::VaultMv { path, new_name } => {
            let new_path = registry(&cli)?.rename(path, new_name)?;
            println!("renamed to {}", new_path.display());
        }
        Command::Ls { dir } => {
            for entry in fs_op::list_dir(dir) {
                let marker = if entry.is_dir { "/" } else { "" };
                println!("{}{}\t{}", entry.name, marker, entry.size);
            }
        }
        Command::Mkdir { dir, name } => {
            let path = fs_op::create_dir(dir, name)?;
            println!("created {}", path.display());
        }
        Command::Touch { dir, name } => {
            let path = fs_op::create_file(dir, name)?;
            println!("created {}", path.display());
        }
        Command::Rm { path } => {
            if !confirmed(&cli, format!("Delete {}?", path.display()))? {
                return Ok(());
            }
            fs_op::remove_path(path)?;
            println!("removed {}", path.display());
        }
        Command::Mv { path, new_name } => {
            let new_path = fs_op::rename_path(path, new_name)?;
            println!("renamed to {}", new_path.display());
        }
        Command::CopyInto { dir, sources } => {
            let count = fs_op::bulk_copy_into(sources, dir)?;
            println!("copied {} items", count);
        }
        Command::Clear { dir } => {
            if !confirmed(
                &cli,
                format!("Delete ALL entries inside {}?", dir.display()),
            )? {
                return Ok(());
            }
            let count = fs_op::clear_directory(dir)?;
            println!("removed {} items", count);
        }
        Command::Sort { dir } => {
            let count = fs_op::sort_by_extension(dir)?;
            println!("sorted {} files", count);
        }
    }
    Ok(())
}
