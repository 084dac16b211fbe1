//! Install command — writes Git hook scripts into the repository.

use std::fs;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;

use crate::git::{self, hooks};

/// Install command options.
#[derive(Parser)]
pub struct InstallCommand {}

impl InstallCommand {
    /// Installs the pre-commit and commit-msg hooks, chaining an existing
    /// pre-commit framework installation when one is detected.
    pub fn execute(self) -> Result<()> {
        let hooks_dir = git::hooks_dir()?;

        if framework_installed() {
            println!("pre-commit framework detected");
            println!("Installing pre-commit framework hooks...");
            if let Err(err) = install_framework_hooks(&hooks_dir) {
                // Framework trouble is not fatal; our own hooks still work.
                eprintln!("Failed to install pre-commit framework hooks: {err:#}");
            }
        }

        let (pre_commit_path, commit_msg_path) = hooks::install_hooks(&hooks_dir)?;

        println!("Git hooks installed successfully!");
        println!("pre-commit hook: {}", pre_commit_path.display());
        println!("commit-msg hook: {}", commit_msg_path.display());

        Ok(())
    }
}

/// Whether the pre-commit framework binary is available.
fn framework_installed() -> bool {
    Command::new("pre-commit")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Lets the pre-commit framework install its hooks, then backs its
/// pre-commit script up so ours can chain to it.
fn install_framework_hooks(hooks_dir: &std::path::Path) -> Result<()> {
    let status = Command::new("pre-commit")
        .args(["install", "--install-hooks"])
        .status()
        .context("Failed to run pre-commit install")?;
    if !status.success() {
        anyhow::bail!("pre-commit install exited with {status}");
    }

    let framework_hook = hooks_dir.join("pre-commit");
    if framework_hook.exists() {
        let backup_path = hooks_dir.join(hooks::FRAMEWORK_HOOK_BACKUP);
        fs::copy(&framework_hook, &backup_path).with_context(|| {
            format!("Failed to back up framework hook to {}", backup_path.display())
        })?;
        hooks::make_executable(&backup_path)?;
        println!("Backed up pre-commit framework hook to {}", backup_path.display());
    }

    Ok(())
}
