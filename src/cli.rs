//! CLI interface for commit-lint.

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

pub mod commit;
pub mod create;
pub mod init;
pub mod install;
pub mod lint;

mod display;

use crate::config::{self, FormatConfig};
use crate::format::{CommitFormat, FormatRegistry};

/// commit-lint: a configurable linter for better commit messages.
#[derive(Parser)]
#[command(name = "commit-lint")]
#[command(about = "A configurable linter for better commit messages")]
#[command(long_about = "A configurable linter for better commit messages.

Supports multiple commit message formats:
- conventional: Conventional Commits format (https://www.conventionalcommits.org)
- github: GitHub style commit messages
- jira: Jira-style commit messages with ticket IDs
- custom: Custom format defined by regex pattern")]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Lints a commit message according to the configured format.
    Lint(lint::LintCommand),
    /// Interactively creates a commit message according to the configured format.
    Create(create::CreateCommand),
    /// Creates a commit message interactively and commits staged changes.
    Commit(commit::CommitCommand),
    /// Installs Git hooks in the current repository.
    Install(install::InstallCommand),
    /// Creates a new configuration file with default settings.
    Init(init::InitCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Lint(lint_cmd) => lint_cmd.execute(),
            Commands::Create(create_cmd) => create_cmd.execute(),
            Commands::Commit(commit_cmd) => commit_cmd.execute(),
            Commands::Install(install_cmd) => install_cmd.execute(),
            Commands::Init(init_cmd) => init_cmd.execute(),
        }
    }
}

/// Loads configuration, applies a `--format-type` override after checking it
/// against the registry, and constructs the selected handler.
pub(crate) fn resolve_format(
    registry: &FormatRegistry,
    config_path: Option<&Path>,
    format_override: Option<&str>,
) -> Result<(FormatConfig, CommitFormat)> {
    let mut config = config::load_config(config_path)?;

    if let Some(name) = format_override {
        if !registry.contains(name) {
            bail!(
                "Invalid format type: {name}. Valid formats: {}",
                registry.format_names().join(", ")
            );
        }
        config.format_type = name.to_string();
        println!("Using format type: {name}");
    }

    let format = registry.get(&config)?;
    Ok((config, format))
}
