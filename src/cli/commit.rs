//! Commit command — builds a message interactively and commits staged
//! changes with it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::display;
use crate::format::FormatRegistry;
use crate::git;
use crate::prompt::{PromptIo, TerminalPrompt};

/// Commit command options.
#[derive(Parser)]
pub struct CommitCommand {
    /// Path to config file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override format type (conventional, github, jira, custom).
    #[arg(long, short)]
    pub format_type: Option<String>,

    /// File to write the commit message to if the commit fails.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Skip pre-commit hooks.
    #[arg(long = "no-verify")]
    pub no_verify: bool,
}

impl CommitCommand {
    /// Executes the commit command.
    pub fn execute(self) -> Result<()> {
        let registry = FormatRegistry::builtin();
        let (config, format) =
            super::resolve_format(&registry, self.config.as_deref(), self.format_type.as_deref())?;

        println!("{}", display::builder_banner(format.format_name()));
        let mut prompt = TerminalPrompt::new();
        let commit_message = format.prompt_for_message(&config, &mut prompt)?;

        let result = format.validate(&commit_message);
        if !result.is_valid() {
            println!(
                "\n{}",
                display::warning_banner("Warning: The commit message has validation issues:")
            );
            display::print_errors(&result);

            if !prompt.ask_confirm("Continue with invalid commit message?", false)? {
                std::process::exit(1);
            }
        }

        // Make sure there is something to commit.
        let repo = git::discover_repository()?;
        if git::staged_files(&repo)
            .context("Failed to check staged changes")?
            .is_empty()
        {
            println!("{}", display::warning_banner("Warning: No staged changes to commit."));
            if !prompt.ask_confirm("Stage all changes?", false)? {
                println!("Use 'git add' to stage changes and try again.");
                std::process::exit(1);
            }
            git::stage_all(&repo)?;
            println!("All changes staged for commit.");
        }

        // Commit through the git binary with a message file so hooks run.
        let temp_file = tempfile::NamedTempFile::new()
            .context("Failed to create temporary commit message file")?;
        fs::write(temp_file.path(), &commit_message)
            .context("Failed to write temporary commit message file")?;

        if self.no_verify {
            println!("Skipping pre-commit hooks");
        } else {
            println!("Running pre-commit hooks...");
        }

        let output = git::commit_with_message_file(temp_file.path(), self.no_verify)?;
        if output.status.success() {
            println!("Changes committed successfully!");
            print!("{}", String::from_utf8_lossy(&output.stdout));
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("hook") {
            eprintln!("Pre-commit hooks failed:");
        } else {
            eprintln!("Git commit failed:");
        }
        eprintln!("{stderr}");
        println!("\nYou can run with --no-verify to skip hooks.");

        // Keep the composed message around for another attempt.
        let save = self.output.is_some()
            || prompt.ask_confirm("Save commit message for later use?", true)?;
        if save {
            let save_path = self
                .output
                .unwrap_or_else(|| repo.path().join("COMMIT_EDITMSG"));
            fs::write(&save_path, &commit_message)
                .with_context(|| format!("Failed to write {}", save_path.display()))?;
            println!("Commit message saved to {}", save_path.display());
        }

        std::process::exit(1)
    }
}
