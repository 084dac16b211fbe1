//! Create command — interactively builds a commit message.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::display;
use crate::format::FormatRegistry;
use crate::prompt::TerminalPrompt;

/// Create command options.
#[derive(Parser)]
pub struct CreateCommand {
    /// Path to config file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override format type (conventional, github, jira, custom).
    #[arg(long, short)]
    pub format_type: Option<String>,

    /// File to write the commit message to.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl CreateCommand {
    /// Executes the create command. Exits with code 1 when the built
    /// message does not validate under the same configuration.
    pub fn execute(self) -> Result<()> {
        let registry = FormatRegistry::builtin();
        let (config, format) =
            super::resolve_format(&registry, self.config.as_deref(), self.format_type.as_deref())?;

        println!("{}", display::builder_banner(format.format_name()));
        let mut prompt = TerminalPrompt::new();
        let commit_message = format.prompt_for_message(&config, &mut prompt)?;

        // Validate the message we just created.
        let result = format.validate(&commit_message);
        if result.is_valid() {
            println!("\n\u{2713} {}", display::valid_banner());
        } else {
            println!(
                "\n{}",
                display::warning_banner("Warning: The generated commit message has validation issues:")
            );
            display::print_errors(&result);
            println!("\nYou may want to adjust the message before using it.");
        }

        if let Some(path) = &self.output {
            fs::write(path, &commit_message)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Commit message saved to {}", path.display());
        } else {
            display::print_panel("Generated Commit Message", &commit_message);
        }

        // Non-interactive callers need a non-zero exit code on validation
        // failure.
        if !result.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
