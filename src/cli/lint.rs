//! Lint command — validates a commit message against the configured format.

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use super::display::{self, OutputFormat};
use crate::format::{FormatRegistry, ValidationResult};
use crate::prompt::TerminalPrompt;

/// Lint command options.
#[derive(Parser)]
pub struct LintCommand {
    /// Path to commit message file (used by Git hooks).
    #[arg(value_name = "COMMIT_MSG_FILE")]
    pub commit_msg_file: Option<PathBuf>,

    /// Commit message to lint (for CLI usage).
    #[arg(long, short)]
    pub message: Option<String>,

    /// Path to config file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override format type (conventional, github, jira, custom).
    #[arg(long, short)]
    pub format_type: Option<String>,

    /// Disables interactive fixing when validation fails.
    #[arg(long)]
    pub no_interactive: bool,

    /// Output format for the validation result: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

impl LintCommand {
    /// Executes the lint command. Exits with code 1 when the message is
    /// invalid and no interactive fix happens.
    pub fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.output_format.parse().unwrap_or(OutputFormat::Text);

        let registry = FormatRegistry::builtin();
        let (config, format) =
            super::resolve_format(&registry, self.config.as_deref(), self.format_type.as_deref())?;

        let commit_message = if let Some(message) = &self.message {
            message.clone()
        } else if let Some(path) = &self.commit_msg_file {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Error reading commit message file: {}", path.display()))?;
            // Commit message files end with a newline; the grammars treat the
            // message as ending at the last content character.
            raw.trim_end().to_string()
        } else {
            bail!("No commit message provided. Use --message/-m or specify a commit message file.");
        };

        let result = format.validate(&commit_message);

        match output_format {
            OutputFormat::Json | OutputFormat::Yaml => {
                print_serialized(&result, output_format)?;
                if !result.is_valid() {
                    std::process::exit(1);
                }
                return Ok(());
            }
            OutputFormat::Text => {}
        }

        if result.is_valid() {
            println!("{}", display::valid_banner());
            return Ok(());
        }

        println!("{}", display::invalid_banner());
        display::print_errors(&result);

        // Interactive fixing only makes sense on a real terminal.
        let interactive = !self.no_interactive && std::io::stdout().is_terminal();
        if !interactive {
            std::process::exit(1);
        }

        println!("\nLet's fix your commit message...");
        println!("{}", display::builder_banner(format.format_name()));
        let mut prompt = TerminalPrompt::new();
        let new_message = format.prompt_for_message(&config, &mut prompt)?;

        if let Some(path) = &self.commit_msg_file {
            fs::write(path, &new_message)
                .with_context(|| format!("Failed to write commit message file: {}", path.display()))?;
            println!("New commit message saved to file.");
        } else {
            display::print_panel("Use this commit message", &new_message);
        }

        Ok(())
    }
}

fn print_serialized(result: &ValidationResult, output_format: OutputFormat) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(result)
                .context("Failed to serialize validation result to JSON")?;
            println!("{rendered}");
        }
        OutputFormat::Yaml => {
            let rendered = serde_yaml::to_string(result)
                .context("Failed to serialize validation result to YAML")?;
            print!("{rendered}");
        }
        OutputFormat::Text => {}
    }
    Ok(())
}
