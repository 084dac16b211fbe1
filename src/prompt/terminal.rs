//! Terminal implementation of the prompt collaborator.

use std::io::BufRead;

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};

use super::{Choice, PromptIo};

/// Prompt collaborator backed by the real terminal.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    /// Creates a terminal prompt with the default theme.
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptIo for TerminalPrompt {
    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read input for '{prompt}'"))
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[Choice]) -> Result<String> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        let index = FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()
            .with_context(|| format!("Failed to read selection for '{prompt}'"))?;

        Ok(choices[index].value.clone())
    }

    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("Failed to read confirmation for '{prompt}'"))
    }

    fn ask_multiline(&mut self, prompt: &str) -> Result<String> {
        println!("{prompt} (empty line to finish):");

        let mut lines: Vec<String> = Vec::new();
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read line")?;
            if line.is_empty() {
                if lines.is_empty() {
                    continue;
                }
                break;
            }
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }
}
