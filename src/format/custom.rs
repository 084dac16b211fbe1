//! Custom regex-based format handler.
//!
//! Projects define their own convention with a `custom_pattern` regex whose
//! named capture groups double as the interactive prompt plan. Example
//! configuration:
//!
//! ```toml
//! custom_pattern = "^\\[(?P<category>\\w+)\\] (?P<message>.+)$"
//! message_template = "[{category}] {message}"
//!
//! [prompts]
//! category = "Category (e.g. FEATURE, BUGFIX)"
//! message = "Commit message"
//! ```

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::config::FormatConfig;
use crate::prompt::PromptIo;

/// Canonical name of this format.
pub const FORMAT_NAME: &str = "custom";

/// Validation result for the custom regex format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomResult {
    /// Whether the message matched the configured pattern.
    pub valid: bool,
    /// Collected rule violations, empty exactly when valid.
    pub errors: Vec<String>,
    /// The original commit message that was validated.
    pub message: String,
    /// Named capture groups and their matched substrings. Optional groups
    /// that did not participate in the match are absent.
    pub matches: BTreeMap<String, String>,
}

/// Custom regex format handler.
#[derive(Debug)]
pub struct CustomFormat {
    pattern: Regex,
    named_groups: Vec<String>,
    prompts: HashMap<String, String>,
}

impl CustomFormat {
    /// Builds the handler from the `custom_pattern` config key.
    ///
    /// Fails with [`FormatError::MissingCustomPattern`] when the key is
    /// absent or empty and [`FormatError::InvalidPattern`] when it does not
    /// compile.
    pub fn new(config: &FormatConfig) -> Result<Self, FormatError> {
        let raw_pattern = config
            .custom_pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(FormatError::MissingCustomPattern)?;

        let pattern = RegexBuilder::new(raw_pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| FormatError::InvalidPattern {
                format: FORMAT_NAME,
                source,
            })?;

        // Named groups in order of first appearance drive the prompt plan.
        let named_groups = pattern
            .capture_names()
            .flatten()
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            pattern,
            named_groups,
            prompts: config.prompts.clone(),
        })
    }

    /// Matches the message against the pattern, anchored at the start.
    pub fn validate(&self, commit_message: &str) -> CustomResult {
        let caps = self
            .pattern
            .captures(commit_message)
            // Match must begin at the start of the message; the end is only
            // anchored if the pattern itself says so.
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0));

        let Some(caps) = caps else {
            return CustomResult {
                valid: false,
                errors: vec!["Commit message does not match the custom pattern".to_string()],
                message: commit_message.to_string(),
                matches: BTreeMap::new(),
            };
        };

        let mut matches = BTreeMap::new();
        for group in &self.named_groups {
            if let Some(m) = caps.name(group) {
                matches.insert(group.clone(), m.as_str().to_string());
            }
        }

        CustomResult {
            valid: true,
            errors: Vec::new(),
            message: commit_message.to_string(),
            matches,
        }
    }

    /// Asks for a value per named capture group (in pattern order) and
    /// assembles the message from `message_template`.
    ///
    /// Without a template the values are joined with single spaces — a
    /// low-fidelity fallback that is unreliable for multi-group patterns, so
    /// a warning is emitted through the tracing layer.
    pub fn prompt_for_message(
        &self,
        config: &FormatConfig,
        io: &mut dyn PromptIo,
    ) -> Result<String> {
        let mut values: Vec<(String, String)> = Vec::new();
        for group in &self.named_groups {
            let prompt_text = self
                .prompts
                .get(group)
                .cloned()
                .unwrap_or_else(|| format!("Enter {group}"));
            let value = io.ask_text(&prompt_text)?;
            values.push((group.clone(), value));
        }

        match config.message_template.as_deref().filter(|t| !t.is_empty()) {
            Some(template) => {
                let mut message = template.to_string();
                for (group, value) in &values {
                    message = message.replace(&format!("{{{group}}}"), value);
                }
                Ok(message)
            }
            None => {
                tracing::warn!(
                    "no message_template configured for custom format; joining captured values with spaces"
                );
                Ok(values
                    .iter()
                    .map(|(_, value)| value.as_str())
                    .collect::<Vec<_>>()
                    .join(" "))
            }
        }
    }
}
