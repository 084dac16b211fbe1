//! Jira style format handler.
//!
//! Messages reference a Jira issue in the form `PROJ-123: message`, with an
//! optional body after a blank line.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::config::FormatConfig;
use crate::prompt::{Choice, PromptIo};

/// Canonical name of this format.
pub const FORMAT_NAME: &str = "jira";

/// Default maximum length of the message part after the issue ID.
const DEFAULT_MAX_MESSAGE_LENGTH: usize = 72;

/// Structural pattern for the first line: an uppercase project key with at
/// least two characters, a numeric issue id, a colon and at least one space
/// before the message. The pattern accepts ANY project key; membership in
/// the configured `jira_project_keys` is checked separately so an unlisted
/// project gets a specific error.
const JIRA_ID_PATTERN: &str = r"^\s*([A-Z][A-Z0-9_]+-\d+)\s*:\s+(.*?)\s*$";

/// Validation result for the Jira style format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JiraResult {
    /// Whether the message passed every check.
    pub valid: bool,
    /// Collected rule violations, empty exactly when valid.
    pub errors: Vec<String>,
    /// The Jira issue identifier (e.g. `PROJ-123`), if present.
    pub issue_id: Option<String>,
    /// The message content after the issue ID.
    pub message: Option<String>,
    /// Optional detailed description following the summary.
    pub body: Option<String>,
}

/// Jira style format handler.
#[derive(Debug)]
pub struct JiraFormat {
    issue_pattern: Regex,
    config: FormatConfig,
}

impl JiraFormat {
    /// Builds the handler, compiling the first-line pattern.
    pub fn new(config: &FormatConfig) -> Result<Self, FormatError> {
        let issue_pattern =
            Regex::new(JIRA_ID_PATTERN).map_err(|source| FormatError::InvalidPattern {
                format: FORMAT_NAME,
                source,
            })?;

        Ok(Self {
            issue_pattern,
            config: config.clone(),
        })
    }

    /// Validates the first line against the issue-ID pattern, checks project
    /// key membership and the message length limit.
    pub fn validate(&self, commit_message: &str) -> JiraResult {
        let mut errors = Vec::new();

        // Split off the body at the first blank line.
        let (first_part, body) = match commit_message.split_once("\n\n") {
            Some((head, rest)) => (head, Some(rest.trim().to_string())),
            None => (commit_message, None),
        };
        let first_line = first_part.trim();

        let mut issue_id = None;
        let message_text;

        if let Some(caps) = self.issue_pattern.captures(first_line) {
            let id = caps[1].to_string();
            message_text = caps[2].trim().to_string();

            let project_keys = &self.config.jira_project_keys;
            if !project_keys.is_empty() {
                let key = id.split('-').next().unwrap_or("");
                if !project_keys.iter().any(|k| k == key) {
                    errors.push(format!(
                        "Commit message must start with a Jira issue ID from one of the allowed projects: {}",
                        project_keys.join(", ")
                    ));
                }
            }

            issue_id = Some(id);
        } else if self.config.require_issue_id {
            // Structural failure: report the one generic error and skip the
            // remaining checks.
            return JiraResult {
                valid: false,
                errors: vec![
                    "Commit message must start with a Jira issue ID (e.g., PROJECT-123: message)"
                        .to_string(),
                ],
                issue_id: None,
                message: Some(commit_message.to_string()),
                body,
            };
        } else {
            message_text = first_line.to_string();
        }

        let message_length = message_text.chars().count();
        let max_message_length = self
            .config
            .max_message_length
            .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH);
        if message_length > max_message_length {
            errors.push(format!(
                "Commit message is too long ({message_length} > {max_message_length} characters)"
            ));
        }

        JiraResult {
            valid: errors.is_empty(),
            errors,
            issue_id,
            message: Some(message_text),
            body,
        }
    }

    /// Interactively assembles a Jira style message: issue ID (required or
    /// confirmed), message text and an optional body.
    pub fn prompt_for_message(
        &self,
        config: &FormatConfig,
        io: &mut dyn PromptIo,
    ) -> Result<String> {
        let mut issue_id = String::new();
        if config.require_issue_id || io.ask_confirm("Include Jira issue ID?", true)? {
            let project_key = if config.jira_project_keys.is_empty() {
                io.ask_text("Jira project key")?
            } else {
                let key_choices: Vec<Choice> = config
                    .jira_project_keys
                    .iter()
                    .map(|k| Choice::new(k, k))
                    .collect();
                io.ask_choice("Jira project key", &key_choices)?
            };
            let issue_number = io.ask_text("Issue number")?;
            issue_id = format!("{project_key}-{issue_number}");
        }

        let message = io.ask_text("Commit message")?;

        let mut body = String::new();
        if io.ask_confirm("Add detailed description?", false)? {
            body = io.ask_multiline("Enter detailed description")?;
        }

        let mut formatted = if issue_id.is_empty() {
            message
        } else {
            format!("{issue_id}: {message}")
        };
        if !body.is_empty() {
            formatted.push_str("\n\n");
            formatted.push_str(&body);
        }

        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ScriptedAnswer, ScriptedPrompt};

    fn default_config() -> FormatConfig {
        FormatConfig {
            format_type: FORMAT_NAME.to_string(),
            jira_project_keys: vec!["PROJ".to_string(), "TEST".to_string(), "DEV".to_string()],
            ..FormatConfig::default()
        }
    }

    #[test]
    fn valid_simple_message() {
        let format = JiraFormat::new(&default_config()).unwrap();
        let result = format.validate("PROJ-123: Add support for Jira format");

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.issue_id.as_deref(), Some("PROJ-123"));
        assert_eq!(result.message.as_deref(), Some("Add support for Jira format"));
        assert_eq!(result.body, None);
    }

    #[test]
    fn valid_message_with_body() {
        let format = JiraFormat::new(&default_config()).unwrap();
        let result = format
            .validate("TEST-456: Add Jira format support\n\nThis adds validation for messages.");

        assert!(result.valid);
        assert_eq!(result.issue_id.as_deref(), Some("TEST-456"));
        assert_eq!(result.message.as_deref(), Some("Add Jira format support"));
        assert_eq!(
            result.body.as_deref(),
            Some("This adds validation for messages.")
        );
    }

    #[test]
    fn unlisted_project_key_gets_specific_error() {
        let format = JiraFormat::new(&default_config()).unwrap();
        let result = format.validate("INVALID-123: This uses an unrecognized project key");

        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Commit message must start with a Jira issue ID")
                && e.contains("allowed projects: PROJ, TEST, DEV")));
        // The ID itself was still parsed.
        assert_eq!(result.issue_id.as_deref(), Some("INVALID-123"));
    }

    #[test]
    fn missing_issue_id_fails_when_required() {
        let format = JiraFormat::new(&default_config()).unwrap();
        let result = format.validate("Add Jira support without issue ID");

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            ["Commit message must start with a Jira issue ID (e.g., PROJECT-123: message)"]
        );
        assert_eq!(result.issue_id, None);
    }

    #[test]
    fn missing_issue_id_skips_length_check() {
        let format = JiraFormat::new(&FormatConfig {
            max_message_length: Some(10),
            ..default_config()
        })
        .unwrap();

        // Longer than 10 characters, but the structural error stands alone.
        let result = format.validate("a message well past the limit without an issue ID");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn optional_issue_id_allows_plain_messages() {
        let format = JiraFormat::new(&FormatConfig {
            require_issue_id: false,
            jira_project_keys: vec!["PROJ".to_string()],
            ..FormatConfig::default()
        })
        .unwrap();

        let with_id = format.validate("PROJ-123: Add Jira support");
        assert!(with_id.valid);
        assert_eq!(with_id.issue_id.as_deref(), Some("PROJ-123"));

        let without_id = format.validate("Add Jira support without issue ID");
        assert!(without_id.valid);
        assert_eq!(without_id.issue_id, None);
        assert_eq!(
            without_id.message.as_deref(),
            Some("Add Jira support without issue ID")
        );
    }

    #[test]
    fn message_length_is_checked_without_the_issue_id() {
        let format = JiraFormat::new(&default_config()).unwrap();

        // Exactly 72 characters of message: fine.
        let result = format.validate(&format!("PROJ-123: {}", "A".repeat(72)));
        assert!(result.valid);

        let result = format.validate(&format!("PROJ-123: {}", "A".repeat(73)));
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("too long") && e.contains("73") && e.contains("72")));
    }

    #[test]
    fn custom_message_length() {
        let format = JiraFormat::new(&FormatConfig {
            max_message_length: Some(20),
            jira_project_keys: vec!["PROJ".to_string()],
            ..FormatConfig::default()
        })
        .unwrap();

        let result = format.validate("PROJ-123: This message is now too long");
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("too long")));
    }

    #[test]
    fn empty_project_keys_accept_any_key() {
        let format = JiraFormat::new(&FormatConfig {
            jira_project_keys: Vec::new(),
            ..FormatConfig::default()
        })
        .unwrap();

        let result = format.validate("ANYTHING-123: This should be valid");
        assert!(result.valid);
        assert_eq!(result.issue_id.as_deref(), Some("ANYTHING-123"));
    }

    #[test]
    fn separator_requires_colon_then_space() {
        let format = JiraFormat::new(&default_config()).unwrap();

        assert!(!format.validate("PROJ-123 Missing colon separator").valid);
        assert!(!format.validate("PROJ-123:Missing space").valid);

        let result = format.validate("PROJ-123:    Extra spaces are fine");
        assert!(result.valid);
        assert_eq!(result.message.as_deref(), Some("Extra spaces are fine"));
    }

    #[test]
    fn malformed_issue_ids_are_rejected() {
        let format = JiraFormat::new(&default_config()).unwrap();

        assert!(!format.validate("PROJ123: Missing hyphen").valid);
        assert!(!format.validate("PROJ-: No issue number").valid);
        assert!(!format.validate("PROJ-ABC: Non-numeric issue").valid);
        // Project keys are case-sensitive.
        assert!(!format.validate("proj-123: Lowercase project key").valid);
    }

    #[test]
    fn long_issue_numbers_are_fine() {
        let format = JiraFormat::new(&default_config()).unwrap();
        assert!(format.validate("PROJ-123456789: Very long issue number").valid);
    }

    #[test]
    fn complex_multi_paragraph_body() {
        let format = JiraFormat::new(&FormatConfig {
            max_message_length: Some(200),
            ..default_config()
        })
        .unwrap();

        let message = "TEST-789: Add complex feature\n\nThis is a detailed description\nwith multiple lines\n\n- Including lists\n- And formatting\n\nAnd more paragraphs";
        let result = format.validate(message);

        assert!(result.valid);
        assert_eq!(result.issue_id.as_deref(), Some("TEST-789"));
        assert_eq!(result.message.as_deref(), Some("Add complex feature"));
        let body = result.body.unwrap();
        assert!(body.contains("detailed description"));
        assert!(body.contains("Including lists"));
        assert!(body.contains("And formatting"));
    }

    #[test]
    fn prompt_with_issue_id_and_message() {
        let cfg = default_config();
        let format = JiraFormat::new(&cfg).unwrap();
        let mut io = ScriptedPrompt::new(vec![
            ScriptedAnswer::choice("PROJ"),
            ScriptedAnswer::text("123"),
            ScriptedAnswer::text("Add Jira support"),
            ScriptedAnswer::Confirm(false), // no body
        ]);

        let message = format.prompt_for_message(&cfg, &mut io).unwrap();
        assert_eq!(message, "PROJ-123: Add Jira support");
        assert!(io.is_exhausted());
    }

    #[test]
    fn prompt_free_text_key_when_none_configured() {
        let cfg = FormatConfig {
            jira_project_keys: Vec::new(),
            ..FormatConfig::default()
        };
        let format = JiraFormat::new(&cfg).unwrap();
        let mut io = ScriptedPrompt::new(vec![
            ScriptedAnswer::text("CORE"),
            ScriptedAnswer::text("77"),
            ScriptedAnswer::text("Fix the widget"),
            ScriptedAnswer::Confirm(false),
        ]);

        let message = format.prompt_for_message(&cfg, &mut io).unwrap();
        assert_eq!(message, "CORE-77: Fix the widget");
    }

    #[test]
    fn prompt_optional_id_can_be_declined() {
        let cfg = FormatConfig {
            require_issue_id: false,
            ..default_config()
        };
        let format = JiraFormat::new(&cfg).unwrap();
        let mut io = ScriptedPrompt::new(vec![
            ScriptedAnswer::Confirm(false), // no issue ID
            ScriptedAnswer::text("Tidy up imports"),
            ScriptedAnswer::Confirm(false),
        ]);

        let message = format.prompt_for_message(&cfg, &mut io).unwrap();
        assert_eq!(message, "Tidy up imports");
    }

    #[test]
    fn prompt_with_body_appends_paragraph() {
        let cfg = default_config();
        let format = JiraFormat::new(&cfg).unwrap();
        let mut io = ScriptedPrompt::new(vec![
            ScriptedAnswer::choice("TEST"),
            ScriptedAnswer::text("9"),
            ScriptedAnswer::text("Add feature"),
            ScriptedAnswer::Confirm(true),
            ScriptedAnswer::multiline("Detailed explanation\nover two lines"),
        ]);

        let message = format.prompt_for_message(&cfg, &mut io).unwrap();
        assert_eq!(
            message,
            "TEST-9: Add feature\n\nDetailed explanation\nover two lines"
        );
    }

    #[test]
    fn prompted_message_validates_under_same_config() {
        let cfg = default_config();
        let format = JiraFormat::new(&cfg).unwrap();
        let mut io = ScriptedPrompt::new(vec![
            ScriptedAnswer::choice("DEV"),
            ScriptedAnswer::text("404"),
            ScriptedAnswer::text("fix login bug"),
            ScriptedAnswer::Confirm(false),
        ]);

        let message = format.prompt_for_message(&cfg, &mut io).unwrap();
        let result = format.validate(&message);
        assert!(result.valid, "errors: {:?}", result.errors);
        assert_eq!(result.issue_id.as_deref(), Some("DEV-404"));
        assert_eq!(result.message.as_deref(), Some("fix login bug"));
    }
}
