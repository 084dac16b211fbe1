//! GitHub style format handler.
//!
//! A concise imperative subject line, an optional body after a blank line,
//! and issue references of the form `Fixes #123` built from configurable
//! keywords.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::config::FormatConfig;
use crate::prompt::{Choice, PromptIo};

/// Canonical name of this format.
pub const FORMAT_NAME: &str = "github";

/// Default maximum subject line length. GitHub's convention is 50
/// characters, flexible up to 72.
const DEFAULT_MAX_SUBJECT_LENGTH: usize = 72;

/// First words that indicate past tense or gerund rather than imperative
/// mood. A deliberately small, fixed list.
const NON_IMPERATIVE_STARTERS: [&str; 6] =
    ["added", "fixes", "fixed", "adding", "updated", "changed"];

/// Validation result for the GitHub style format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubResult {
    /// Whether the message passed every check.
    pub valid: bool,
    /// Collected rule violations, empty exactly when valid.
    pub errors: Vec<String>,
    /// The subject line.
    pub message: Option<String>,
    /// Referenced issue number, if one was found.
    pub issue_reference: Option<String>,
    /// Keyword that introduced the issue reference (e.g. `Fixes`).
    pub issue_keyword: Option<String>,
}

/// GitHub style format handler.
#[derive(Debug)]
pub struct GithubFormat {
    commit_pattern: Regex,
    issue_pattern: Regex,
    keywords: Vec<String>,
    config: FormatConfig,
}

impl GithubFormat {
    /// Builds the handler, compiling the issue-reference pattern from the
    /// configured keywords.
    pub fn new(config: &FormatConfig) -> Result<Self, FormatError> {
        let keywords = config.keywords.clone();

        // The keyword must be preceded by start-of-text or whitespace, so a
        // parenthesized reference like "(Fixes #123)" is intentionally NOT
        // matched. The first match scanning left to right wins, which gives
        // subject-line references precedence over body references.
        let keyword_alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let issue_pattern = Regex::new(&format!(
            r"(?i)(?:^|\s)(?P<keyword>{keyword_alternation}):?\s+#(?P<issue>\d+)"
        ))
        .map_err(|source| FormatError::InvalidPattern {
            format: FORMAT_NAME,
            source,
        })?;

        // Loose split into subject and optional body at the first blank line.
        let commit_pattern = Regex::new(r"(?s)^(?P<subject>.+?)(?:\n\n(?P<body>[\s\S]*))?$")
            .map_err(|source| FormatError::InvalidPattern {
                format: FORMAT_NAME,
                source,
            })?;

        Ok(Self {
            commit_pattern,
            issue_pattern,
            keywords,
            config: config.clone(),
        })
    }

    /// Validates subject length, imperative mood and the issue reference
    /// requirement. The whole message is searched for a reference, not just
    /// the body.
    pub fn validate(&self, message: &str) -> GithubResult {
        let Some(caps) = self.commit_pattern.captures(message) else {
            return GithubResult {
                valid: false,
                errors: vec!["Invalid commit message format".to_string()],
                ..GithubResult::default()
            };
        };

        let subject = &caps["subject"];
        let mut errors = Vec::new();

        let subject_length = subject.chars().count();
        let max_subject_length = self
            .config
            .max_subject_length
            .unwrap_or(DEFAULT_MAX_SUBJECT_LENGTH);
        if subject_length > max_subject_length {
            errors.push(format!(
                "Subject line too long ({subject_length} > {max_subject_length})"
            ));
        }

        if self.config.imperative_mood {
            let first_word = subject
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_lowercase();
            if NON_IMPERATIVE_STARTERS.contains(&first_word.as_str()) {
                errors.push(
                    "Use imperative mood in subject line (e.g., 'Add' not 'Added')".to_string(),
                );
            }
        }

        let mut issue_reference = None;
        let mut issue_keyword = None;
        if let Some(issue_caps) = self.issue_pattern.captures(message) {
            issue_keyword = Some(issue_caps["keyword"].to_string());
            issue_reference = Some(issue_caps["issue"].to_string());
        } else if self.config.issue_reference_required {
            let example = self.keywords.first().map_or("Fixes", String::as_str);
            errors.push(format!(
                "Missing issue reference (e.g., '{example} #123'). Use one of: {}",
                self.keywords.join(", ")
            ));
        }

        GithubResult {
            valid: errors.is_empty(),
            errors,
            message: Some(subject.to_string()),
            issue_reference,
            issue_keyword,
        }
    }

    /// Interactively assembles a GitHub style message: subject, optional
    /// body, optional (or required) issue reference.
    ///
    /// A reference without a body is appended to the subject in
    /// parentheses; with a body it becomes its own final paragraph.
    pub fn prompt_for_message(
        &self,
        config: &FormatConfig,
        io: &mut dyn PromptIo,
    ) -> Result<String> {
        let subject = io.ask_text("Subject")?;

        let mut body = String::new();
        if io.ask_confirm("Add detailed description?", false)? {
            body = io.ask_multiline("Enter detailed description")?;
        }

        let mut reference = String::new();
        if config.issue_reference_required || io.ask_confirm("Add issue reference?", false)? {
            let keyword_choices: Vec<Choice> =
                config.keywords.iter().map(|k| Choice::new(k, k)).collect();
            let keyword = io.ask_choice("Reference keyword", &keyword_choices)?;
            let issue_number = io.ask_text("Issue number")?;
            reference = format!("{keyword} #{issue_number}");
        }

        Ok(assemble_message(subject, &body, &reference))
    }
}

/// Assembles the final message from subject, body and issue reference.
fn assemble_message(mut subject: String, body: &str, reference: &str) -> String {
    if !reference.is_empty() && body.is_empty() {
        subject = format!("{subject} ({reference})");
    }

    if body.is_empty() {
        subject
    } else {
        let mut message = format!("{subject}\n\n{body}");
        if !reference.is_empty() && !subject.ends_with(&format!("({reference})")) {
            message.push_str("\n\n");
            message.push_str(reference);
        }
        message
    }
}
