//! Conventional Commits format handler.
//!
//! Implements the Conventional Commits convention
//! (<https://www.conventionalcommits.org>): `type(scope)!: description`
//! followed by an optional body and footer separated by blank lines.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::config::{FormatConfig, SubjectCase};
use crate::prompt::{Choice, PromptIo};

/// Canonical name of this format.
pub const FORMAT_NAME: &str = "conventional";

/// Default maximum length of the reconstructed subject line.
const DEFAULT_MAX_SUBJECT_LENGTH: usize = 100;

/// Human descriptions for the eleven standard commit types, shown as
/// annotations in the interactive type chooser.
const COMMIT_TYPE_DESCRIPTIONS: [(&str, &str); 11] = [
    ("feat", "A new feature"),
    ("fix", "A bug fix"),
    ("docs", "Documentation only changes"),
    ("style", "Changes that do not affect the meaning of the code"),
    ("refactor", "A code change that neither fixes a bug nor adds a feature"),
    ("perf", "A code change that improves performance"),
    ("test", "Adding missing tests or correcting existing tests"),
    ("build", "Changes that affect the build system or external dependencies"),
    ("ci", "Changes to CI configuration files and scripts"),
    ("chore", "Other changes that don't modify src or test files"),
    ("revert", "Reverts a previous commit"),
];

fn type_description(commit_type: &str) -> Option<&'static str> {
    COMMIT_TYPE_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == commit_type)
        .map(|(_, description)| *description)
}

/// Validation result for the Conventional Commits format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConventionalResult {
    /// Whether the message passed every check.
    pub valid: bool,
    /// Collected rule violations, empty exactly when valid.
    pub errors: Vec<String>,
    /// The commit type (e.g. `feat`, `fix`).
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// The parenthesized scope, if present.
    pub scope: Option<String>,
    /// Whether the `!` breaking-change marker was present.
    pub breaking: bool,
    /// The subject description after the colon.
    pub description: Option<String>,
    /// The message body, if present.
    pub body: Option<String>,
    /// The message footer, if present.
    pub footer: Option<String>,
}

/// Conventional Commits format handler.
#[derive(Debug)]
pub struct ConventionalFormat {
    pattern: Regex,
    config: FormatConfig,
}

impl ConventionalFormat {
    /// Builds the handler, compiling the structural pattern.
    pub fn new(config: &FormatConfig) -> Result<Self, FormatError> {
        // type, optional (scope), optional !, ": " then a single-line
        // description; body is the non-greedy block after the first blank
        // line, footer everything after the next one.
        let pattern = Regex::new(
            r"^(?P<type>\w+)(?:\((?P<scope>[\w-]+)\))?(?P<breaking>!)?: (?P<description>[^\n]+)(?:\n\n(?P<body>[\s\S]*?))?(?:\n\n(?P<footer>[\s\S]*))?$",
        )
        .map_err(|source| FormatError::InvalidPattern {
            format: FORMAT_NAME,
            source,
        })?;

        Ok(Self {
            pattern,
            config: config.clone(),
        })
    }

    /// Validates a message against the structural pattern and every
    /// configured rule. Rule violations accumulate; they do not short-circuit.
    pub fn validate(&self, message: &str) -> ConventionalResult {
        let Some(caps) = self.pattern.captures(message) else {
            return ConventionalResult {
                valid: false,
                errors: vec![
                    "Commit message does not follow Conventional Commits format".to_string(),
                ],
                ..ConventionalResult::default()
            };
        };

        let commit_type = &caps["type"];
        let scope = caps.name("scope").map(|m| m.as_str());
        let breaking = caps.name("breaking").is_some();
        let description = &caps["description"];
        let body = caps.name("body").map(|m| m.as_str());
        let footer = caps.name("footer").map(|m| m.as_str());

        let mut errors = Vec::new();

        let valid_types = &self.config.types;
        if !valid_types.is_empty() && !valid_types.iter().any(|t| t == commit_type) {
            errors.push(format!(
                "Invalid type: {commit_type}. Must be one of: {}",
                valid_types.join(", ")
            ));
        }

        if self.config.scope_required && scope.is_none() {
            errors.push("Scope is required".to_string());
        }

        if let (Some(allowed_scopes), Some(scope)) = (&self.config.allowed_scopes, scope) {
            if !allowed_scopes.is_empty() && !allowed_scopes.iter().any(|s| s == scope) {
                errors.push(format!(
                    "Invalid scope: {scope}. Must be one of: {}",
                    allowed_scopes.join(", ")
                ));
            }
        }

        if breaking
            && !self
                .config
                .allowed_breaking_changes
                .iter()
                .any(|t| t == commit_type)
        {
            errors.push(format!(
                "Breaking changes not allowed for type: {commit_type}"
            ));
        }

        let subject_line = reconstruct_subject(commit_type, scope, breaking, description);
        let subject_length = subject_line.chars().count();
        let max_subject_length = self
            .config
            .max_subject_length
            .unwrap_or(DEFAULT_MAX_SUBJECT_LENGTH);
        if subject_length > max_subject_length {
            errors.push(format!(
                "Subject line too long ({subject_length} > {max_subject_length})"
            ));
        }

        // Description is non-empty by construction ([^\n]+), so a first
        // character always exists.
        let first_char = description.chars().next();
        match self.config.subject_case {
            SubjectCase::Lower => {
                if !first_char.is_some_and(char::is_lowercase) {
                    errors.push("Subject description must start with lowercase".to_string());
                }
            }
            SubjectCase::Upper => {
                if !first_char.is_some_and(char::is_uppercase) {
                    errors.push("Subject description must start with uppercase".to_string());
                }
            }
            SubjectCase::Any => {}
        }

        if self.config.no_period_end && description.trim().ends_with('.') {
            errors.push("Subject description should not end with period".to_string());
        }

        if self.config.body_required && body.map_or(true, str::is_empty) {
            errors.push("Body is required".to_string());
        }

        if self.config.footer_required && footer.map_or(true, str::is_empty) {
            errors.push("Footer is required".to_string());
        }

        ConventionalResult {
            valid: errors.is_empty(),
            errors,
            commit_type: Some(commit_type.to_string()),
            scope: scope.map(ToString::to_string),
            breaking,
            description: Some(description.to_string()),
            body: body.map(ToString::to_string),
            footer: footer.map(ToString::to_string),
        }
    }

    /// Interactively assembles a Conventional Commits message: type, scope,
    /// breaking-change marker, description, optional body and footer.
    ///
    /// A confirmed breaking change contributes both the `!` marker and a
    /// `BREAKING CHANGE:` footer entry; additional footer content is
    /// separated from it by a blank line.
    pub fn prompt_for_message(
        &self,
        config: &FormatConfig,
        io: &mut dyn PromptIo,
    ) -> Result<String> {
        // Type, annotated with the standard descriptions where known.
        let type_choices: Vec<Choice> = config
            .types
            .iter()
            .map(|t| match type_description(t) {
                Some(description) => Choice::new(format!("{t}: {description}"), t),
                None => Choice::new(t, t),
            })
            .collect();
        let commit_type = io.ask_choice("Commit type:", &type_choices)?;

        // Scope: choice list when configured, free text otherwise.
        let scope = match config.allowed_scopes.as_deref() {
            Some(allowed_scopes) if !allowed_scopes.is_empty() => {
                let mut scope_choices: Vec<Choice> = allowed_scopes
                    .iter()
                    .map(|s| Choice::new(s, s))
                    .collect();
                if !config.scope_required {
                    scope_choices.insert(0, Choice::new("No scope", ""));
                }
                io.ask_choice("Scope:", &scope_choices)?
            }
            _ => {
                let scope_prompt = if config.scope_required {
                    "Scope:"
                } else {
                    "Scope (optional):"
                };
                let mut scope = io.ask_text(scope_prompt)?;
                while config.scope_required && scope.is_empty() {
                    scope = io.ask_text(scope_prompt)?;
                }
                scope
            }
        };

        // Breaking change, only offered for types that allow it.
        let mut breaking = false;
        let mut breaking_description = String::new();
        if config
            .allowed_breaking_changes
            .iter()
            .any(|t| *t == commit_type)
        {
            breaking = io.ask_confirm("Is this a breaking change?", false)?;
            if breaking {
                let answer = io.ask_text(
                    "Describe the breaking change (this will be added to the footer):",
                )?;
                breaking_description = if answer.is_empty() {
                    "Breaking changes".to_string()
                } else {
                    answer
                };
            }
        }

        let description = io.ask_text("Description:")?;

        let mut body = String::new();
        if config.body_required || io.ask_confirm("Add body?", false)? {
            body = io.ask_multiline("Enter body")?;
        }

        // Footer starts with the breaking-change entry when one was given.
        let mut footer = String::new();
        if breaking {
            footer = format!("BREAKING CHANGE: {breaking_description}");
        }
        if config.footer_required || (!breaking && io.ask_confirm("Add footer?", false)?) {
            let footer_prompt = if breaking {
                "Enter additional footer information"
            } else {
                "Enter footer"
            };
            let additional_footer = io.ask_multiline(footer_prompt)?;
            if !additional_footer.is_empty() {
                if footer.is_empty() {
                    footer = additional_footer;
                } else {
                    footer.push_str("\n\n");
                    footer.push_str(&additional_footer);
                }
            }
        }

        let mut message = reconstruct_subject(
            &commit_type,
            (!scope.is_empty()).then_some(scope.as_str()),
            breaking,
            &description,
        );
        if !body.is_empty() {
            message.push_str("\n\n");
            message.push_str(&body);
        }
        if !footer.is_empty() {
            message.push_str("\n\n");
            message.push_str(&footer);
        }

        Ok(message)
    }
}

/// Rebuilds `type[(scope)][!]: description` from its components.
fn reconstruct_subject(
    commit_type: &str,
    scope: Option<&str>,
    breaking: bool,
    description: &str,
) -> String {
    let mut subject = String::from(commit_type);
    if let Some(scope) = scope {
        subject.push('(');
        subject.push_str(scope);
        subject.push(')');
    }
    if breaking {
        subject.push('!');
    }
    subject.push_str(": ");
    subject.push_str(description);
    subject
}
