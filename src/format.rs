//! Commit message format handlers.
//!
//! Each supported convention is a variant of [`CommitFormat`], a closed set
//! so new formats are an explicit code change and matches stay exhaustive.
//! Handlers are constructed from an immutable [`FormatConfig`] snapshot via
//! a [`FormatRegistry`] and expose three operations: `validate`,
//! `prompt_for_message` and `format_name`.

pub mod conventional;
pub mod custom;
pub mod github;
pub mod jira;

pub use conventional::{ConventionalFormat, ConventionalResult};
pub use custom::{CustomFormat, CustomResult};
pub use github::{GithubFormat, GithubResult};
pub use jira::{JiraFormat, JiraResult};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FormatConfig;
use crate::prompt::PromptIo;

/// Errors raised while constructing a format handler.
///
/// Validation itself never errors; a malformed message yields an invalid
/// [`ValidationResult`] instead.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The configured `format_type` is not registered.
    #[error("Unknown commit format type: {name}. Valid types: {}", .valid_types.join(", "))]
    UnknownFormatType {
        /// The unrecognized format name.
        name: String,
        /// Names accepted by the registry that was asked.
        valid_types: Vec<String>,
    },

    /// The custom format was selected without a `custom_pattern` setting.
    #[error("No custom_pattern provided in configuration")]
    MissingCustomPattern,

    /// A configured pattern failed to compile.
    #[error("Invalid regular expression in {format} pattern: {source}")]
    InvalidPattern {
        /// Which format's pattern failed.
        format: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// A constructed commit message format handler.
///
/// One instance per configuration; stateless after construction apart from
/// its compiled patterns and config snapshot.
#[derive(Debug)]
pub enum CommitFormat {
    /// Conventional Commits: `type(scope)!: description`.
    Conventional(ConventionalFormat),
    /// GitHub style: short imperative subject plus issue references.
    Github(GithubFormat),
    /// Jira style: `PROJ-123: message`.
    Jira(JiraFormat),
    /// User-supplied regex grammar.
    Custom(CustomFormat),
}

impl CommitFormat {
    /// Validates a commit message. Never fails: malformed input produces an
    /// invalid result carrying at least one error.
    pub fn validate(&self, message: &str) -> ValidationResult {
        match self {
            CommitFormat::Conventional(format) => {
                ValidationResult::Conventional(format.validate(message))
            }
            CommitFormat::Github(format) => ValidationResult::Github(format.validate(message)),
            CommitFormat::Jira(format) => ValidationResult::Jira(format.validate(message)),
            CommitFormat::Custom(format) => ValidationResult::Custom(format.validate(message)),
        }
    }

    /// Interactively builds a message in this format through the given
    /// prompt collaborator.
    pub fn prompt_for_message(
        &self,
        config: &FormatConfig,
        io: &mut dyn PromptIo,
    ) -> Result<String> {
        match self {
            CommitFormat::Conventional(format) => format.prompt_for_message(config, io),
            CommitFormat::Github(format) => format.prompt_for_message(config, io),
            CommitFormat::Jira(format) => format.prompt_for_message(config, io),
            CommitFormat::Custom(format) => format.prompt_for_message(config, io),
        }
    }

    /// The canonical name of this format.
    pub fn format_name(&self) -> &'static str {
        match self {
            CommitFormat::Conventional(_) => conventional::FORMAT_NAME,
            CommitFormat::Github(_) => github::FORMAT_NAME,
            CommitFormat::Jira(_) => jira::FORMAT_NAME,
            CommitFormat::Custom(_) => custom::FORMAT_NAME,
        }
    }
}

/// Outcome of validating one commit message, tagged by format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ValidationResult {
    /// Result of the Conventional Commits handler.
    Conventional(ConventionalResult),
    /// Result of the GitHub style handler.
    Github(GithubResult),
    /// Result of the Jira style handler.
    Jira(JiraResult),
    /// Result of the custom regex handler.
    Custom(CustomResult),
}

impl ValidationResult {
    /// Whether the message passed every check.
    pub fn is_valid(&self) -> bool {
        match self {
            ValidationResult::Conventional(r) => r.valid,
            ValidationResult::Github(r) => r.valid,
            ValidationResult::Jira(r) => r.valid,
            ValidationResult::Custom(r) => r.valid,
        }
    }

    /// The collected rule violations, empty exactly when the result is valid.
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Conventional(r) => &r.errors,
            ValidationResult::Github(r) => &r.errors,
            ValidationResult::Jira(r) => &r.errors,
            ValidationResult::Custom(r) => &r.errors,
        }
    }
}

/// Constructor signature stored in the registry.
pub type FormatConstructor = fn(&FormatConfig) -> Result<CommitFormat, FormatError>;

/// Explicit mapping from format name to handler constructor.
///
/// Built once at startup and owned by the caller; there is no module-level
/// registry state. Tests can construct a registry holding a subset of the
/// formats.
pub struct FormatRegistry {
    entries: Vec<(String, FormatConstructor)>,
}

impl FormatRegistry {
    /// Creates a registry with no formats registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry with the four built-in formats.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(conventional::FORMAT_NAME, |config| {
            Ok(CommitFormat::Conventional(ConventionalFormat::new(config)?))
        });
        registry.register(github::FORMAT_NAME, |config| {
            Ok(CommitFormat::Github(GithubFormat::new(config)?))
        });
        registry.register(jira::FORMAT_NAME, |config| {
            Ok(CommitFormat::Jira(JiraFormat::new(config)?))
        });
        registry.register(custom::FORMAT_NAME, |config| {
            Ok(CommitFormat::Custom(CustomFormat::new(config)?))
        });
        registry
    }

    /// Registers a constructor under a name, replacing any existing entry.
    pub fn register(&mut self, name: impl Into<String>, constructor: FormatConstructor) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = constructor;
        } else {
            self.entries.push((name, constructor));
        }
    }

    /// Looks up the constructor registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<FormatConstructor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, constructor)| *constructor)
    }

    /// Whether a format is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Registered format names, in registration order.
    pub fn format_names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Constructs the handler selected by `config.format_type`.
    pub fn get(&self, config: &FormatConfig) -> Result<CommitFormat, FormatError> {
        let name = &config.format_type;
        let constructor = self
            .lookup(name)
            .ok_or_else(|| FormatError::UnknownFormatType {
                name: name.clone(),
                valid_types: self.format_names(),
            })?;
        constructor(config)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
