//! Configuration loading and discovery.
//!
//! Configuration is sourced from a `[tool.commit_lint]` table in
//! `pyproject.toml` or from a standalone `commit-lint.toml`, searched from
//! the current directory upwards. The parsed snapshot is handed to the
//! format handlers, which only ever read it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the standalone configuration file.
pub const STANDALONE_CONFIG_FILE: &str = "commit-lint.toml";

/// File name of the shared project manifest that may embed a
/// `[tool.commit_lint]` table.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// The eleven standard Conventional Commit types.
pub const DEFAULT_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Required case of the first character of a subject description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCase {
    /// Description must start with a lowercase character.
    #[default]
    Lower,
    /// Description must start with an uppercase character.
    Upper,
    /// No case requirement.
    Any,
}

/// Parsed configuration snapshot consumed by the format handlers.
///
/// Every key is optional in the file; missing keys take the documented
/// defaults. Keys are format-specific — a handler only reads the keys it
/// knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Which format handler to use: `conventional`, `github`, `jira`, `custom`.
    pub format_type: String,
    /// Valid commit types (conventional). Empty list disables the check.
    pub types: Vec<String>,
    /// Maximum subject line length (conventional: 100, github: 72).
    pub max_subject_length: Option<usize>,
    /// Case style for the first character of the description (conventional).
    pub subject_case: SubjectCase,
    /// Whether a scope is required (conventional).
    pub scope_required: bool,
    /// Allowed scopes (conventional). Absent or empty allows any scope.
    pub allowed_scopes: Option<Vec<String>>,
    /// Whether a body is required (conventional).
    pub body_required: bool,
    /// Whether a footer is required (conventional).
    pub footer_required: bool,
    /// Types allowed to carry the `!` breaking-change marker (conventional).
    pub allowed_breaking_changes: Vec<String>,
    /// Whether the description must not end with a period (conventional).
    pub no_period_end: bool,
    /// Whether the subject must use imperative mood (github).
    pub imperative_mood: bool,
    /// Whether an issue reference is required (github).
    pub issue_reference_required: bool,
    /// Issue reference keywords (github).
    pub keywords: Vec<String>,
    /// Allowed Jira project keys (jira). Empty allows any project key.
    pub jira_project_keys: Vec<String>,
    /// Whether a Jira issue ID is required (jira).
    pub require_issue_id: bool,
    /// Maximum message length after the issue ID (jira, default 72).
    pub max_message_length: Option<usize>,
    /// Regex pattern with named capture groups (custom, required there).
    pub custom_pattern: Option<String>,
    /// Template with `{group}` placeholders for message assembly (custom).
    pub message_template: Option<String>,
    /// Prompt text per named capture group (custom).
    pub prompts: HashMap<String, String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            format_type: "conventional".to_string(),
            types: DEFAULT_TYPES.iter().map(ToString::to_string).collect(),
            max_subject_length: None,
            subject_case: SubjectCase::Lower,
            scope_required: false,
            allowed_scopes: None,
            body_required: false,
            footer_required: false,
            allowed_breaking_changes: vec!["feat".to_string(), "fix".to_string()],
            no_period_end: true,
            imperative_mood: true,
            issue_reference_required: false,
            keywords: vec![
                "Fixes".to_string(),
                "Closes".to_string(),
                "Resolves".to_string(),
            ],
            jira_project_keys: Vec::new(),
            require_issue_id: true,
            max_message_length: None,
            custom_pattern: None,
            message_template: None,
            prompts: HashMap::new(),
        }
    }
}

/// Loads configuration from an explicit path, or discovers it.
///
/// With an explicit path, a missing or unparseable file is an error. Without
/// one, candidates are searched from the current directory upwards and the
/// built-in defaults are used when nothing matches.
pub fn load_config(explicit: Option<&Path>) -> Result<FormatConfig> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            Ok(search_config(&cwd))
        }
    }
}

/// Loads configuration from a specific file path.
pub fn load_from_path(path: &Path) -> Result<FormatConfig> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }
    parse_config_file(path)
}

/// Returns candidate config paths in priority order, searching `start` and
/// all its ancestors. `pyproject.toml` wins over `commit-lint.toml` within
/// each directory.
pub fn config_search_paths(start: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in start.ancestors() {
        paths.push(dir.join(PYPROJECT_FILE));
        paths.push(dir.join(STANDALONE_CONFIG_FILE));
    }
    paths
}

fn search_config(start: &Path) -> FormatConfig {
    for path in config_search_paths(start) {
        if !path.is_file() {
            continue;
        }
        match parse_config_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded commit-lint configuration");
                return config;
            }
            Err(err) => {
                // Unusable candidates (parse errors, no commit_lint table) are
                // skipped so an unrelated pyproject.toml does not end the search.
                tracing::debug!(path = %path.display(), error = %err, "skipping config candidate");
                continue;
            }
        }
    }

    FormatConfig::default()
}

fn parse_config_file(path: &Path) -> Result<FormatConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if path.file_name().and_then(|n| n.to_str()) == Some(PYPROJECT_FILE) {
        extract_from_pyproject(&content)
            .with_context(|| format!("Error parsing {}", path.display()))
    } else {
        toml::from_str(&content).with_context(|| format!("Error parsing {}", path.display()))
    }
}

/// Extracts the `[tool.commit_lint]` table from pyproject.toml content.
fn extract_from_pyproject(content: &str) -> Result<FormatConfig> {
    let document: toml::Value = toml::from_str(content)?;

    let table = document
        .get("tool")
        .and_then(|tool| tool.get("commit_lint"))
        .ok_or_else(|| anyhow!("no [tool.commit_lint] table"))?;

    // Round-trip through a TOML string so the sub-table deserializes with
    // the same defaulting rules as a standalone file.
    let rendered = toml::to_string(table).context("Failed to re-serialize config table")?;
    Ok(toml::from_str(&rendered)?)
}
