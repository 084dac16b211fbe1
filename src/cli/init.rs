//! Init command — writes a default configuration file.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::{DEFAULT_TYPES, PYPROJECT_FILE};
use crate::format::FormatRegistry;

/// Init command options.
#[derive(Parser)]
pub struct InitCommand {
    /// Output config file path.
    #[arg(long, short, default_value = "pyproject.toml")]
    pub output: PathBuf,

    /// Commit format type (conventional, github, jira, custom).
    #[arg(long, short, default_value = "conventional")]
    pub format_type: String,
}

impl InitCommand {
    /// Writes default settings for the chosen format, merging into
    /// `pyproject.toml`, or writing a standalone TOML (or YAML) file.
    pub fn execute(self) -> Result<()> {
        let registry = FormatRegistry::builtin();
        if !registry.contains(&self.format_type) {
            bail!(
                "Invalid format type: {}. Valid formats: {}",
                self.format_type,
                registry.format_names().join(", ")
            );
        }

        let config_table = default_config_table(&self.format_type);

        let file_name = self.output.file_name().and_then(|n| n.to_str());
        let extension = self.output.extension().and_then(|e| e.to_str());

        if file_name == Some(PYPROJECT_FILE) {
            write_pyproject(&self.output, config_table)?;
        } else if matches!(extension, Some("yaml") | Some("yml")) {
            let rendered = serde_yaml::to_string(&config_table)
                .context("Failed to serialize configuration to YAML")?;
            fs::write(&self.output, rendered)
                .with_context(|| format!("Failed to write {}", self.output.display()))?;
        } else {
            let rendered = toml::to_string_pretty(&config_table)
                .context("Failed to serialize configuration to TOML")?;
            fs::write(&self.output, rendered)
                .with_context(|| format!("Failed to write {}", self.output.display()))?;
        }

        println!("Configuration created at {}", self.output.display());
        Ok(())
    }
}

/// Default settings per format, mirroring each handler's documented
/// defaults.
fn default_config_table(format_type: &str) -> toml::Table {
    let mut table = toml::Table::new();
    table.insert("format_type".to_string(), format_type.into());

    match format_type {
        "conventional" => {
            table.insert(
                "types".to_string(),
                toml::Value::Array(DEFAULT_TYPES.iter().map(|t| (*t).into()).collect()),
            );
            table.insert("max_subject_length".to_string(), toml::Value::Integer(100));
            table.insert("subject_case".to_string(), "lower".into());
            table.insert("scope_required".to_string(), false.into());
            table.insert(
                "allowed_breaking_changes".to_string(),
                toml::Value::Array(vec!["feat".into(), "fix".into()]),
            );
            table.insert("no_period_end".to_string(), true.into());
        }
        "github" => {
            table.insert("max_subject_length".to_string(), toml::Value::Integer(72));
            table.insert("imperative_mood".to_string(), true.into());
            table.insert("issue_reference_required".to_string(), false.into());
            table.insert(
                "keywords".to_string(),
                toml::Value::Array(vec!["Fixes".into(), "Closes".into(), "Resolves".into()]),
            );
        }
        "jira" => {
            table.insert(
                "jira_project_keys".to_string(),
                toml::Value::Array(vec!["PROJ".into()]),
            );
            table.insert("require_issue_id".to_string(), true.into());
            table.insert("max_message_length".to_string(), toml::Value::Integer(72));
        }
        // The custom format has no sensible defaults beyond the format type;
        // the user must supply custom_pattern themselves.
        _ => {}
    }

    table
}

/// Merges the config table into `[tool.commit_lint]` of a pyproject.toml,
/// preserving the rest of the document.
fn write_pyproject(path: &Path, config_table: toml::Table) -> Result<()> {
    let mut document: toml::Value = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Error reading existing {}", path.display()))?
    } else {
        toml::Value::Table(toml::Table::new())
    };

    let root = document
        .as_table_mut()
        .context("pyproject.toml root is not a table")?;
    let tool = root
        .entry("tool".to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let tool_table = tool
        .as_table_mut()
        .context("[tool] in pyproject.toml is not a table")?;
    tool_table.insert("commit_lint".to_string(), toml::Value::Table(config_table));

    let rendered =
        toml::to_string_pretty(&document).context("Failed to serialize pyproject.toml")?;
    fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
