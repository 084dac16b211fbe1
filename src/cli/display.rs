//! Shared display formatting helpers for CLI commands.

use std::fmt;

use crate::format::ValidationResult;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Returns an ANSI-colored line for a message that passed validation.
pub(crate) fn valid_banner() -> &'static str {
    "\x1b[32mCommit message is valid!\x1b[0m"
}

/// Returns an ANSI-colored heading for a failed validation.
pub(crate) fn invalid_banner() -> &'static str {
    "\x1b[31mCommit message validation failed:\x1b[0m"
}

/// Returns an ANSI-colored warning heading with the given text.
pub(crate) fn warning_banner(text: &str) -> String {
    format!("\x1b[33m\u{26a0}\u{fe0f}  {text}\x1b[0m")
}

/// Prints the collected validation errors as a bullet list.
pub(crate) fn print_errors(result: &ValidationResult) {
    for error in result.errors() {
        println!("  \u{2022} {error}");
    }
}

/// Prints a message inside a simple titled panel.
pub(crate) fn print_panel(title: &str, body: &str) {
    println!("---- {title} ----");
    for line in body.lines() {
        println!("  {line}");
    }
    println!("----");
}

/// Banner shown before an interactive message builder starts.
pub(crate) fn builder_banner(format_name: &str) -> &'static str {
    match format_name {
        "conventional" => "Create a Conventional Commit message",
        "github" => "Create a GitHub style commit message",
        "jira" => "Create a Jira-style commit message",
        "custom" => "Create a custom format commit message",
        _ => "Create a commit message",
    }
}
