//! Interactive prompt plumbing for the message builders.
//!
//! Builders only define the question sequence; the actual I/O goes through
//! the [`PromptIo`] trait so the sequence is testable without a terminal.

pub mod script;
pub mod terminal;

pub use script::{ScriptedAnswer, ScriptedPrompt};
pub use terminal::TerminalPrompt;

use anyhow::Result;

/// A single selectable option presented by [`PromptIo::ask_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Human-readable label shown to the user.
    pub label: String,
    /// Value returned when this option is selected.
    pub value: String,
}

impl Choice {
    /// Creates a choice from a label and the value it stands for.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Blocking prompt collaborator used by the message builders.
///
/// Each method blocks until the user answers. Aborted input (end of input,
/// interrupted terminal) surfaces as an error, which callers treat as
/// cancellation of the whole build.
pub trait PromptIo {
    /// Asks for a single line of free text. May return an empty string.
    fn ask_text(&mut self, prompt: &str) -> Result<String>;

    /// Asks the user to pick one option, returning the chosen value.
    fn ask_choice(&mut self, prompt: &str, choices: &[Choice]) -> Result<String>;

    /// Asks a yes/no question with a default answer.
    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Collects multi-line free text. Entry stops at the first empty line
    /// after content has been entered; leading empty lines are skipped.
    fn ask_multiline(&mut self, prompt: &str) -> Result<String>;
}
