//! Scripted prompt answers for tests and non-interactive automation.
//!
//! [`ScriptedPrompt`] replays a pre-recorded answer sequence and fails when
//! the builder asks a question of a different kind than the script expects,
//! which pins the exact question ordering of every builder.

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};

use super::{Choice, PromptIo};

/// One pre-recorded answer for [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Answer to [`PromptIo::ask_text`].
    Text(String),
    /// Answer to [`PromptIo::ask_choice`]; must be one of the offered values.
    Choice(String),
    /// Answer to [`PromptIo::ask_confirm`].
    Confirm(bool),
    /// Answer to [`PromptIo::ask_multiline`].
    Multiline(String),
}

impl ScriptedAnswer {
    /// Shorthand for a text answer.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Shorthand for a choice answer.
    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    /// Shorthand for a multi-line answer.
    pub fn multiline(value: impl Into<String>) -> Self {
        Self::Multiline(value.into())
    }
}

/// Prompt collaborator that replays scripted answers in order.
pub struct ScriptedPrompt {
    answers: VecDeque<ScriptedAnswer>,
    transcript: Vec<String>,
}

impl ScriptedPrompt {
    /// Creates a scripted prompt from an answer sequence.
    pub fn new(answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into(),
            transcript: Vec::new(),
        }
    }

    /// Returns true once every scripted answer has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    /// The prompts that were asked, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn next_answer(&mut self, prompt: &str) -> Result<ScriptedAnswer> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer left for prompt: {prompt}"))
    }
}

impl PromptIo for ScriptedPrompt {
    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Text(value) => Ok(value),
            other => bail!("Expected a text answer for prompt '{prompt}', got {other:?}"),
        }
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[Choice]) -> Result<String> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Choice(value) => {
                if choices.iter().any(|c| c.value == value) {
                    Ok(value)
                } else {
                    bail!("Scripted choice '{value}' is not offered by prompt '{prompt}'")
                }
            }
            other => bail!("Expected a choice answer for prompt '{prompt}', got {other:?}"),
        }
    }

    fn ask_confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Confirm(value) => Ok(value),
            other => bail!("Expected a confirm answer for prompt '{prompt}', got {other:?}"),
        }
    }

    fn ask_multiline(&mut self, prompt: &str) -> Result<String> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Multiline(value) => Ok(value),
            other => bail!("Expected a multiline answer for prompt '{prompt}', got {other:?}"),
        }
    }
}
