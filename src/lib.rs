//! # commit-lint
//!
//! A configurable linter and interactive builder for commit messages.
//!
//! Supported message formats:
//!
//! - `conventional`: Conventional Commits (<https://www.conventionalcommits.org>)
//! - `github`: GitHub style commit messages with issue references
//! - `jira`: Jira-style commit messages with ticket IDs
//! - `custom`: project-specific formats defined by a regex pattern

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod format;
pub mod git;
pub mod prompt;

pub use crate::cli::Cli;

/// The current version of commit-lint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
