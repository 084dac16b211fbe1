//! Git plumbing: repository discovery, staging and hook-respecting commits.

pub mod hooks;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use git2::{Repository, Status, StatusOptions};

/// Index status flags that mark a file as staged for commit.
const STAGED_STATUSES: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

/// Discovers the repository containing the current directory.
pub fn discover_repository() -> Result<Repository> {
    Repository::discover(".").context("Not a Git repository (or .git directory not found)")
}

/// Lists the paths currently staged for commit.
pub fn staged_files(repo: &Repository) -> Result<Vec<String>> {
    let mut options = StatusOptions::new();
    options.include_untracked(false);

    let statuses = repo
        .statuses(Some(&mut options))
        .context("Failed to read repository status")?;

    let staged = statuses
        .iter()
        .filter(|entry| entry.status().intersects(STAGED_STATUSES))
        .filter_map(|entry| entry.path().map(String::from))
        .collect();

    Ok(staged)
}

/// Stages every change in the working tree, like `git add -A`.
pub fn stage_all(repo: &Repository) -> Result<()> {
    let mut index = repo.index().context("Failed to open repository index")?;
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .context("Failed to stage changes")?;
    index.write().context("Failed to write repository index")?;
    Ok(())
}

/// Runs `git commit -F <file>` through the git binary so that installed
/// hooks still execute, unlike a libgit2 commit.
pub fn commit_with_message_file(message_file: &Path, no_verify: bool) -> Result<Output> {
    let mut command = Command::new("git");
    command.arg("commit").arg("-F").arg(message_file);
    if no_verify {
        command.arg("--no-verify");
    }

    tracing::debug!(no_verify, "running git commit");
    command.output().context("Failed to run git commit")
}

/// Returns the hooks directory of the discovered repository.
pub fn hooks_dir() -> Result<PathBuf> {
    let repo = discover_repository()?;
    Ok(repo.path().join("hooks"))
}
