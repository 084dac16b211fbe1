//! Git hook scripts installed by `commit-lint install`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name a detected pre-commit framework hook is backed up under, so
/// our pre-commit script can chain to it.
pub const FRAMEWORK_HOOK_BACKUP: &str = ".pre-commit-hook";

/// pre-commit hook: chains any backed-up pre-commit framework hook, then
/// hands interactive message creation to `commit-lint commit`. Commits made
/// with `-m` are left to the commit-msg hook.
pub const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
# pre-commit hook installed by commit-lint

FRAMEWORK_HOOK=".git/hooks/.pre-commit-hook"

if [ -x "$FRAMEWORK_HOOK" ]; then
    "$FRAMEWORK_HOOK" || exit $?
fi

# A message passed with -m is linted by the commit-msg hook instead.
git_orig_cmd=$(ps -ocommand= -p $PPID)
if echo "$git_orig_cmd" | grep -q -- " -m "; then
    exit 0
fi

# Guard against recursion from our own `git commit` invocation.
if [ -n "$COMMIT_LINT_IN_PROGRESS" ]; then
    exit 0
fi

export COMMIT_LINT_IN_PROGRESS=1
exec commit-lint commit
"#;

/// commit-msg hook: lints the message file non-interactively.
pub const COMMIT_MSG_HOOK: &str = r#"#!/bin/sh
# commit-msg hook installed by commit-lint

if [ -n "$COMMIT_LINT_IN_PROGRESS" ]; then
    exit 0
fi

exec commit-lint lint "$1" --no-interactive
"#;

/// Writes both hook scripts into `hooks_dir` and marks them executable.
/// Returns the written paths (pre-commit, commit-msg).
pub fn install_hooks(hooks_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(hooks_dir)
        .with_context(|| format!("Failed to create hooks directory: {}", hooks_dir.display()))?;

    let pre_commit_path = hooks_dir.join("pre-commit");
    let commit_msg_path = hooks_dir.join("commit-msg");

    fs::write(&pre_commit_path, PRE_COMMIT_HOOK)
        .with_context(|| format!("Failed to write hook: {}", pre_commit_path.display()))?;
    fs::write(&commit_msg_path, COMMIT_MSG_HOOK)
        .with_context(|| format!("Failed to write hook: {}", commit_msg_path.display()))?;

    make_executable(&pre_commit_path)?;
    make_executable(&commit_msg_path)?;

    Ok((pre_commit_path, commit_msg_path))
}

/// Marks a hook script executable. No-op on platforms without unix
/// permission bits.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {} executable", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
