//! Git pre-commit hook installation and management.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

/// Managed block markers.
const BLOCK_START: &str = "# START commit-gate managed section";
const BLOCK_END: &str = "# END commit-gate managed section";

const SHEBANG: &str = "#!/bin/sh";

/// Commands run by the managed section. Both read `.commit-gate.toml`.
const HOOK_COMMANDS: &str = "commit-gate check-email || exit 1\ncommit-gate check-filenames || exit 1";

/// What `install_hook` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Updated,
    AlreadyInstalled,
    NoGit,
}

fn managed_block() -> String {
    format!("{}\n{}\n{}", BLOCK_START, HOOK_COMMANDS, BLOCK_END)
}

/// Path of the pre-commit hook for a project.
pub fn hook_path(project_root: &Path) -> PathBuf {
    project_root.join(".git").join("hooks").join("pre-commit")
}

/// Check if git is initialized in the project.
pub fn has_git(project_root: &Path) -> bool {
    project_root.join(".git").is_dir()
}

/// Install the managed section, preserving any existing hook content.
///
/// With `force`, an existing managed section is rewritten in place.
pub fn install_hook(project_root: &Path, force: bool) -> Result<InstallOutcome, Error> {
    if !has_git(project_root) {
        return Ok(InstallOutcome::NoGit);
    }

    let path = hook_path(project_root);
    if let Some(hooks_dir) = path.parent() {
        fs::create_dir_all(hooks_dir)?;
    }

    let (content, outcome) = if path.exists() {
        let existing = fs::read_to_string(&path)?;
        match (block_range(&existing), force) {
            (Some(_), false) => return Ok(InstallOutcome::AlreadyInstalled),
            (Some((start, end)), true) => (
                format!("{}{}{}", &existing[..start], managed_block(), &existing[end..]),
                InstallOutcome::Updated,
            ),
            (None, _) => (
                format!("{}\n\n{}\n", existing.trim_end(), managed_block()),
                InstallOutcome::Installed,
            ),
        }
    } else {
        (
            format!("{}\n\n{}\n", SHEBANG, managed_block()),
            InstallOutcome::Installed,
        )
    };

    fs::write(&path, content)?;
    make_executable(&path)?;
    info!(path = %path.display(), ?outcome, "Installed pre-commit hook");

    Ok(outcome)
}

/// Remove the managed section. Deletes the hook if nothing else is left.
pub fn uninstall_hook(project_root: &Path) -> Result<bool, Error> {
    let path = hook_path(project_root);
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    let Some((start, end)) = block_range(&content) else {
        return Ok(false);
    };

    let remaining = format!(
        "{}\n{}",
        content[..start].trim_end(),
        content[end..].trim_start()
    );
    let remaining = remaining.trim();

    if remaining.is_empty() || remaining == SHEBANG {
        fs::remove_file(&path)?;
    } else {
        fs::write(&path, format!("{}\n", remaining))?;
    }
    info!(path = %path.display(), "Removed commit-gate hook section");

    Ok(true)
}

/// Byte range of the managed block, end marker included.
fn block_range(content: &str) -> Option<(usize, usize)> {
    let start = content.find(BLOCK_START)?;
    let end = content[start..].find(BLOCK_END)? + start + BLOCK_END.len();
    Some((start, end))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}
