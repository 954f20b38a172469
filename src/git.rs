//! Git invocation helpers.

use std::collections::BTreeSet;
use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// Queries the checks need from the repository.
pub trait GitRepo {
    /// Configured `user.email`, untrimmed.
    fn user_email(&self) -> Result<String, Error>;

    /// Files added in the index, de-duplicated and sorted.
    fn staged_added_files(&self) -> Result<Vec<String>, Error>;
}

/// `GitRepo` backed by the `git` executable in the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRepo for SystemGit {
    fn user_email(&self) -> Result<String, Error> {
        cmd_output("git", &["config", "user.email"], Some(0))
    }

    fn staged_added_files(&self) -> Result<Vec<String>, Error> {
        let out = cmd_output(
            "git",
            &["diff", "--staged", "--name-only", "-z", "--diff-filter=A"],
            Some(0),
        )?;
        let files: BTreeSet<String> = zsplit(&out).into_iter().collect();
        Ok(files.into_iter().collect())
    }
}

/// Run a command and return its stdout.
///
/// With `retcode` set, any other exit status is a `HostCommand` error
/// carrying the captured output.
pub fn cmd_output(program: &str, args: &[&str], retcode: Option<i32>) -> Result<String, Error> {
    debug!(program, ?args, "Running command");
    let output = Command::new(program).args(args).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if let Some(expected) = retcode {
        let actual = output.status.code();
        if actual != Some(expected) {
            let mut command = program.to_string();
            for arg in args {
                command.push(' ');
                command.push_str(arg);
            }
            return Err(Error::HostCommand {
                command,
                expected,
                actual,
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
    }

    Ok(stdout)
}

/// Split NUL-separated command output.
pub fn zsplit(s: &str) -> Vec<String> {
    let s = s.trim_matches('\0');
    if s.is_empty() {
        return Vec::new();
    }
    s.split('\0').map(str::to_string).collect()
}
