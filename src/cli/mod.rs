//! CLI commands for commit-gate.

pub mod email;
pub mod filenames;
pub mod hooks;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::matcher::OutputFormat;

/// commit-gate - pre-commit checks for committer email and prohibited files
#[derive(Parser, Debug)]
#[command(name = "commit-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fail if any staged filename is prohibited
    CheckFilenames(FilenamesArgs),

    /// Fail if the committer email domain is not allowed
    CheckEmail(EmailArgs),

    /// Install the pre-commit hook in this repository
    InstallHook {
        /// Rewrite the managed section even if present
        #[arg(long, short)]
        force: bool,
    },

    /// Remove the pre-commit hook section from this repository
    UninstallHook,
}

#[derive(Args, Debug, Default)]
pub struct FilenamesArgs {
    /// Exact filenames to prohibit (comma separated, repeatable)
    #[arg(long = "filenames", visible_alias = "prohibited-filenames", value_name = "LIST")]
    pub filenames: Vec<String>,

    /// Glob patterns to prohibit, e.g. `*.pem,**/secrets/*` (comma separated, repeatable)
    #[arg(long = "patterns", visible_alias = "prohibited-patterns", value_name = "LIST")]
    pub patterns: Vec<String>,

    /// Regular expression to prohibit (repeatable)
    #[arg(long = "regex", value_name = "RE")]
    pub regexes: Vec<String>,

    /// Stop at the first prohibited filename
    #[arg(long)]
    pub fail_fast: bool,

    /// Report each filename once, even if several rule sets flag it
    #[arg(long)]
    pub dedupe: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file (defaults to .commit-gate.toml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Filenames to check (defaults to files added in the index)
    pub files: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct EmailArgs {
    /// Allowed email domains (comma or space separated)
    #[arg(long, num_args = 1.., value_name = "DOMAIN")]
    pub allowed_domains: Vec<String>,

    /// Config file (defaults to .commit-gate.toml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Flatten comma-separated values, trimming items and dropping empty ones.
pub fn split_list<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
