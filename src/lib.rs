//! commit-gate library.
//!
//! Commit-gate checks for pre-commit hooks: committer email domains and
//! prohibited staged filenames.

pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod git;
pub mod matcher;

pub use error::Error;
pub use matcher::{find_prohibited, Matcher, Report, RuleSources, ScanMode};
