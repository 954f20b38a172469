//! Error types for commit-gate.

use std::path::PathBuf;

use thiserror::Error;

/// Commit-gate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(
        "Command `{command}` returned {} (expected {expected})\nstdout: {stdout}\nstderr: {stderr}",
        describe_status(.actual)
    )]
    HostCommand {
        command: String,
        expected: i32,
        actual: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Could not get local Git user email: {0}")]
    EmailLookup(#[source] Box<Error>),
}

impl Error {
    /// True for errors caused by the caller's rule configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidRegex { .. }
                | Error::InvalidGlob { .. }
                | Error::ConfigNotFound(_)
                | Error::ConfigParse(_)
        )
    }
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "no exit code".to_string(),
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}
