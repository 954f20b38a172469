//! Project configuration.
//!
//! Handles loading `.commit-gate.toml`. Every field is optional, and values
//! given on the command line are appended to the configured lists.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".commit-gate.toml";

/// Project configuration stored in `.commit-gate.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prohibited filename rules.
    #[serde(default)]
    pub filenames: FilenamesConfig,

    /// Committer email rules.
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenamesConfig {
    /// Exact basenames.
    #[serde(default)]
    pub prohibited: Vec<String>,

    /// Glob patterns.
    #[serde(default)]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub regexes: Vec<String>,

    /// Stop at the first violation.
    #[serde(default)]
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub allowed_domains: Vec<String>,
}

impl Config {
    /// Get the config file path for a project.
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Load config from a project directory, or defaults if it has none.
    pub fn load(project_root: &Path) -> Result<Self, Error> {
        let path = Self::path(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Explicit file if given, otherwise the working directory's file.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(&std::env::current_dir()?),
        }
    }
}
