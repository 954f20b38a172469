//! Violation records and their rendering.

use std::collections::HashSet;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::rule::RuleKind;
use crate::error::Error;

/// Prefix of the consolidated violation line.
pub const REPORT_PREFIX: &str = "Prohibited filename(s) found:";

/// How far a check runs once a violation is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Scan every candidate and collect every hit.
    #[default]
    Batch,
    /// Stop at the first hit across the whole candidate list.
    FailFast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One candidate flagged by one rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub candidate: String,
    pub kind: RuleKind,
}

/// Ordered hits for a batch of candidates.
///
/// A candidate flagged by several rule sets appears once per rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    hits: Vec<Hit>,
}

impl Report {
    pub fn push(&mut self, candidate: &str, kind: RuleKind) {
        self.hits.push(Hit {
            candidate: candidate.to_string(),
            kind,
        });
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
    }

    pub fn is_clean(&self) -> bool {
        self.hits.is_empty()
    }

    /// 0 when nothing was flagged, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }

    /// Keep only the first hit for each candidate.
    pub fn dedupe(self) -> Self {
        let mut seen = HashSet::new();
        let hits = self
            .hits
            .into_iter()
            .filter(|hit| seen.insert(hit.candidate.clone()))
            .collect();
        Self { hits }
    }

    /// Single-line summary, `None` when clean.
    pub fn render_text(&self) -> Option<String> {
        if self.is_clean() {
            return None;
        }
        let names: Vec<&str> = self.hits.iter().map(|h| h.candidate.as_str()).collect();
        Some(format!("{} {}", REPORT_PREFIX, names.join(", ")))
    }

    pub fn render_json(&self) -> Result<Option<String>, Error> {
        if self.is_clean() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(self)?))
    }

    /// Write the report to `out`. Writes nothing for a clean report.
    pub fn write_to(&self, out: &mut dyn Write, format: OutputFormat) -> Result<(), Error> {
        let rendered = match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json()?,
        };
        if let Some(line) = rendered {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
