//! Data types for external violation reports.
//!
//! All types here are plain data. Decoding lives in [`super::grammar`],
//! resolution in [`super::ingest`].

use crate::core::Issue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw text of one report file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSource {
    /// Name used in diagnostics, usually the report's path.
    pub name: String,
    pub text: String,
}

impl ReportSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One decoded record from an external report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub file_path: String,
    pub line: usize,
    pub rule_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    FileNotFound,
    RuleNotActive,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::FileNotFound => write!(f, "file not found"),
            SkipReason::RuleNotActive => write!(f, "rule not active"),
        }
    }
}

/// Emitted instead of an [`Issue`] when a report line's file or rule does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReport {
    pub reason: SkipReason,
    /// The unresolved file path or rule id.
    pub detail: String,
}

impl SkippedReport {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self {
            reason: SkipReason::FileNotFound,
            detail: path.into(),
        }
    }

    pub fn rule_not_active(rule_id: impl Into<String>) -> Self {
        Self {
            reason: SkipReason::RuleNotActive,
            detail: rule_id.into(),
        }
    }
}

/// A report record that could not be decoded. Returned as data; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("malformed record in {report} at line {record_line}: {reason}")]
pub struct MalformedRecord {
    pub report: String,
    /// 1-based line within the report file.
    pub record_line: usize,
    pub content: String,
    pub reason: String,
}

/// Everything produced by one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResult {
    pub issues: Vec<Issue>,
    pub skipped: Vec<SkippedReport>,
    pub malformed: Vec<MalformedRecord>,
}

impl IngestResult {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.skipped.is_empty() && self.malformed.is_empty()
    }

    /// Number of decoded records; each yields exactly one issue or skip.
    pub fn records(&self) -> usize {
        self.issues.len() + self.skipped.len()
    }
}
