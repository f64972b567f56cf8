mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::analyzers::DEFAULT_MAX_DEPTH;
use crate::core::errors::{Error, Result};
use crate::core::Severity;
use crate::report::{ReportFormat, DEFAULT_REPOSITORY};
use serde::{Deserialize, Serialize};

/// Default glob for external report files, relative to the project root.
pub const DEFAULT_REPORT_PATH: &str = "*-report*.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PyqualConfig {
    #[serde(default)]
    pub nesting: NestingConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NestingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_nesting_severity")]
    pub severity: Severity,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_depth: default_max_depth(),
            severity: default_nesting_severity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Globs locating report files, relative to the project root.
    #[serde(default = "default_report_paths")]
    pub paths: Vec<String>,

    /// Repository key the report's rule ids belong to.
    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default)]
    pub format: ReportFormat,

    /// Rule ids from the external tool that should produce issues.
    #[serde(default)]
    pub rules: Vec<ExternalRule>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            paths: default_report_paths(),
            repository: default_repository(),
            format: ReportFormat::default(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalRule {
    pub id: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

const fn default_true() -> bool {
    true
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

const fn default_nesting_severity() -> Severity {
    Severity::Critical
}

fn default_report_paths() -> Vec<String> {
    vec![DEFAULT_REPORT_PATH.to_string()]
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

impl PyqualConfig {
    pub fn validate(&self) -> Result<()> {
        if self.nesting.max_depth == 0 {
            return Err(Error::configuration("nesting.max_depth must be at least 1"));
        }
        if self.report.repository.trim().is_empty() {
            return Err(Error::configuration("report.repository must not be empty"));
        }
        if let Some(rule) = self.report.rules.iter().find(|r| r.id.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "report.rules contains an empty rule id (severity {})",
                rule.severity
            )));
        }
        for pattern in self.report.paths.iter().chain(&self.ignore.patterns) {
            glob::Pattern::new(pattern)?;
        }
        Ok(())
    }

    /// Render as TOML, as written by `pyqual init`.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to serialize config: {e}")))
    }
}
