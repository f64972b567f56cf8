use crate::cli;
use crate::config::{self, PyqualConfig};
use crate::io::output::{create_writer, OutputWriter};
use crate::sensor::Sensor;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub report_paths: Vec<String>,
    pub report_format: Option<crate::report::ReportFormat>,
    pub repository: Option<String>,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub fail_on_issues: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    Clean,
    IssuesFound,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<AnalyzeOutcome> {
    let pyqual_config = resolve_config(&config)?;
    info!(
        "Analyzing {} (max depth {}, reports {:?})",
        config.path.display(),
        pyqual_config.nesting.max_depth,
        pyqual_config.report.paths
    );

    let report = Sensor::new(pyqual_config)
        .run(&config.path)
        .with_context(|| format!("Failed to analyze {}", config.path.display()))?;

    let sink: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    create_writer(config.format.into(), sink).write_report(&report)?;

    if config.fail_on_issues && !report.issues.is_empty() {
        Ok(AnalyzeOutcome::IssuesFound)
    } else {
        Ok(AnalyzeOutcome::Clean)
    }
}

/// Load the config file, then apply command-line overrides.
pub fn resolve_config(config: &AnalyzeConfig) -> Result<PyqualConfig> {
    let mut resolved = match &config.config {
        Some(path) => config::load_config_from_path(path)?,
        None => {
            let start = config
                .path
                .canonicalize()
                .unwrap_or_else(|_| config.path.clone());
            config::load_config(&start)
        }
    };

    if let Some(max_depth) = config.max_depth {
        resolved.nesting.max_depth = max_depth;
    }
    if !config.report_paths.is_empty() {
        resolved.report.paths = config.report_paths.clone();
    }
    if let Some(format) = config.report_format {
        resolved.report.format = format;
    }
    if let Some(repository) = &config.repository {
        resolved.report.repository = repository.clone();
    }

    resolved.validate()?;
    Ok(resolved)
}
