//! Host-side orchestration of a pyqual run.
//!
//! The sensor walks a project, runs the nesting check over every Python file
//! in parallel, imports external reports, and forwards the surviving issues to
//! an [`IssueSink`] in a stable order.

use crate::analyzers::{analyze_file, NestingAnalyzer};
use crate::config::PyqualConfig;
use crate::core::errors::{Error, Result};
use crate::core::Issue;
use crate::io::read_file_lossy;
use crate::io::reports::{find_reports, read_reports};
use crate::io::walker::FileWalker;
use crate::project::ProjectFiles;
use crate::report::{MalformedRecord, ReportIngester, SkipReason, SkippedReport};
use crate::rules::{nesting_rule_key, RuleRegistry};
use crate::suppression::suppressed_lines;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Receives the issues produced by a run.
pub trait IssueSink {
    fn add_issue(&mut self, issue: Issue);
}

/// Collects issues in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    pub issues: Vec<Issue>,
}

impl IssueSink for VecSink {
    fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }
}

impl IssueSink for Vec<Issue> {
    fn add_issue(&mut self, issue: Issue) {
        self.push(issue);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SensorSummary {
    pub files_analyzed: usize,
    pub reports_read: usize,
    pub issues: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub suppressed: usize,
}

/// Everything a run produced, in a form the output writers can render.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub project_path: PathBuf,
    pub summary: SensorSummary,
    pub issues: Vec<Issue>,
    pub skipped: Vec<SkippedReport>,
    pub malformed: Vec<MalformedRecord>,
}

/// Per-file outcome of the parallel analysis phase.
struct AnalyzedFile {
    path: PathBuf,
    issues: Vec<Issue>,
    suppressed: BTreeSet<usize>,
}

#[derive(Default)]
struct Diagnostics {
    skipped: Vec<SkippedReport>,
    malformed: Vec<MalformedRecord>,
}

pub struct Sensor {
    config: PyqualConfig,
}

impl Sensor {
    pub fn new(config: PyqualConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, root: &Path, sink: &mut dyn IssueSink) -> Result<SensorSummary> {
        let (summary, issues, _) = self.collect(root)?;
        for issue in issues {
            sink.add_issue(issue);
        }
        Ok(summary)
    }

    /// Run the sensor and keep its diagnostics alongside the issues.
    pub fn run(&self, root: &Path) -> Result<AnalysisReport> {
        let project_path = canonical_root(root)?;
        let (summary, issues, diagnostics) = self.collect(&project_path)?;
        Ok(AnalysisReport {
            project_path,
            summary,
            issues,
            skipped: diagnostics.skipped,
            malformed: diagnostics.malformed,
        })
    }

    fn collect(&self, root: &Path) -> Result<(SensorSummary, Vec<Issue>, Diagnostics)> {
        let start = Instant::now();
        let root = canonical_root(root)?;

        let paths = FileWalker::new(root.clone())
            .with_ignore_patterns(&self.config.ignore.patterns)
            .map_err(|e| Error::configuration(e.to_string()))?
            .walk()
            .map_err(|e| Error::file_system(format!("Failed to walk project: {e}"), &root))?;
        info!("Found {} Python files under {}", paths.len(), root.display());

        let project = ProjectFiles::from_paths(root.clone(), &paths);
        let analyzed = self.analyze_files(&project, &paths);
        let files_analyzed = analyzed.len();

        let mut suppressions: HashMap<PathBuf, BTreeSet<usize>> = HashMap::new();
        let mut issues = Vec::new();
        for file in analyzed {
            issues.extend(file.issues);
            suppressions.insert(file.path, file.suppressed);
        }

        let report_paths = find_reports(&root, &self.config.report.paths)?;
        let reports = read_reports(&report_paths);
        info!("Importing {} report(s)", reports.len());

        let ingester = ReportIngester::new(self.config.report.repository.as_str())
            .with_format(self.config.report.format);
        let registry = RuleRegistry::from_config(&self.config);
        let ingested = ingester.ingest(&reports, &project, &registry);

        for skipped in &ingested.skipped {
            log_skipped(skipped);
        }
        for record in &ingested.malformed {
            debug!("{}", record);
        }
        issues.extend(ingested.issues);

        let before = issues.len();
        issues.retain(|issue| {
            !suppressions
                .get(issue.file.path())
                .is_some_and(|lines| lines.contains(&issue.line))
        });
        let suppressed = before - issues.len();

        issues.sort_by(|a, b| (a.file.path(), a.line).cmp(&(b.file.path(), b.line)));

        let summary = SensorSummary {
            files_analyzed,
            reports_read: reports.len(),
            issues: issues.len(),
            skipped: ingested.skipped.len(),
            malformed: ingested.malformed.len(),
            suppressed,
        };
        debug!("Sensor finished in {:?}: {:?}", start.elapsed(), summary);

        Ok((
            summary,
            issues,
            Diagnostics {
                skipped: ingested.skipped,
                malformed: ingested.malformed,
            },
        ))
    }

    fn analyze_files(&self, project: &ProjectFiles, paths: &[PathBuf]) -> Vec<AnalyzedFile> {
        let nesting = &self.config.nesting;
        let analyzer = NestingAnalyzer::new(nesting.max_depth);
        let rule_key = nesting_rule_key();

        paths
            .par_iter()
            .filter_map(|path| {
                let content = match read_file_lossy(path) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "Failed to read file");
                        return None;
                    }
                };
                let handle = project.handle_for(path)?;

                let issues = if nesting.enabled {
                    match analyze_file(&content, path, &analyzer) {
                        Ok(analysis) => analysis
                            .violations
                            .into_iter()
                            .map(|v| Issue {
                                file: handle.clone(),
                                line: v.line,
                                rule_key: rule_key.clone(),
                                severity: nesting.severity,
                                message: v.message,
                            })
                            .collect(),
                        Err(e) => {
                            warn!(file = %path.display(), error = %e, "Failed to analyze file");
                            Vec::new()
                        }
                    }
                } else {
                    Vec::new()
                };

                Some(AnalyzedFile {
                    path: handle.path,
                    issues,
                    suppressed: suppressed_lines(&content),
                })
            })
            .collect()
    }
}

fn canonical_root(root: &Path) -> Result<PathBuf> {
    root.canonicalize().map_err(|e| Error::io_at(root, e))
}

fn log_skipped(skipped: &SkippedReport) {
    match skipped.reason {
        SkipReason::FileNotFound => {
            warn!("Cannot find the file '{}', ignoring violation", skipped.detail)
        }
        SkipReason::RuleNotActive => {
            warn!("Rule '{}' is not active, ignoring violation", skipped.detail)
        }
    }
}
