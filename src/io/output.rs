use crate::core::{Issue, Severity};
use crate::report::SkipReason;
use crate::sensor::AnalysisReport;
use colored::*;
use std::io::Write;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_issues(&report.issues)?;
        self.write_skipped(report)?;
        self.write_summary(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Pyqual Analysis Report".bold().blue())?;
        writeln!(self.writer, "{}", "======================".blue())?;
        writeln!(self.writer, "Project: {}", report.project_path.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_issues(&mut self, issues: &[Issue]) -> anyhow::Result<()> {
        if issues.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{} ({}):", "Issues".bold(), issues.len())?;
        for issue in issues {
            writeln!(
                self.writer,
                "  {}:{} [{}] ({}) {}",
                issue.file.path().display(),
                issue.line,
                issue.rule_key.to_string().cyan(),
                colored_severity(issue.severity),
                issue.message
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_skipped(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.skipped.is_empty() && report.malformed.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}:", "Ignored report records".yellow())?;
        for skipped in &report.skipped {
            let line = match skipped.reason {
                SkipReason::FileNotFound => format!("cannot find the file '{}'", skipped.detail),
                SkipReason::RuleNotActive => format!("rule '{}' is not active", skipped.detail),
            };
            writeln!(self.writer, "  - {line}")?;
        }
        for record in &report.malformed {
            writeln!(self.writer, "  - {record}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "{}:", "Summary".bold())?;
        writeln!(self.writer, "  Files analyzed: {}", summary.files_analyzed)?;
        writeln!(self.writer, "  Reports read: {}", summary.reports_read)?;
        writeln!(self.writer, "  Suppressed: {}", summary.suppressed)?;

        let status = if summary.issues == 0 {
            "no issues".green().bold()
        } else {
            format!("{} issue(s)", summary.issues).red().bold()
        };
        writeln!(self.writer, "  Result: {status}")?;
        Ok(())
    }
}

fn colored_severity(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Blocker | Severity::Critical => label.red(),
        Severity::Major => label.yellow(),
        Severity::Minor | Severity::Info => label.normal(),
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
