//! Turns decoded report records into issues.
//!
//! Every decoded record yields exactly one outcome. The file is resolved
//! first; the rule is only consulted for files the host knows about, so a
//! stale path never shows up as an unknown rule.

use super::grammar::{RecordParse, ReportFormat, ReportGrammar};
use super::resolve::{FileResolver, RuleResolver};
use super::types::{IngestResult, MalformedRecord, ReportLine, ReportSource, SkippedReport};
use crate::core::{Issue, RuleKey};

/// Default repository key for rules coming from external reports.
pub const DEFAULT_REPOSITORY: &str = "external";

pub struct ReportIngester {
    repository: String,
    grammar: Box<dyn ReportGrammar>,
}

impl Default for ReportIngester {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY)
    }
}

impl ReportIngester {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            grammar: ReportFormat::default().grammar(),
        }
    }

    pub fn with_grammar(mut self, grammar: Box<dyn ReportGrammar>) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_format(self, format: ReportFormat) -> Self {
        self.with_grammar(format.grammar())
    }

    /// Decode one report. Malformed records are collected, not fatal.
    pub fn decode(&self, report: &ReportSource) -> (Vec<ReportLine>, Vec<MalformedRecord>) {
        let mut lines = Vec::new();
        let mut malformed = Vec::new();

        for (idx, raw) in report.text.lines().enumerate() {
            match self.grammar.parse_record(raw) {
                RecordParse::Record(line) => lines.push(line),
                RecordParse::NotARecord => {}
                RecordParse::Malformed(reason) => malformed.push(MalformedRecord {
                    report: report.name.clone(),
                    record_line: idx + 1,
                    content: raw.to_string(),
                    reason,
                }),
            }
        }

        (lines, malformed)
    }

    pub fn ingest<F, R>(&self, reports: &[ReportSource], files: &F, rules: &R) -> IngestResult
    where
        F: FileResolver + ?Sized,
        R: RuleResolver + ?Sized,
    {
        let mut result = IngestResult::default();

        for report in reports {
            let (lines, malformed) = self.decode(report);
            result.malformed.extend(malformed);

            for line in lines {
                match self.resolve(line, files, rules) {
                    Ok(issue) => result.issues.push(issue),
                    Err(skipped) => result.skipped.push(skipped),
                }
            }
        }

        result
    }

    fn resolve<F, R>(&self, line: ReportLine, files: &F, rules: &R) -> Result<Issue, SkippedReport>
    where
        F: FileResolver + ?Sized,
        R: RuleResolver + ?Sized,
    {
        let file = files
            .resolve_file(&line.file_path)
            .ok_or_else(|| SkippedReport::file_not_found(&line.file_path))?;

        let key = RuleKey::of(self.repository.as_str(), line.rule_id.as_str());
        let rule = rules
            .resolve_rule(&key)
            .ok_or_else(|| SkippedReport::rule_not_active(&line.rule_id))?;

        Ok(Issue {
            file,
            line: line.line,
            rule_key: rule.key,
            severity: rule.severity,
            message: line.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileHandle, Severity};
    use crate::report::resolve::ActiveRule;
    use crate::report::types::SkipReason;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn files(path: &str) -> Option<FileHandle> {
        matches!(path, "cs/__init__.py" | "cs/util.py").then(|| FileHandle::new(path))
    }

    fn rules(key: &RuleKey) -> Option<ActiveRule> {
        (key.repository == "yyy" && key.rule == "yyy_1")
            .then(|| ActiveRule::new(key.clone()).with_severity(Severity::Minor))
    }

    fn ingester() -> ReportIngester {
        ReportIngester::new("yyy")
    }

    #[test]
    fn test_resolved_line_becomes_issue() {
        let report = ReportSource::new("yyy-report.txt", "cs/__init__.py:1:yyy_1:some message\n");
        let result = ingester().ingest(&[report], &files, &rules);

        assert_eq!(
            result.issues,
            vec![Issue {
                file: FileHandle::new("cs/__init__.py"),
                line: 1,
                rule_key: RuleKey::of("yyy", "yyy_1"),
                severity: Severity::Minor,
                message: "some message".into(),
            }]
        );
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_missing_file_skips_rule_lookup() {
        let report = ReportSource::new("r", "gone.py:4:unknown_rule:msg\n");
        let result = ingester().ingest(&[report], &files, &rules);

        assert!(result.issues.is_empty());
        assert_eq!(result.skipped, vec![SkippedReport::file_not_found("gone.py")]);
    }

    #[test]
    fn test_inactive_rule_is_skipped() {
        let report = ReportSource::new("r", "cs/util.py:4:yyy_9:msg\n");
        let result = ingester().ingest(&[report], &files, &rules);

        assert!(result.issues.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::RuleNotActive);
        assert_eq!(result.skipped[0].detail, "yyy_9");
    }

    #[test]
    fn test_malformed_records_do_not_block_siblings() {
        let text = indoc! {"
            # yyy 1.0
            cs/__init__.py:1:yyy_1:first
            this is not a record
            cs/util.py:0:yyy_1:zero line

            cs/util.py:8:yyy_1:second
        "};
        let result = ingester().ingest(&[ReportSource::new("r.txt", text)], &files, &rules);

        let lines: Vec<usize> = result.issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 8]);
        let malformed: Vec<usize> = result.malformed.iter().map(|m| m.record_line).collect();
        assert_eq!(malformed, vec![3, 4]);
        assert_eq!(result.malformed[0].report, "r.txt");
    }

    #[test]
    fn test_one_outcome_per_record_across_reports() {
        let reports = vec![
            ReportSource::new("a", "cs/__init__.py:1:yyy_1:a\nmissing.py:2:yyy_1:b\n"),
            ReportSource::new("b", "cs/util.py:3:other:c\n"),
        ];
        let result = ingester().ingest(&reports, &files, &rules);

        assert_eq!(result.records(), 3);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(
            result.skipped.iter().map(|s| s.reason).collect::<Vec<_>>(),
            vec![SkipReason::FileNotFound, SkipReason::RuleNotActive]
        );
    }

    #[test]
    fn test_ingest_is_repeatable() {
        let reports = vec![ReportSource::new(
            "a",
            "cs/__init__.py:1:yyy_1:a\nmissing.py:2:yyy_1:b\nbad\n",
        )];
        let ingester = ingester();
        assert_eq!(
            ingester.ingest(&reports, &files, &rules),
            ingester.ingest(&reports, &files, &rules)
        );
    }

    #[test]
    fn test_parseable_format() {
        let report = ReportSource::new("pylint.txt", "cs/util.py:5: [yyy_1(some-check)] hello\n");
        let result = ingester()
            .with_format(ReportFormat::ParseableV1)
            .ingest(&[report], &files, &rules);

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].message, "hello");
    }
}
