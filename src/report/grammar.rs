//! Report record grammars.
//!
//! A grammar decodes a single line of report text. Grammars are versioned:
//! the format name and version are part of the configuration, so changing
//! a layout means adding a new grammar rather than loosening an existing one.
//!
//! Shipped grammars:
//!
//! - `colon-v1`: `<path>:<line>:<rule_id>:<message>`
//! - `parseable-v1`: `<path>:<line>: [<rule_id>(<symbol>), <object>] <message>`
//!   (pylint "parseable" layout; symbol and object are optional)
//!
//! In both, the path is matched lazily up to the first `:<digits>:`, which
//! keeps Windows drive letters intact and lets messages contain colons.

use super::types::ReportLine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static COLON_V1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<line>\d+):(?P<rule>[^:\s]+):(?P<message>.*)$")
        .expect("Invalid colon-v1 record pattern")
});

static PARSEABLE_V1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<path>.+?):(?P<line>\d+):\s*\[(?P<rule>[^\]\(,\s]+)(?:\([^)]*\))?(?:,[^\]]*)?\]\s*(?P<message>.*)$",
    )
    .expect("Invalid parseable-v1 record pattern")
});

/// Identifies a grammar layout and its revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarVersion {
    pub name: &'static str,
    pub version: u32,
}

impl std::fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-v{}", self.name, self.version)
    }
}

/// Outcome of decoding one line of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordParse {
    Record(ReportLine),
    /// Blank lines, comments and headers.
    NotARecord,
    Malformed(String),
}

pub trait ReportGrammar: Send + Sync {
    fn version(&self) -> GrammarVersion;
    fn parse_record(&self, raw: &str) -> RecordParse;
}

/// Selectable report layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ReportFormat {
    #[default]
    #[serde(rename = "colon-v1")]
    #[value(name = "colon-v1")]
    ColonV1,
    #[serde(rename = "parseable-v1")]
    #[value(name = "parseable-v1")]
    ParseableV1,
}

impl ReportFormat {
    pub fn grammar(self) -> Box<dyn ReportGrammar> {
        match self {
            ReportFormat::ColonV1 => Box::new(ColonGrammar),
            ReportFormat::ParseableV1 => Box::new(ParseableGrammar),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grammar().version())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColonGrammar;

impl ReportGrammar for ColonGrammar {
    fn version(&self) -> GrammarVersion {
        GrammarVersion {
            name: "colon",
            version: 1,
        }
    }

    fn parse_record(&self, raw: &str) -> RecordParse {
        let trimmed = raw.trim();
        if is_blank_or_comment(trimmed) {
            return RecordParse::NotARecord;
        }

        match COLON_V1.captures(trimmed) {
            Some(caps) => record_from_captures(&caps),
            None => RecordParse::Malformed("expected <path>:<line>:<rule>:<message>".into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseableGrammar;

impl ReportGrammar for ParseableGrammar {
    fn version(&self) -> GrammarVersion {
        GrammarVersion {
            name: "parseable",
            version: 1,
        }
    }

    fn parse_record(&self, raw: &str) -> RecordParse {
        let trimmed = raw.trim();
        // pylint prints "************* Module pkg.mod" ahead of each module's records
        if is_blank_or_comment(trimmed) || trimmed.starts_with("***") {
            return RecordParse::NotARecord;
        }

        match PARSEABLE_V1.captures(trimmed) {
            Some(caps) => record_from_captures(&caps),
            None => RecordParse::Malformed("expected <path>:<line>: [<rule>] <message>".into()),
        }
    }
}

fn is_blank_or_comment(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn record_from_captures(caps: &Captures) -> RecordParse {
    let path = caps["path"].trim();
    let rule = caps["rule"].trim();
    let message = caps["message"].trim();

    let line = match caps["line"].parse::<usize>() {
        Ok(0) => return RecordParse::Malformed("line number must be at least 1".into()),
        Ok(line) => line,
        Err(e) => return RecordParse::Malformed(format!("invalid line number: {e}")),
    };

    if path.is_empty() {
        return RecordParse::Malformed("missing file path".into());
    }
    if message.is_empty() {
        return RecordParse::Malformed("missing message".into());
    }

    RecordParse::Record(ReportLine {
        file_path: path.to_string(),
        line,
        rule_id: rule.to_string(),
        message: message.to_string(),
    })
}
