//! External violation report import.
//!
//! # Module Structure
//!
//! - [`types`] - Report records, outcomes and diagnostics (pure data)
//! - [`grammar`] - Versioned record grammars (pure functions)
//! - [`resolve`] - File and rule lookup capabilities supplied by the host
//! - [`ingest`] - Decoding plus resolution into issues
//!
//! Reading report files and finding them on disk is the caller's job; this
//! module only sees text.
//!
//! # Quick Start
//!
//! ```ignore
//! use pyqual::report::{ReportIngester, ReportSource};
//!
//! let reports = vec![ReportSource::new("yyy-report.txt", text)];
//! let result = ReportIngester::new("yyy").ingest(&reports, &project_files, &registry);
//! for skipped in &result.skipped {
//!     eprintln!("{}: {}", skipped.reason, skipped.detail);
//! }
//! ```

pub mod grammar;
pub mod ingest;
pub mod resolve;
pub mod types;

pub use grammar::{ColonGrammar, GrammarVersion, ParseableGrammar, RecordParse, ReportFormat, ReportGrammar};
pub use ingest::{ReportIngester, DEFAULT_REPOSITORY};
pub use resolve::{ActiveRule, FileResolver, RuleResolver};
pub use types::{
    IngestResult, MalformedRecord, ReportLine, ReportSource, SkipReason, SkippedReport,
};
