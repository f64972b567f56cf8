// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod observability;
pub mod project;
pub mod report;
pub mod rules;
pub mod sensor;
pub mod suppression;

// Re-export commonly used types
pub use crate::core::{FileHandle, Issue, Language, RuleKey, Severity, Violation};

pub use crate::analyzers::{analyze_file, Analyzer, DepthAnalyzer, NestingAnalyzer};

pub use crate::config::{load_config, PyqualConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::project::ProjectFiles;

pub use crate::report::{
    ActiveRule, FileResolver, IngestResult, MalformedRecord, ReportFormat, ReportIngester,
    ReportSource, RuleResolver, SkipReason, SkippedReport,
};

pub use crate::rules::RuleRegistry;

pub use crate::sensor::{AnalysisReport, IssueSink, Sensor, SensorSummary, VecSink};
