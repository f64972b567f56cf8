use crate::report::ReportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pyqual")]
#[command(about = "Python nesting depth checker and external report importer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Python project and import external reports
    Analyze {
        /// Project root to analyze
        path: PathBuf,

        /// Configuration file (defaults to the nearest .pyqual.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum allowed nesting of if/for/while/try/with statements
        #[arg(long = "max-depth")]
        max_depth: Option<usize>,

        /// Report file glob, relative to the project root (repeatable)
        #[arg(long = "report-path")]
        report_paths: Vec<String>,

        /// Layout of external report records
        #[arg(long = "report-format", value_enum)]
        report_format: Option<ReportFormat>,

        /// Repository key that external rule ids belong to
        #[arg(long)]
        repository: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with status 1 when any issue is reported
        #[arg(long = "fail-on-issues")]
        fail_on_issues: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
