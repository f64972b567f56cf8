use anyhow::Result;
use clap::Parser;
use pyqual::cli::{Cli, Commands};
use pyqual::commands::{handle_analyze, init_config, AnalyzeConfig, AnalyzeOutcome};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            config,
            max_depth,
            report_paths,
            report_format,
            repository,
            format,
            output,
            fail_on_issues,
            verbosity,
        } => {
            pyqual::observability::init_tracing(verbosity);

            let outcome = handle_analyze(AnalyzeConfig {
                path,
                config,
                max_depth,
                report_paths,
                report_format,
                repository,
                format,
                output,
                fail_on_issues,
            })?;

            if outcome == AnalyzeOutcome::IssuesFound {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init { force } => {
            pyqual::observability::init_tracing(0);
            let path = init_config(Path::new("."), force)?;
            println!("Created {} configuration file", path.display());
            Ok(())
        }
    }
}
