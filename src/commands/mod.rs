//! CLI command implementations.
//!
//! - **analyze**: run the nesting check and import external reports
//! - **init**: write a default `.pyqual.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig, AnalyzeOutcome};
pub use init::init_config;
