//! Locating and reading external report files.

use super::read_file_lossy;
use crate::core::errors::{Error, Result};
use crate::report::ReportSource;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand report globs. Relative patterns are anchored at `root`.
///
/// Results are de-duplicated and sorted; directories are ignored.
pub fn find_reports(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for pattern in patterns {
        let anchored = if Path::new(pattern).is_absolute() {
            PathBuf::from(pattern)
        } else {
            root.join(pattern)
        };
        let anchored = anchored.to_string_lossy().into_owned();

        let mut matched = 0usize;
        for entry in glob::glob(&anchored)? {
            match entry {
                Ok(path) if path.is_file() => {
                    matched += 1;
                    found.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Cannot access {}: {}", e.path().display(), e.error()),
            }
        }

        if matched == 0 {
            debug!("No report files match '{}'", anchored);
        }
    }

    Ok(found.into_iter().collect())
}

pub fn read_report(path: &Path) -> Result<ReportSource> {
    let text = read_file_lossy(path).map_err(|e| Error::io_at(path, e))?;
    Ok(ReportSource::new(path.display().to_string(), text))
}

/// Read every report, logging and skipping the ones that cannot be read.
pub fn read_reports(paths: &[PathBuf]) -> Vec<ReportSource> {
    paths
        .iter()
        .filter_map(|path| match read_report(path) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("Skipping unreadable report: {}", e);
                None
            }
        })
        .collect()
}
