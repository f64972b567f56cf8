//! Line-level issue suppression via `# NOSONAR` or `# pyqual: ignore` comments.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static SUPPRESSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#.*\b(?:NOSONAR|pyqual:\s*ignore)\b").expect("Invalid suppression pattern")
});

/// 1-based line numbers that carry a suppression comment.
pub fn suppressed_lines(source: &str) -> BTreeSet<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| SUPPRESSION_PATTERN.is_match(line))
        .map(|(idx, _)| idx + 1)
        .collect()
}
