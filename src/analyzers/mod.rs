use crate::core::ast::PythonAst;
use crate::core::errors::Result;
use crate::core::{RuleKey, Violation};
use std::path::{Path, PathBuf};

pub mod nesting;
pub mod python;

pub use nesting::{DepthAnalyzer, DEFAULT_MAX_DEPTH, NESTED_CONTROL_FLOW_DEPTH};

/// Repository key for the checks that ship with pyqual.
pub const PYTHON_REPOSITORY: &str = "python";

pub trait Analyzer: Send + Sync {
    fn parse(&self, content: &str, path: &Path) -> Result<PythonAst>;
    fn analyze(&self, ast: &PythonAst) -> Vec<Violation>;
    fn rule_key(&self) -> RuleKey;
}

/// Violations found in a single source file.
#[derive(Clone, Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
    pub has_parse_errors: bool,
}

/// Nesting depth check over tree-sitter parsed Python.
#[derive(Clone, Debug, Default)]
pub struct NestingAnalyzer {
    depth: DepthAnalyzer,
}

impl NestingAnalyzer {
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: DepthAnalyzer::new(max_depth),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.depth.max_depth()
    }
}

impl Analyzer for NestingAnalyzer {
    fn parse(&self, content: &str, path: &Path) -> Result<PythonAst> {
        python::parse_module(content, path)
    }

    fn analyze(&self, ast: &PythonAst) -> Vec<Violation> {
        self.depth.analyze(&ast.root)
    }

    fn rule_key(&self) -> RuleKey {
        RuleKey::of(PYTHON_REPOSITORY, NESTED_CONTROL_FLOW_DEPTH)
    }
}

pub fn analyze_file(content: &str, path: &Path, analyzer: &dyn Analyzer) -> Result<FileAnalysis> {
    analyzer.parse(content, path).map(|ast| FileAnalysis {
        path: ast.path.clone(),
        violations: analyzer.analyze(&ast),
        has_parse_errors: ast.has_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_analyze_file_end_to_end() {
        let source = indoc! {r#"
            def process(rows):
                for row in rows:
                    if row:
                        while row.pending():
                            try:
                                row.flush()
                            except IOError:
                                pass
        "#};

        let analyzer = NestingAnalyzer::new(3);
        let result = analyze_file(source, Path::new("pkg/process.py"), &analyzer).unwrap();

        assert_eq!(result.path, PathBuf::from("pkg/process.py"));
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].line, 5);
        assert!(!result.has_parse_errors);
    }

    #[test]
    fn test_rule_key() {
        let key = NestingAnalyzer::default().rule_key();
        assert_eq!(key.to_string(), "python:NestedControlFlowDepth");
    }
}
