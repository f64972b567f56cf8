//! Control-flow nesting depth check.
//!
//! Walks a [`SyntaxNode`] tree depth-first and reports the places where
//! `if`, `for`, `while`, `try` and `with` statements are nested deeper than
//! the configured maximum.
//!
//! Only the first construct that crosses the threshold on a given path is
//! reported. Anything nested below it belongs to the same chain and stays
//! quiet, so one pathological function yields one issue rather than one per
//! inner statement. Sibling subtrees are counted independently.
//!
//! `elif` and `else` clauses hang off their `if` and never add a level.

use crate::core::ast::SyntaxNode;
use crate::core::Violation;

/// Rule id under which nesting violations are reported.
pub const NESTED_CONTROL_FLOW_DEPTH: &str = "NestedControlFlowDepth";

/// Default maximum allowed nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Traversal state carried down one path of the tree.
///
/// Passed by value, so each child starts from its parent's state and
/// siblings never see each other's changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct NestingFrame {
    depth: usize,
    /// Line of the construct that first exceeded the threshold on this path.
    flagged_at: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct DepthAnalyzer {
    max_depth: usize,
}

impl Default for DepthAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DepthAnalyzer {
    /// Create an analyzer; a zero threshold is raised to 1.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn message(&self) -> String {
        format!(
            "Refactor this code to not nest more than {} \"if\", \"for\", \"while\", \"try\" and \"with\" statements.",
            self.max_depth
        )
    }

    /// Violations for `root`, in pre-order encounter order.
    pub fn analyze(&self, root: &SyntaxNode) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.visit(root, NestingFrame::default(), &mut violations);
        violations
    }

    fn visit(&self, node: &SyntaxNode, frame: NestingFrame, out: &mut Vec<Violation>) {
        let frame = self.enter(node, frame, out);

        for child in &node.children {
            self.visit(child, frame, out);
        }
    }

    fn enter(&self, node: &SyntaxNode, frame: NestingFrame, out: &mut Vec<Violation>) -> NestingFrame {
        if !node.kind.is_nesting() {
            return frame;
        }

        let depth = frame.depth + 1;
        if depth > self.max_depth && frame.flagged_at.is_none() {
            out.push(Violation {
                line: node.line,
                message: self.message(),
            });
            return NestingFrame {
                depth,
                flagged_at: Some(node.line),
            };
        }

        NestingFrame { depth, ..frame }
    }
}

/// Convenience wrapper over [`DepthAnalyzer::analyze`].
pub fn analyze(root: &SyntaxNode, max_depth: usize) -> Vec<Violation> {
    DepthAnalyzer::new(max_depth).analyze(root)
}
