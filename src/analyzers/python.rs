//! Tree-sitter front end for Python.
//!
//! Parses source with `tree-sitter-python` and lowers the concrete syntax
//! tree into [`SyntaxNode`]s. Only statement structure is lowered: modules,
//! blocks, compound statements and their clauses. Expressions cannot contain
//! statements, so their subtrees are never visited; recursion depth is bounded
//! by statement nesting rather than expression length.

use crate::core::ast::{NodeKind, PythonAst, SyntaxNode};
use crate::core::errors::{Error, Result};
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language as TsLanguage, Node, Parser};

fn language() -> TsLanguage {
    tree_sitter_python::LANGUAGE.into()
}

/// Parse a Python module into a lowered syntax tree.
pub fn parse_module(content: &str, path: &Path) -> Result<PythonAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&language())
        .map_err(|e| Error::parse(path, format!("Failed to set tree-sitter language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, "tree-sitter returned no tree"))?;

    let root = tree.root_node();
    let has_errors = root.has_error();
    if has_errors {
        debug!(file = %path.display(), "Python source contains syntax errors; analyzing recovered tree");
    }

    Ok(PythonAst {
        root: lower(root),
        path: path.to_path_buf(),
        has_errors,
    })
}

/// Map a tree-sitter node kind onto the analyzer's closed set of kinds.
pub fn node_kind(kind: &str) -> NodeKind {
    static KIND_MAP: &[(&[&str], NodeKind)] = &[
        (&["module"], NodeKind::Module),
        (&["function_definition"], NodeKind::FunctionDef),
        (&["class_definition"], NodeKind::ClassDef),
        (&["block"], NodeKind::Block),
        (&["if_statement"], NodeKind::If),
        (&["elif_clause"], NodeKind::Elif),
        (&["else_clause"], NodeKind::Else),
        (&["for_statement"], NodeKind::For),
        (&["while_statement"], NodeKind::While),
        (&["try_statement"], NodeKind::Try),
        (&["except_clause", "except_group_clause"], NodeKind::Except),
        (&["finally_clause"], NodeKind::Finally),
        (&["with_statement"], NodeKind::With),
    ];

    KIND_MAP
        .iter()
        .find(|(kinds, _)| kinds.contains(&kind))
        .map(|(_, k)| *k)
        .unwrap_or(NodeKind::Other)
}

/// Node kinds that can hold statements, directly or through a block.
static STRUCTURAL_KINDS: &[&str] = &[
    "module",
    "block",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "function_definition",
    "class_definition",
    "decorated_definition",
    "match_statement",
    "case_clause",
    "ERROR",
];

fn is_structural(kind: &str) -> bool {
    STRUCTURAL_KINDS.contains(&kind)
}

fn lower(node: Node) -> SyntaxNode {
    let children = node
        .named_children(&mut node.walk())
        .filter(|child| is_structural(child.kind()))
        .map(lower)
        .collect();

    SyntaxNode {
        kind: node_kind(node.kind()),
        line: node.start_position().row + 1,
        children,
    }
}
