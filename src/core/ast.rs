use std::path::PathBuf;

/// A parsed Python module, lowered into the language-neutral node tree the
/// analyzers walk.
#[derive(Clone, Debug)]
pub struct PythonAst {
    pub root: SyntaxNode,
    pub path: PathBuf,
    /// Whether tree-sitter had to recover from syntax errors while parsing.
    pub has_errors: bool,
}

/// A node in a parsed source tree.
///
/// `line` is 1-based. Children keep source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub line: usize,
    pub children: Vec<SyntaxNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    FunctionDef,
    ClassDef,
    Block,
    If,
    /// `elif` clause; belongs to the enclosing `If`.
    Elif,
    Else,
    For,
    While,
    Try,
    Except,
    Finally,
    With,
    Other,
}

impl NodeKind {
    /// Constructs that open a new level of control-flow nesting.
    pub fn is_nesting(self) -> bool {
        matches!(
            self,
            NodeKind::If | NodeKind::For | NodeKind::While | NodeKind::Try | NodeKind::With
        )
    }
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, line: usize) -> Self {
        Self {
            kind,
            line,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    /// Deepest chain of nesting constructs anywhere below (and including) this node.
    pub fn max_nesting(&self) -> usize {
        let own = usize::from(self.kind.is_nesting());
        own + self
            .children
            .iter()
            .map(SyntaxNode::max_nesting)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SyntaxNode::node_count)
            .sum::<usize>()
    }
}
