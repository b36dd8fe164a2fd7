// AST (Abstract Syntax Tree) definitions for the tinyfront parser

use std::fmt;

/// Source position information for tokens, nodes and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position before the first character of a file.
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Binary operators, one per relational, additive and multiplicative symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Relational
    Lt,
    EqLt,
    Eq,
    NotEq,
    GtEq,
    Gt,
    // Additive
    Plus,
    Minus,
    Or,
    // Multiplicative
    Mult,
    Div,
    And,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Lt => "OP_LT",
            BinOp::EqLt => "OP_EQLT",
            BinOp::Eq => "OP_EQ",
            BinOp::NotEq => "OP_NOTEQ",
            BinOp::GtEq => "OP_GTEQ",
            BinOp::Gt => "OP_GT",
            BinOp::Plus => "OP_PLUS",
            BinOp::Minus => "OP_MINUS",
            BinOp::Or => "OP_OR",
            BinOp::Mult => "OP_MULT",
            BinOp::Div => "OP_DIV",
            BinOp::And => "OP_AND",
        }
    }
}

/// Node kinds. Grammar constructs print as their upper-case tag; leaves
/// print as the literal text they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Seq,
    Decl,
    Variable,
    Assignment,
    If,
    While,
    Print,
    IntLiteral,
    BoolLiteral,
    Not,
    Binary(BinOp),
    /// Identifier name, digit string, `true`/`false`, or a type keyword
    Leaf(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Seq => "SEQ",
            NodeKind::Decl => "DECL",
            NodeKind::Variable => "VARIABLE",
            NodeKind::Assignment => "ASSIGNMENT",
            NodeKind::If => "IF",
            NodeKind::While => "WHILE",
            NodeKind::Print => "PRINT",
            NodeKind::IntLiteral => "INT_LITERAL",
            NodeKind::BoolLiteral => "BOOL_LITERAL",
            NodeKind::Not => "OP_NOT",
            NodeKind::Binary(op) => op.as_str(),
            NodeKind::Leaf(text) => text,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Leaf(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child slot of an [`AstNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Child0,
    Child1,
    Child2,
}

/// A tree node with up to three ordered, exclusively owned children.
///
/// Binary operators use child0/child1 as operands; `IF` uses
/// child0/child1/child2 as condition, then-branch and else-branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub position: Position,
    pub child0: Option<Box<AstNode>>,
    pub child1: Option<Box<AstNode>>,
    pub child2: Option<Box<AstNode>>,
}

impl AstNode {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            kind,
            position,
            child0: None,
            child1: None,
            child2: None,
        }
    }

    pub fn leaf(text: impl Into<String>, position: Position) -> Self {
        Self::new(NodeKind::Leaf(text.into()), position)
    }

    pub fn with_child0(mut self, node: AstNode) -> Self {
        self.child0 = Some(Box::new(node));
        self
    }

    pub fn with_child1(mut self, node: AstNode) -> Self {
        self.child1 = Some(Box::new(node));
        self
    }

    pub fn with_child2(mut self, node: AstNode) -> Self {
        self.child2 = Some(Box::new(node));
        self
    }

    pub fn child(&self, slot: Slot) -> Option<&AstNode> {
        match slot {
            Slot::Child0 => self.child0.as_deref(),
            Slot::Child1 => self.child1.as_deref(),
            Slot::Child2 => self.child2.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Box<AstNode>> {
        match slot {
            Slot::Child0 => &mut self.child0,
            Slot::Child1 => &mut self.child1,
            Slot::Child2 => &mut self.child2,
        }
    }

    /// Kind tag of the child in `slot`, or `NIL` when the slot is empty.
    pub fn child_tag(&self, slot: Slot) -> &str {
        self.child(slot).map_or("NIL", |child| child.kind.as_str())
    }

    /// Visit nodes in order: child0, self, child1, child2.
    ///
    /// Uses an explicit stack, so the depth of a long statement chain is
    /// bounded by memory rather than by the thread's stack.
    pub fn walk_in_order<'a>(&'a self, visit: &mut impl FnMut(&'a AstNode)) {
        enum Step<'a> {
            Expand(&'a AstNode),
            Visit(&'a AstNode),
        }

        let mut stack = vec![Step::Expand(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(node) => visit(node),
                Step::Expand(node) => {
                    if let Some(child) = node.child2.as_deref() {
                        stack.push(Step::Expand(child));
                    }
                    if let Some(child) = node.child1.as_deref() {
                        stack.push(Step::Expand(child));
                    }
                    stack.push(Step::Visit(node));
                    if let Some(child) = node.child0.as_deref() {
                        stack.push(Step::Expand(child));
                    }
                }
            }
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk_in_order(&mut |_| count += 1);
        count
    }

    /// Inspection rows in in-order traversal.
    pub fn rows(&self) -> Vec<NodeRow> {
        let mut rows = Vec::new();
        self.walk_in_order(&mut |node| rows.push(NodeRow::of(node)));
        rows
    }
}

/// Compact one-line form: `KIND(child0, child1, child2)`, with absent
/// children before the last present one shown as `NIL`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a AstNode),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            f.write_str(node.kind.as_str())?;

            let children = [&node.child0, &node.child1, &node.child2];
            let Some(last) = children.iter().rposition(|child| child.is_some()) else {
                continue;
            };

            // Pushed in reverse so they pop left to right
            stack.push(Piece::Text(")"));
            for (index, child) in children[..=last].iter().enumerate().rev() {
                match child {
                    Some(child) => stack.push(Piece::Node(child)),
                    None => stack.push(Piece::Text("NIL")),
                }
                if index > 0 {
                    stack.push(Piece::Text(", "));
                }
            }
            stack.push(Piece::Text("("));
        }

        Ok(())
    }
}

/// Children are released iteratively; a left-deep `SEQ` spine would
/// otherwise recurse once per statement.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<AstNode>> = [self.child0.take(), self.child1.take(), self.child2.take()]
            .into_iter()
            .flatten()
            .collect();

        while let Some(mut node) = pending.pop() {
            pending.extend([node.child0.take(), node.child1.take(), node.child2.take()].into_iter().flatten());
        }
    }
}

/// One line of the AST inspection table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub kind: String,
    pub position: Position,
    pub children: [String; 3],
}

impl NodeRow {
    fn of(node: &AstNode) -> Self {
        Self {
            kind: node.kind.as_str().to_string(),
            position: node.position,
            children: [
                node.child_tag(Slot::Child0).to_string(),
                node.child_tag(Slot::Child1).to_string(),
                node.child_tag(Slot::Child2).to_string(),
            ],
        }
    }
}

/// Tree builder: an owned root plus a cursor naming the current insertion
/// node as a path of slots from the root.
///
/// Once a root is set it is never cleared again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AstTree {
    root: Option<AstNode>,
    cursor: Vec<Slot>,
}

impl AstTree {
    pub fn new() -> Self {
        AstTree::default()
    }

    /// A tree whose root and cursor are `node`.
    pub fn from_node(node: AstNode) -> Self {
        Self {
            root: Some(node),
            cursor: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&AstNode> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<AstNode> {
        self.root
    }

    pub fn cursor(&self) -> &[Slot] {
        &self.cursor
    }

    /// The node new children are attached to.
    pub fn current(&self) -> Option<&AstNode> {
        let mut node = self.root.as_ref()?;
        for slot in &self.cursor {
            node = node.child(*slot)?;
        }
        Some(node)
    }

    fn current_mut(&mut self) -> Option<&mut AstNode> {
        let mut node = self.root.as_mut()?;
        for slot in &self.cursor {
            node = node.slot_mut(*slot).as_deref_mut()?;
        }
        Some(node)
    }

    /// Attach `node` to the current node's first free slot (child0, then
    /// child1). An empty tree adopts `node` as root and cursor. child2 is
    /// never filled here.
    ///
    /// Leaves are ignored once the tree has a root. They are attached with
    /// the `with_child*` builders instead.
    pub fn add(&mut self, node: AstNode) {
        if self.root.is_none() {
            *self = AstTree::from_node(node);
            return;
        }

        if node.kind.is_leaf() {
            return;
        }

        if let Some(current) = self.current_mut() {
            if current.child0.is_none() {
                current.child0 = Some(Box::new(node));
            } else {
                current.child1 = Some(Box::new(node));
            }
        }
    }

    /// Graft `sub`'s root into the current node's child1 and continue from
    /// `sub`'s own cursor. An empty tree adopts `sub` wholesale.
    pub fn add_tree(&mut self, sub: AstTree) {
        let AstTree {
            root: sub_root,
            cursor: sub_cursor,
        } = sub;
        let Some(sub_root) = sub_root else {
            return;
        };

        if self.root.is_none() {
            self.root = Some(sub_root);
            self.cursor = sub_cursor;
            return;
        }

        if let Some(current) = self.current_mut() {
            current.child1 = Some(Box::new(sub_root));
            self.cursor.push(Slot::Child1);
            self.cursor.extend(sub_cursor);
        }
    }

    /// Make `parent` the new root with the old root as its child0; the
    /// cursor moves to `parent`.
    pub fn wrap(self, mut parent: AstNode) -> AstTree {
        parent.child0 = self.root.map(Box::new);
        AstTree::from_node(parent)
    }

    /// Inspection rows in in-order traversal; empty for an empty tree.
    pub fn rows(&self) -> Vec<NodeRow> {
        self.root.as_ref().map(AstNode::rows).unwrap_or_default()
    }
}
