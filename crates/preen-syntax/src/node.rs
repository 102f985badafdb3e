//! Node kinds and owned subtree snapshots.
//!
//! [`Node`] is the owned, recursive form of a subtree. Trees are built from
//! nodes, compared as nodes, and components that reshape statements work on
//! nodes before writing them back into the arena.

use serde::{Deserialize, Serialize};

/// The shape of a syntax node.
///
/// Module definitions, function definitions, directive statements and
/// quotations are all [`NodeKind::Call`] nodes told apart by name. A call
/// whose last argument is a [`NodeKind::KeywordList`] holding a single `do`
/// pair carries a do-block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum NodeKind {
    /// A sequence of expressions; children are the expressions in order.
    Block,
    /// A dotted alias reference such as `Foo.Bar.Baz`.
    ///
    /// The first segment may be `__MODULE__` when the reference is rooted at
    /// the enclosing module.
    Alias(Vec<String>),
    /// The `__MODULE__` self-reference marker on its own.
    ModuleSelf,
    /// A braced multi-target reference, `Root.{A, B}`.
    ///
    /// The first child is the root; the remaining children are the targets.
    MultiAlias,
    /// A module attribute read, `@name`.
    AttrRead(String),
    /// A module attribute assignment, `@name value`; the single child is the
    /// value.
    AttrAssign(String),
    /// A local call, `name(args)`; children are the arguments.
    Call(String),
    /// A remote call, `receiver.name(args)`; the first child is the receiver
    /// and the rest are arguments.
    RemoteCall(String),
    /// A keyword list; children are [`NodeKind::Pair`] nodes.
    KeywordList,
    /// A keyword pair, `key: value`; the single child is the value.
    Pair(String),
    /// A match expression, `left = right`.
    Match,
    /// A variable reference.
    Var(String),
    /// An atom literal, `:name`.
    Atom(String),
    /// A string literal.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A boolean literal.
    Bool(bool),
    /// The `nil` literal.
    Nil,
}

/// An owned syntax subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// The node's shape.
    pub kind: NodeKind,
    /// One-based source line; `0` when unknown.
    #[serde(default)]
    pub line: u32,
    /// Ordered children.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self::leaf(NodeKind::Nil)
    }
}

impl Node {
    /// Creates a node with an unknown line.
    #[must_use]
    pub const fn new(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            kind,
            line: 0,
            children,
        }
    }

    /// Creates a childless node with an unknown line.
    #[must_use]
    pub const fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// Places the node on `line`, along with any descendant whose line is
    /// still unknown.
    #[must_use]
    pub fn at(mut self, line: u32) -> Self {
        self.fill_line(line);
        self.line = line;
        self
    }

    fn fill_line(&mut self, line: u32) {
        for child in &mut self.children {
            if child.line == 0 {
                child.line = line;
            }
            child.fill_line(line);
        }
    }

    /// Returns the call name when the node is a local call.
    #[must_use]
    pub fn call_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Call(name) => Some(name),
            _ => None,
        }
    }

    /// Returns whether the node is a local call named `name`.
    #[must_use]
    pub fn is_call(&self, name: &str) -> bool {
        self.call_name() == Some(name)
    }

    /// Returns the segments when the node is an alias reference.
    #[must_use]
    pub fn alias_segments(&self) -> Option<&[String]> {
        match &self.kind {
            NodeKind::Alias(segments) => Some(segments),
            _ => None,
        }
    }

    /// Returns whether the node is a keyword list holding only a `do` pair.
    #[must_use]
    pub fn is_do_keyword(&self) -> bool {
        matches!(self.kind, NodeKind::KeywordList)
            && matches!(
                self.children.as_slice(),
                [pair] if pair.kind == NodeKind::Pair(String::from("do"))
            )
    }

    /// Returns the do-block body of a call, if it has one.
    #[must_use]
    pub fn do_body(&self) -> Option<&Self> {
        if !matches!(self.kind, NodeKind::Call(_) | NodeKind::RemoteCall(_)) {
            return None;
        }
        let last = self.children.last().filter(|last| last.is_do_keyword())?;
        last.children.first()?.children.first()
    }

    /// Returns the call arguments, excluding any trailing do-block.
    #[must_use]
    pub fn call_args(&self) -> &[Self] {
        let args = match self.kind {
            NodeKind::Call(_) => self.children.as_slice(),
            NodeKind::RemoteCall(_) => self.children.get(1..).unwrap_or_default(),
            _ => return &[],
        };
        match args.split_last() {
            Some((last, rest)) if last.is_do_keyword() => rest,
            _ => args,
        }
    }

    /// Moves every known line in the subtree up by `delta`.
    pub fn shift_up(&mut self, delta: u32) {
        if self.line > 0 {
            self.line = self.line.saturating_sub(delta).max(1);
        }
        for child in &mut self.children {
            child.shift_up(delta);
        }
    }

    /// Visits the subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
