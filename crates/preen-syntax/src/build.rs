//! Constructors for owned nodes.
//!
//! Every constructor returns a [`Node`] with an unknown line; chain
//! [`Node::at`] to place it. The external parser hands trees over already
//! built, so these exist for synthesised statements and for tests.

use crate::node::{Node, NodeKind};

/// Builds a block of expressions.
#[must_use]
pub const fn block(children: Vec<Node>) -> Node {
    Node::new(NodeKind::Block, children)
}

/// Builds a dotted alias reference from `Foo.Bar` notation.
#[must_use]
pub fn alias_ref(path: &str) -> Node {
    Node::leaf(NodeKind::Alias(
        path.split('.').map(str::to_owned).collect(),
    ))
}

/// Builds an alias reference from segments.
#[must_use]
pub fn alias_segments(segments: &[String]) -> Node {
    Node::leaf(NodeKind::Alias(segments.to_vec()))
}

/// Builds the `__MODULE__` marker.
#[must_use]
pub const fn module_self() -> Node {
    Node::leaf(NodeKind::ModuleSelf)
}

/// Builds `root.{targets}`.
#[must_use]
pub fn multi_alias(root: Node, targets: Vec<Node>) -> Node {
    let mut children = Vec::with_capacity(targets.len().saturating_add(1));
    children.push(root);
    children.extend(targets);
    Node::new(NodeKind::MultiAlias, children)
}

/// Builds a module attribute read, `@name`.
#[must_use]
pub fn attr(name: &str) -> Node {
    Node::leaf(NodeKind::AttrRead(name.to_owned()))
}

/// Builds a module attribute assignment, `@name value`.
#[must_use]
pub fn attr_assign(name: &str, value: Node) -> Node {
    Node::new(NodeKind::AttrAssign(name.to_owned()), vec![value])
}

/// Builds a local call.
#[must_use]
pub fn call(name: &str, args: Vec<Node>) -> Node {
    Node::new(NodeKind::Call(name.to_owned()), args)
}

/// Builds a remote call, `receiver.name(args)`.
#[must_use]
pub fn remote(receiver: Node, name: &str, args: Vec<Node>) -> Node {
    let mut children = Vec::with_capacity(args.len().saturating_add(1));
    children.push(receiver);
    children.extend(args);
    Node::new(NodeKind::RemoteCall(name.to_owned()), children)
}

/// Builds a remote call on an alias written in dotted notation.
///
/// `remote_path("A.B.C.f", vec![])` yields `A.B.C.f()`.
#[must_use]
pub fn remote_path(path: &str, args: Vec<Node>) -> Node {
    match path.rsplit_once('.') {
        Some((receiver, name)) => remote(alias_ref(receiver), name, args),
        None => call(path, args),
    }
}

/// Builds a keyword pair.
#[must_use]
pub fn pair(key: &str, value: Node) -> Node {
    Node::new(NodeKind::Pair(key.to_owned()), vec![value])
}

/// Builds a keyword list from `(key, value)` entries.
#[must_use]
pub fn keywords(entries: Vec<(&str, Node)>) -> Node {
    Node::new(
        NodeKind::KeywordList,
        entries
            .into_iter()
            .map(|(key, value)| pair(key, value))
            .collect(),
    )
}

/// Builds the `do: body` keyword list that carries a do-block.
#[must_use]
pub fn do_block(body: Node) -> Node {
    keywords(vec![("do", body)])
}

/// Builds `left = right`.
#[must_use]
pub fn matches(left: Node, right: Node) -> Node {
    Node::new(NodeKind::Match, vec![left, right])
}

/// Builds a variable reference.
#[must_use]
pub fn var(name: &str) -> Node {
    Node::leaf(NodeKind::Var(name.to_owned()))
}

/// Builds an atom literal.
#[must_use]
pub fn atom(name: &str) -> Node {
    Node::leaf(NodeKind::Atom(name.to_owned()))
}

/// Builds a string literal.
#[must_use]
pub fn string(value: &str) -> Node {
    Node::leaf(NodeKind::Str(value.to_owned()))
}

/// Builds an integer literal.
#[must_use]
pub const fn int(value: i64) -> Node {
    Node::leaf(NodeKind::Int(value))
}

/// Builds a boolean literal.
#[must_use]
pub const fn boolean(value: bool) -> Node {
    Node::leaf(NodeKind::Bool(value))
}

/// Builds the `nil` literal.
#[must_use]
pub const fn nil() -> Node {
    Node::leaf(NodeKind::Nil)
}

/// Wraps do-block statements the way the parser does: no statements give an
/// empty block, a single statement stands alone, more form a block.
#[must_use]
pub fn body(mut statements: Vec<Node>) -> Node {
    if statements.len() == 1 {
        statements.pop().unwrap_or_default()
    } else {
        block(statements)
    }
}

/// Builds `defmodule Name do ... end`.
#[must_use]
pub fn defmodule(name: &str, statements: Vec<Node>) -> Node {
    call("defmodule", vec![alias_ref(name), do_block(body(statements))])
}

/// Builds `def name(args) do ... end`.
#[must_use]
pub fn def(name: &str, args: Vec<Node>, statements: Vec<Node>) -> Node {
    call("def", vec![call(name, args), do_block(body(statements))])
}

/// Builds `quote do ... end`.
#[must_use]
pub fn quote(statements: Vec<Node>) -> Node {
    call("quote", vec![do_block(body(statements))])
}

/// Builds `alias Foo.Bar`.
#[must_use]
pub fn alias(path: &str) -> Node {
    call("alias", vec![alias_ref(path)])
}

/// Builds `alias Foo.Bar, as: Baz`.
#[must_use]
pub fn alias_as(path: &str, name: &str) -> Node {
    call(
        "alias",
        vec![alias_ref(path), keywords(vec![("as", alias_ref(name))])],
    )
}

/// Builds `use Foo`.
#[must_use]
pub fn use_(path: &str) -> Node {
    call("use", vec![alias_ref(path)])
}

/// Builds `import Foo`.
#[must_use]
pub fn import(path: &str) -> Node {
    call("import", vec![alias_ref(path)])
}

/// Builds `require Foo`.
#[must_use]
pub fn require(path: &str) -> Node {
    call("require", vec![alias_ref(path)])
}

/// Builds `@moduledoc value`.
#[must_use]
pub fn moduledoc(value: Node) -> Node {
    attr_assign("moduledoc", value)
}

/// Builds `@shortdoc value`.
#[must_use]
pub fn shortdoc(value: Node) -> Node {
    attr_assign("shortdoc", value)
}

/// Builds `@behaviour Foo`.
#[must_use]
pub fn behaviour(path: &str) -> Node {
    attr_assign("behaviour", alias_ref(path))
}
