//! Canonical rendering of nodes in surface syntax.
//!
//! The rendering is deterministic and close to what the host language's
//! formatter prints: do-blocks span lines with two-space indentation and
//! everything else stays on one line. Sorting keys are derived from it, so
//! two statements render identically exactly when they are the same
//! statement.

use crate::node::{Node, NodeKind};

/// Calls printed without parentheses around their arguments.
const PARENLESS_CALLS: &[&str] = &[
    "alias",
    "def",
    "defdelegate",
    "defexception",
    "defguard",
    "defimpl",
    "defmacro",
    "defmacrop",
    "defmodule",
    "defp",
    "defprotocol",
    "defstruct",
    "import",
    "quote",
    "require",
    "use",
];

const INDENT: &str = "  ";

/// Renders a node.
#[must_use]
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match &node.kind {
        NodeKind::Block => {
            for (position, child) in node.children.iter().enumerate() {
                if position > 0 {
                    out.push('\n');
                    write_indent(out, depth);
                }
                write_node(out, child, depth);
            }
        }
        NodeKind::Alias(segments) => out.push_str(&segments.join(".")),
        NodeKind::ModuleSelf => out.push_str("__MODULE__"),
        NodeKind::MultiAlias => {
            let (root, targets) = match node.children.split_first() {
                Some((root, targets)) => (Some(root), targets),
                None => (None, &[][..]),
            };
            if let Some(root) = root {
                write_node(out, root, depth);
            }
            out.push_str(".{");
            write_list(out, targets, depth);
            out.push('}');
        }
        NodeKind::AttrRead(name) => {
            out.push('@');
            out.push_str(name);
        }
        NodeKind::AttrAssign(name) => {
            out.push('@');
            out.push_str(name);
            for value in &node.children {
                out.push(' ');
                write_node(out, value, depth);
            }
        }
        NodeKind::Call(name) => write_call(out, node, name, None, depth),
        NodeKind::RemoteCall(name) => {
            let receiver = node.children.first();
            write_call(out, node, name, receiver, depth);
        }
        NodeKind::KeywordList => {
            out.push('[');
            write_list(out, &node.children, depth);
            out.push(']');
        }
        NodeKind::Pair(key) => {
            out.push_str(key);
            out.push(':');
            for value in &node.children {
                out.push(' ');
                write_node(out, value, depth);
            }
        }
        NodeKind::Match => {
            if let [left, right] = node.children.as_slice() {
                write_node(out, left, depth);
                out.push_str(" = ");
                write_node(out, right, depth);
            } else {
                write_list(out, &node.children, depth);
            }
        }
        NodeKind::Var(name) => out.push_str(name),
        NodeKind::Atom(name) => {
            out.push(':');
            out.push_str(name);
        }
        NodeKind::Str(value) => write_string(out, value),
        NodeKind::Int(value) => out.push_str(&value.to_string()),
        NodeKind::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        NodeKind::Nil => out.push_str("nil"),
    }
}

fn write_list(out: &mut String, items: &[Node], depth: usize) {
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        write_node(out, item, depth);
    }
}

/// Writes call arguments; a trailing keyword list loses its brackets.
fn write_args(out: &mut String, args: &[Node], depth: usize) {
    for (position, arg) in args.iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        let is_last = position.saturating_add(1) == args.len();
        if is_last && arg.kind == NodeKind::KeywordList && !arg.children.is_empty() {
            write_list(out, &arg.children, depth);
        } else {
            write_node(out, arg, depth);
        }
    }
}

fn write_call(out: &mut String, node: &Node, name: &str, receiver: Option<&Node>, depth: usize) {
    let args = node.call_args();
    let body = node.do_body();

    if let Some(receiver) = receiver {
        write_node(out, receiver, depth);
        out.push('.');
    }
    out.push_str(name);

    let parenless = receiver.is_none() && PARENLESS_CALLS.contains(&name);
    if parenless {
        if !args.is_empty() {
            out.push(' ');
            write_args(out, args, depth);
        }
    } else if !(args.is_empty() && body.is_some()) {
        out.push('(');
        write_args(out, args, depth);
        out.push(')');
    }

    if let Some(body) = body {
        out.push_str(" do");
        let empty = body.kind == NodeKind::Block && body.children.is_empty();
        if !empty {
            out.push('\n');
            write_indent(out, depth.saturating_add(1));
            write_node(out, body, depth.saturating_add(1));
        }
        out.push('\n');
        write_indent(out, depth);
        out.push_str("end");
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
}
