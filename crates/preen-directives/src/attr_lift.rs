//! Lifting module attributes out of hoisted directives.
//!
//! A directive that reads `@name` can only move above the assignment of
//! `@name` if the value travels with it. The lifter replaces such reads with
//! a variable of the same name, rewrites the attribute assignment to read that
//! variable, and hands back `name = value` assignments that the caller places
//! ahead of the module definition.

use std::collections::BTreeSet;

use preen_syntax::{Node, NodeKind};

use crate::fold::{Visit, prewalk};

/// Tracks attribute assignments seen so far and the attributes lifted.
#[derive(Debug, Default)]
pub(crate) struct AttributeLifter {
    assigned: BTreeSet<String>,
    lifted: BTreeSet<String>,
}

impl AttributeLifter {
    /// Records that `@name` has been assigned before the next directive.
    pub(crate) fn record_assignment(&mut self, name: &str) {
        self.assigned.insert(name.to_owned());
    }

    /// Replaces reads of already assigned attributes inside `directive`.
    ///
    /// A `use` directive expands at compile time, so its reads become
    /// `unquote(name)`; every other directive reads the plain variable.
    pub(crate) fn lift(&mut self, directive: Node, deferred: bool) -> Node {
        if self.assigned.is_empty() {
            return directive;
        }
        let assigned = &self.assigned;
        let (rewritten, lifted) = prewalk(
            directive,
            BTreeSet::new(),
            &mut |current, mut names: BTreeSet<String>| match &current.kind {
                NodeKind::AttrRead(name) if assigned.contains(name) => {
                    names.insert(name.clone());
                    Visit::Skip(lifted_read(name, current.line, deferred), names)
                }
                _ => Visit::Descend(current, names),
            },
        );
        self.lifted.extend(lifted);
        rewritten
    }

    /// Returns whether any attribute has been lifted.
    pub(crate) fn has_lifts(&self) -> bool {
        !self.lifted.is_empty()
    }

    /// Returns the number of distinct attributes lifted.
    pub(crate) fn lifted_count(&self) -> usize {
        self.lifted.len()
    }

    /// Rewrites lifted attribute assignments among `statements`.
    ///
    /// Each `@name value` becomes `@name name`; the matching `name = value`
    /// assignments are returned in source order.
    pub(crate) fn rebind(&self, statements: Vec<Node>) -> (Vec<Node>, Vec<Node>) {
        let mut assignments = Vec::new();
        let rebound = statements
            .into_iter()
            .map(|statement| match self.lifted_value(&statement) {
                Some(name) => {
                    let line = statement.line;
                    let value = statement.children.into_iter().next().unwrap_or_default();
                    assignments.push(Node {
                        kind: NodeKind::Match,
                        line,
                        children: vec![variable(&name, line), value],
                    });
                    Node {
                        kind: NodeKind::AttrAssign(name.clone()),
                        line,
                        children: vec![variable(&name, line)],
                    }
                }
                None => statement,
            })
            .collect();
        (rebound, assignments)
    }

    fn lifted_value(&self, statement: &Node) -> Option<String> {
        match &statement.kind {
            NodeKind::AttrAssign(name)
                if statement.children.len() == 1 && self.lifted.contains(name) =>
            {
                Some(name.clone())
            }
            _ => None,
        }
    }
}

fn variable(name: &str, line: u32) -> Node {
    Node {
        kind: NodeKind::Var(name.to_owned()),
        line,
        children: Vec::new(),
    }
}

fn lifted_read(name: &str, line: u32, deferred: bool) -> Node {
    if deferred {
        Node {
            kind: NodeKind::Call(String::from("unquote")),
            line,
            children: vec![variable(name, line)],
        }
    } else {
        variable(name, line)
    }
}

#[cfg(test)]
mod tests {
    use preen_syntax::build::{alias_ref, attr, attr_assign, call, int, keywords};
    use preen_syntax::render;

    use super::*;

    fn use_with_opts() -> Node {
        call(
            "use",
            vec![alias_ref("Foo"), keywords(vec![("opts", attr("opts"))])],
        )
    }

    #[test]
    fn reads_of_unassigned_attributes_stay() {
        let mut lifter = AttributeLifter::default();
        let lifted = lifter.lift(use_with_opts(), true);
        assert_eq!(render(&lifted), "use Foo, opts: @opts");
        assert!(!lifter.has_lifts());
    }

    #[test]
    fn use_reads_become_unquoted_variables() {
        let mut lifter = AttributeLifter::default();
        lifter.record_assignment("opts");
        let lifted = lifter.lift(use_with_opts(), true);
        assert_eq!(render(&lifted), "use Foo, opts: unquote(opts)");
        assert_eq!(lifter.lifted_count(), 1);
    }

    #[test]
    fn other_directives_read_the_plain_variable() {
        let mut lifter = AttributeLifter::default();
        lifter.record_assignment("mod");
        let lifted = lifter.lift(call("alias", vec![attr("mod")]), false);
        assert_eq!(render(&lifted), "alias mod");
    }

    #[test]
    fn rebind_rewrites_only_lifted_assignments() {
        let mut lifter = AttributeLifter::default();
        lifter.record_assignment("opts");
        lifter.record_assignment("other");
        let _used = lifter.lift(use_with_opts(), true);

        let statements = vec![
            attr_assign("opts", int(1)).at(2),
            attr_assign("other", int(2)).at(3),
        ];
        let (rebound, assignments) = lifter.rebind(statements);
        let rendered: Vec<_> = rebound.iter().map(render).collect();
        assert_eq!(rendered, vec!["@opts opts", "@other 2"]);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments.first().map(render).as_deref(), Some("opts = 1"));
        assert_eq!(assignments.first().map(|node| node.line), Some(2));
    }
}
