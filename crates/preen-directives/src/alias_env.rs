//! Alias environments: which short names an `alias` statement has bound.

use std::collections::BTreeMap;

use preen_syntax::{Node, NodeKind};

use crate::fold::{Visit, prewalk};

/// The namespace every module path is rooted in. A path starting with it is
/// never expanded through an alias.
pub(crate) const ROOT_NAMESPACE: &str = "Elixir";

/// Short names bound by the `alias` statements seen so far, each mapped to
/// its fully expanded path.
///
/// # Example
///
/// ```
/// use preen_directives::AliasEnv;
/// use preen_syntax::{build, render};
///
/// let mut env = AliasEnv::default();
/// env.define(&build::alias("Foo.Bar"));
/// let (expanded, rewritten) = env.expand(build::import("Bar.Baz"));
/// assert_eq!(render(&expanded), "import Foo.Bar.Baz");
/// assert_eq!(rewritten, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasEnv {
    bindings: BTreeMap<String, Vec<String>>,
}

impl AliasEnv {
    /// Builds an environment from `alias` statements in order.
    #[must_use]
    pub fn from_statements<'a, I>(statements: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut env = Self::default();
        for statement in statements {
            env.define(statement);
        }
        env
    }

    /// Records the binding made by an `alias` statement.
    ///
    /// `alias A.B` binds `B`; `alias A.B, as: C` binds `C`. The bound path is
    /// itself expanded against earlier bindings. Statements that bind nothing
    /// recognisable are ignored.
    pub fn define(&mut self, statement: &Node) {
        if !statement.is_call("alias") {
            return;
        }
        let Some((target, options)) = statement.children.split_first() else {
            return;
        };
        let Some(segments) = target.alias_segments() else {
            return;
        };
        let name = options
            .first()
            .and_then(as_option)
            .or_else(|| segments.last().cloned());
        if let Some(short) = name {
            let path = self.resolve(segments);
            self.bindings.insert(short, path);
        }
    }

    /// Returns the path bound to `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&[String]> {
        self.bindings.get(name).map(Vec::as_slice)
    }

    /// Returns whether `name` is bound.
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates over `(short name, expanded path)` bindings.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.bindings
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_slice()))
    }

    /// Iterates over the first real segment of every bound path, skipping
    /// an explicit [`ROOT_NAMESPACE`].
    pub(crate) fn heads(&self) -> impl Iterator<Item = &str> {
        self.bindings.values().filter_map(|path| {
            let unrooted = match path.split_first() {
                Some((first, rest)) if first == ROOT_NAMESPACE => rest,
                _ => path.as_slice(),
            };
            unrooted.first().map(String::as_str)
        })
    }

    /// Returns whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Expands `segments` by substituting a bound first segment.
    #[must_use]
    pub fn resolve(&self, segments: &[String]) -> Vec<String> {
        self.resolve_bound(segments)
            .unwrap_or_else(|| segments.to_vec())
    }

    fn resolve_bound(&self, segments: &[String]) -> Option<Vec<String>> {
        let (first, rest) = segments.split_first()?;
        let bound = self.bindings.get(first)?;
        let mut path = bound.clone();
        path.extend_from_slice(rest);
        Some(path)
    }

    /// Rewrites every alias reference in `node` to its expanded form.
    ///
    /// Returns the rewritten node and the number of references changed.
    #[must_use]
    pub fn expand(&self, node: Node) -> (Node, usize) {
        prewalk(node, 0, &mut |mut current, count| {
            let resolved = match &current.kind {
                NodeKind::Alias(segments) => self.resolve_bound(segments),
                _ => return Visit::Descend(current, count),
            };
            match resolved {
                Some(path) => {
                    current.kind = NodeKind::Alias(path);
                    Visit::Skip(current, count + 1)
                }
                None => Visit::Skip(current, count),
            }
        })
    }

    /// Expands only the target of a statement, leaving any options alone.
    ///
    /// Used for `alias` statements, whose `as:` name is a binding rather than
    /// a reference.
    #[must_use]
    pub fn expand_target(&self, mut statement: Node) -> (Node, usize) {
        let count = statement.children.first_mut().map_or(0, |target| {
            let (expanded, rewritten) = self.expand(std::mem::take(target));
            *target = expanded;
            rewritten
        });
        (statement, count)
    }
}

/// Reads the short name from an `as: Name` option list.
fn as_option(options: &Node) -> Option<String> {
    if options.kind != NodeKind::KeywordList {
        return None;
    }
    options
        .children
        .iter()
        .find(|pair| pair.kind == NodeKind::Pair(String::from("as")))
        .and_then(|pair| pair.children.first())
        .and_then(Node::alias_segments)
        .and_then(<[String]>::last)
        .cloned()
}
