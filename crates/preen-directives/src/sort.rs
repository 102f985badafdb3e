//! Ordering and deduplication within a directive category.

use std::collections::HashSet;

use preen_syntax::{Node, NodeKind, render};

use crate::alias_env::{AliasEnv, ROOT_NAMESPACE};

/// Removes duplicates and sorts `statements` by their lowercased canonical
/// text.
///
/// The first occurrence of a duplicate wins and the sort is stable. Returns
/// the ordered statements and the number removed.
#[must_use]
pub(crate) fn sort_dedup(statements: Vec<Node>) -> (Vec<Node>, usize) {
    let before = statements.len();
    let mut seen = HashSet::new();
    let mut keyed: Vec<(String, Node)> = statements
        .into_iter()
        .map(|statement| (render(&statement).to_lowercase(), statement))
        .filter(|(key, _)| seen.insert(key.clone()))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
    let sorted: Vec<Node> = keyed.into_iter().map(|(_, statement)| statement).collect();
    let removed = before.saturating_sub(sorted.len());
    (sorted, removed)
}

/// Returns whether `statement` is `alias X` for a single-segment `X`, which
/// binds a name to itself.
#[must_use]
pub(crate) fn is_noop_alias(statement: &Node) -> bool {
    statement.is_call("alias")
        && matches!(
            statement.children.as_slice(),
            [Node { kind: NodeKind::Alias(segments), .. }] if segments.len() == 1
        )
}

/// Sorts an `alias` category, dropping no-op aliases first.
///
/// Sorting can move an alias below another that binds its first segment,
/// which would change what it refers to. Such targets are rooted in
/// [`ROOT_NAMESPACE`] and the category is sorted again until nothing more
/// is captured.
#[must_use]
pub(crate) fn sort_aliases(statements: Vec<Node>) -> (Vec<Node>, usize) {
    let before = statements.len();
    let kept: Vec<Node> = statements
        .into_iter()
        .filter(|statement| !is_noop_alias(statement))
        .collect();
    let (mut sorted, _) = sort_dedup(kept);
    loop {
        let (rooted, count) = root_captured(sorted);
        if count == 0 {
            let removed = before.saturating_sub(rooted.len());
            return (rooted, removed);
        }
        (sorted, _) = sort_dedup(rooted);
    }
}

/// Roots every alias target whose first segment is bound by an alias
/// above it. Returns the statements and how many were rooted.
fn root_captured(statements: Vec<Node>) -> (Vec<Node>, usize) {
    let mut env = AliasEnv::default();
    let mut count = 0_usize;
    let checked = statements
        .into_iter()
        .map(|mut statement| {
            if let Some(target) = statement.children.first_mut()
                && let NodeKind::Alias(segments) = &mut target.kind
                && segments
                    .first()
                    .is_some_and(|head| head != ROOT_NAMESPACE && env.binds(head))
            {
                segments.insert(0, String::from(ROOT_NAMESPACE));
                count = count.saturating_add(1);
            }
            env.define(&statement);
            statement
        })
        .collect();
    (checked, count)
}
