//! Whole-tree traversal and the public entry points.

use preen_config::StyleConfig;
use preen_syntax::{Cursor, NodeKind, SyntaxTree};
use tracing::{debug, warn};

use crate::DIRECTIVES_TARGET;
use crate::directive::DirectiveKind;
use crate::error::OrganiseError;
use crate::organise::{Scope, is_module_body, organise_module_at, organise_region};
use crate::outcome::{ChangeSummary, Outcome};

/// Organises the module definition under `module`.
///
/// Nested modules are left for [`organise_tree`]. Failures are logged and
/// leave the module as it was.
pub fn organise_module(tree: &mut SyntaxTree, module: &Cursor, config: &StyleConfig) -> Outcome {
    match organise_module_at(tree, module.clone(), config) {
        Ok((_, summary)) => Outcome::from_summary(summary),
        Err(error) => {
            warn!(target: DIRECTIVES_TARGET, %error, "module left unorganised");
            Outcome::Unchanged
        }
    }
}

/// Organises every module definition and directive block in `tree`.
///
/// Module bodies are handled first and their contents afterwards, so nested
/// modules are organised in their own scope. Quotations are template code
/// and are never entered. A failure stops the walk; the
/// outcome reports what was done before it.
pub fn organise_tree(tree: &mut SyntaxTree, config: &StyleConfig) -> Outcome {
    let mut summary = ChangeSummary::default();
    let root = Cursor::root(tree);
    if let Err(error) = walk(tree, root, config, &mut summary) {
        warn!(target: DIRECTIVES_TARGET, %error, "organising stopped early");
    }
    debug!(
        target: DIRECTIVES_TARGET,
        regions = summary.regions,
        "tree organised"
    );
    Outcome::from_summary(summary)
}

fn walk(
    tree: &mut SyntaxTree,
    cursor: Cursor,
    config: &StyleConfig,
    summary: &mut ChangeSummary,
) -> Result<Cursor, OrganiseError> {
    let visited = match tree.kind(cursor.focus()) {
        Some(NodeKind::Call(name)) if name == "quote" => return Ok(cursor),
        Some(NodeKind::Call(name)) if name == "defmodule" => {
            let (module, changes) = organise_module_at(tree, cursor, config)?;
            summary.merge(&changes);
            module
        }
        Some(NodeKind::Block) if holds_directive(tree, &cursor) && !is_module_body(tree, &cursor) => {
            let (block, changes) = organise_region(tree, cursor, &Scope::Block, config)?;
            summary.merge(&changes);
            block
        }
        _ => cursor,
    };
    walk_children(tree, visited, config, summary)
}

/// Walks every child of `cursor` and returns a cursor back on it.
///
/// Lifting may insert siblings before, or wrap, an ancestor of the child
/// just walked; the returned child cursor is climbed back to this level
/// before moving right.
fn walk_children(
    tree: &mut SyntaxTree,
    cursor: Cursor,
    config: &StyleConfig,
    summary: &mut ChangeSummary,
) -> Result<Cursor, OrganiseError> {
    let parent = cursor.focus();
    let Some(first) = cursor.down(tree) else {
        return Ok(cursor);
    };
    let mut child = first;
    loop {
        let mut done = walk(tree, child, config, summary)?;
        while done.parent() != Some(parent) {
            done = done.up().ok_or_else(|| OrganiseError::detached(parent))?;
        }
        match done.right(tree) {
            Some(next) => child = next,
            None => return done.up().ok_or_else(|| OrganiseError::detached(parent)),
        }
    }
}

fn holds_directive(tree: &SyntaxTree, cursor: &Cursor) -> bool {
    cursor.children(tree).iter().any(|child| {
        matches!(
            tree.kind(*child),
            Some(NodeKind::Call(name)) if DirectiveKind::from_call(name).is_some()
        )
    })
}
