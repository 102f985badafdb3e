//! Organising one module body or directive block.
//!
//! [`organise_statements`] computes the new statement list without touching
//! the tree; [`organise_region`] writes it back and places any lifted
//! attribute assignments ahead of the enclosing definition.

use std::collections::BTreeMap;

use preen_config::StyleConfig;
use preen_syntax::{Cursor, Node, NodeId, NodeKind, SyntaxTree};
use tracing::debug;

use crate::DIRECTIVES_TARGET;
use crate::alias_env::AliasEnv;
use crate::attr_lift::AttributeLifter;
use crate::directive::{Classified, DirectiveKind, classify, is_moduledoc};
use crate::error::OrganiseError;
use crate::expand::expand_multi_target;
use crate::layout::{DEFAULT_ANCHOR_LINE, anchor_line, repair_lines, synthesise_moduledoc};
use crate::lift::LiftPlan;
use crate::outcome::ChangeSummary;
use crate::sort::{sort_aliases, sort_dedup};

/// Where a region sits, which decides the rewrites it gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scope {
    /// A module body. Documentation may be synthesised, and aliases and
    /// attributes may be lifted.
    Module {
        /// The `@moduledoc` to add when the body has none.
        moduledoc: Option<Node>,
    },
    /// Any other block holding directives: grouping, sorting and
    /// deduplication only.
    Block,
}

impl Scope {
    const fn is_module(&self) -> bool {
        matches!(self, Self::Module { .. })
    }
}

/// A reorganised statement list.
#[derive(Debug, Default)]
pub(crate) struct Organised {
    /// The new statements: the preamble followed by everything else.
    pub(crate) statements: Vec<Node>,
    /// `name = value` assignments for lifted attributes, to be placed before
    /// the enclosing definition.
    pub(crate) assignments: Vec<Node>,
    /// What changed.
    pub(crate) summary: ChangeSummary,
}

/// Groups, canonicalises and orders the directives among `statements`.
#[must_use]
pub(crate) fn organise_statements(
    statements: Vec<Node>,
    scope: &Scope,
    config: &StyleConfig,
) -> Organised {
    let mut summary = ChangeSummary::default();
    let mut env = AliasEnv::default();
    let mut lifter = AttributeLifter::default();
    let mut buckets: BTreeMap<DirectiveKind, Vec<Node>> = BTreeMap::new();
    let mut rest = Vec::new();

    for statement in statements {
        match classify(&statement) {
            Classified::Directive(kind) => {
                let expanded = expand_multi_target(statement);
                summary.expanded_statements = summary
                    .expanded_statements
                    .saturating_add(expanded.len().saturating_sub(1));
                for directive in expanded {
                    let lifted = lifter.lift(directive, kind == DirectiveKind::Use);
                    let (canonical, rewritten) = if !kind.is_dealiased() {
                        (lifted, 0)
                    } else if kind == DirectiveKind::Alias {
                        env.expand_target(lifted)
                    } else {
                        env.expand(lifted)
                    };
                    summary.dealiased_references =
                        summary.dealiased_references.saturating_add(rewritten);
                    if kind == DirectiveKind::Alias {
                        env.define(&canonical);
                    }
                    buckets.entry(kind).or_default().push(canonical);
                }
            }
            Classified::Attribute(name) => {
                if scope.is_module() {
                    lifter.record_assignment(&name);
                }
                rest.push(statement);
            }
            Classified::Other => rest.push(statement),
        }
    }

    if let Scope::Module {
        moduledoc: Some(doc),
    } = scope
    {
        let docs = buckets.entry(DirectiveKind::ModuleDoc).or_default();
        if docs.is_empty() {
            docs.push(doc.clone());
            summary.moduledocs_added = summary.moduledocs_added.saturating_add(1);
        }
    }

    for (kind, bucket) in &mut buckets {
        if !kind.is_sorted() {
            continue;
        }
        let taken = std::mem::take(bucket);
        let (sorted, removed) = if *kind == DirectiveKind::Alias {
            sort_aliases(taken)
        } else {
            sort_dedup(taken)
        };
        *bucket = sorted;
        summary.removed_statements = summary.removed_statements.saturating_add(removed);
    }

    if scope.is_module() {
        rest = lift_aliases(&mut buckets, rest, config, &mut summary);
    }

    let (tail, assignments) = if lifter.has_lifts() {
        summary.lifted_attributes = lifter.lifted_count();
        lifter.rebind(rest)
    } else {
        (rest, Vec::new())
    };

    let mut preamble: Vec<Node> = buckets.into_values().flatten().collect();
    repair_lines(&mut preamble, anchor_line(&tail));
    preamble.extend(tail);
    Organised {
        statements: preamble,
        assignments,
        summary,
    }
}

/// Promotes repeated long references in `rest` and the `require` block to
/// new aliases.
fn lift_aliases(
    buckets: &mut BTreeMap<DirectiveKind, Vec<Node>>,
    rest: Vec<Node>,
    config: &StyleConfig,
    summary: &mut ChangeSummary,
) -> Vec<Node> {
    let requires = buckets.remove(&DirectiveKind::Require).unwrap_or_default();
    let aliases = buckets.remove(&DirectiveKind::Alias).unwrap_or_default();
    let env = AliasEnv::from_statements(&aliases);
    let plan = LiftPlan::new(&env, requires.iter().chain(&rest), config);

    if plan.is_empty() {
        restore(buckets, DirectiveKind::Alias, aliases);
        restore(buckets, DirectiveKind::Require, requires);
        return rest;
    }

    let mut shortened = 0_usize;
    let mut rewrite = |statement: Node| {
        let (rewritten, count) = plan.rewrite(statement);
        shortened = shortened.saturating_add(count);
        rewritten
    };
    let rewritten_requires: Vec<Node> = requires.into_iter().map(&mut rewrite).collect();
    let rewritten_rest: Vec<Node> = rest.into_iter().map(&mut rewrite).collect();

    let mut extended = aliases;
    extended.extend(plan.statements(&env, DEFAULT_ANCHOR_LINE));
    let (sorted_aliases, _) = sort_aliases(extended);
    let (sorted_requires, _) = sort_dedup(rewritten_requires);
    restore(buckets, DirectiveKind::Alias, sorted_aliases);
    restore(buckets, DirectiveKind::Require, sorted_requires);

    summary.lifted_aliases = summary.lifted_aliases.saturating_add(plan.len());
    summary.shortened_references = summary.shortened_references.saturating_add(shortened);
    rewritten_rest
}

fn restore(buckets: &mut BTreeMap<DirectiveKind, Vec<Node>>, kind: DirectiveKind, nodes: Vec<Node>) {
    if !nodes.is_empty() {
        buckets.insert(kind, nodes);
    }
}

/// Where lifted attribute assignments go.
enum LiftSite {
    /// Before this statement, which already sits in a block.
    Before(Cursor),
    /// Around this node: it is replaced by a block of the assignments
    /// followed by the node itself.
    Wrap(Cursor),
}

/// Finds the definition owning `region` and decides how to place
/// assignments ahead of it.
fn lift_site(tree: &SyntaxTree, region: &Cursor) -> LiftSite {
    let owner = region
        .find_ancestor(tree, |arena, cursor| {
            matches!(
                arena.kind(cursor.focus()),
                Some(NodeKind::Call(_) | NodeKind::RemoteCall(_))
            )
        })
        .unwrap_or_else(|| region.clone());
    let in_block = owner.parent().and_then(|parent| tree.kind(parent)) == Some(&NodeKind::Block);
    if in_block {
        LiftSite::Before(owner)
    } else {
        LiftSite::Wrap(owner)
    }
}

fn place_assignments(
    tree: &mut SyntaxTree,
    site: LiftSite,
    assignments: &[Node],
) -> Result<(), OrganiseError> {
    let ids: Vec<NodeId> = assignments.iter().map(|node| tree.alloc(node)).collect();
    match site {
        LiftSite::Before(owner) => {
            owner.insert_left(tree, ids)?;
        }
        LiftSite::Wrap(owner) => {
            let wrapper = tree.alloc(&Node::leaf(NodeKind::Block));
            let mut children = ids;
            children.push(owner.focus());
            tree.set_children(wrapper, children)?;
            owner.replace(tree, wrapper)?;
        }
    }
    Ok(())
}

/// Organises the children of the block at `region` and writes the result
/// back.
///
/// Returns a cursor on the same block, valid for the edited tree, and what
/// changed. An unchanged region is never written.
pub(crate) fn organise_region(
    tree: &mut SyntaxTree,
    region: Cursor,
    scope: &Scope,
    config: &StyleConfig,
) -> Result<(Cursor, ChangeSummary), OrganiseError> {
    let id = region.focus();
    let before = region
        .children(tree)
        .iter()
        .map(|child| tree.snapshot(*child).ok_or_else(|| OrganiseError::detached(*child)))
        .collect::<Result<Vec<_>, _>>()?;

    let organised = organise_statements(before.clone(), scope, config);
    if organised.statements == before && organised.assignments.is_empty() {
        return Ok((region, ChangeSummary::default()));
    }

    let located = if organised.assignments.is_empty() {
        region
    } else {
        let site = lift_site(tree, &region);
        place_assignments(tree, site, &organised.assignments)?;
        Cursor::root(tree)
            .find(tree, id)
            .ok_or_else(|| OrganiseError::detached(id))?
    };
    let ids = organised
        .statements
        .iter()
        .map(|node| tree.alloc(node))
        .collect();
    let written = located.replace_children(tree, ids)?;

    let mut summary = organised.summary;
    summary.regions = 1;
    debug!(
        target: DIRECTIVES_TARGET,
        region = %id,
        expanded = summary.expanded_statements,
        removed = summary.removed_statements,
        lifted_aliases = summary.lifted_aliases,
        lifted_attributes = summary.lifted_attributes,
        moduledoc_added = summary.moduledocs_added > 0,
        "organised directives"
    );
    Ok((written, summary))
}

/// Returns whether `node` is `defmodule Name do ... end`.
#[must_use]
pub(crate) fn is_module_definition(node: &Node) -> bool {
    node.is_call("defmodule") && node.call_args().len() == 1 && node.do_body().is_some()
}

/// Moves from a module definition to its do-block body.
#[must_use]
pub(crate) fn module_body(tree: &SyntaxTree, module: &Cursor) -> Option<Cursor> {
    let last = module.children(tree).len().checked_sub(1)?;
    module.child(tree, last)?.down(tree)?.down(tree)
}

/// Returns whether the block at `cursor` is the body of a module definition.
#[must_use]
pub(crate) fn is_module_body(tree: &SyntaxTree, cursor: &Cursor) -> bool {
    let Some(pair) = cursor.up() else {
        return false;
    };
    let owner = pair.up().and_then(|keywords| keywords.up());
    tree.kind(pair.focus()) == Some(&NodeKind::Pair(String::from("do")))
        && owner.is_some_and(|module| {
            tree.kind(module.focus()) == Some(&NodeKind::Call(String::from("defmodule")))
        })
}

/// Organises the module definition at `module`.
///
/// Returns a cursor on the module, valid for the edited tree, and what
/// changed.
pub(crate) fn organise_module_at(
    tree: &mut SyntaxTree,
    module: Cursor,
    config: &StyleConfig,
) -> Result<(Cursor, ChangeSummary), OrganiseError> {
    let id = module.focus();
    let definition = tree.snapshot(id).ok_or_else(|| OrganiseError::detached(id))?;
    let Some(body) = definition.do_body().filter(|_| is_module_definition(&definition)) else {
        return Ok((module, ChangeSummary::default()));
    };
    let moduledoc = synthesise_moduledoc(&definition, config);
    let needs_doc = moduledoc.is_some();

    let organise_body = match (&body.kind, body.children.as_slice()) {
        (NodeKind::Block, [] | [_]) => {
            needs_doc && !body.children.first().is_some_and(is_moduledoc)
        }
        (NodeKind::Block, _) => true,
        _ => needs_doc && !is_moduledoc(body),
    };
    if !organise_body {
        return Ok((module, ChangeSummary::default()));
    }

    let body_is_block = body.kind == NodeKind::Block;
    let mut region = module_body(tree, &module).ok_or_else(|| OrganiseError::detached(id))?;
    if !body_is_block {
        let wrapper = tree.alloc(&Node::leaf(NodeKind::Block));
        tree.set_children(wrapper, vec![region.focus()])?;
        region = region.replace(tree, wrapper)?;
    }

    let (organised, summary) = organise_region(tree, region, &Scope::Module { moduledoc }, config)?;
    let located = organised
        .up()
        .and_then(|pair| pair.up())
        .and_then(|keywords| keywords.up())
        .ok_or_else(|| OrganiseError::detached(id))?;
    Ok((located, summary))
}
