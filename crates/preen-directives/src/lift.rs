//! Alias lifting: promoting repeated long module paths to `alias`
//! statements.
//!
//! The module's own scope is scanned for alias references of three or more
//! segments. Nested module definitions and quotations belong to other scopes
//! and are never rewritten; they are only consulted so that a new short name
//! cannot collide with a name used there.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use preen_config::StyleConfig;
use preen_syntax::{Node, NodeKind};
use tracing::trace;

use crate::DIRECTIVES_TARGET;
use crate::alias_env::AliasEnv;
use crate::fold::{Visit, prewalk};

const MIN_CHAIN_LEN: usize = 3;
const MIN_OCCURRENCES: usize = 2;

/// Module definitions that open a scope of their own.
const SCOPE_OPENERS: [&str; 3] = ["defmodule", "defprotocol", "defimpl"];

fn opens_scope(node: &Node) -> bool {
    node.call_name()
        .is_some_and(|name| SCOPE_OPENERS.contains(&name) || name == "quote")
}

/// What a scan of the module's own scope found.
#[derive(Debug, Default)]
struct Scan {
    /// Occurrence counts of long chains, in order of first appearance.
    chains: Vec<(Vec<String>, usize)>,
    index: HashMap<Vec<String>, usize>,
    /// Last segments of nested module and protocol names.
    submodules: BTreeSet<String>,
    /// Names bound by `alias` statements nested inside the scope.
    nested_bindings: BTreeSet<String>,
    /// First segments of every alias reference, nested scopes included, and
    /// of every existing alias target.
    leading: BTreeSet<String>,
}

impl Scan {
    fn count(&mut self, chain: &[String]) {
        if let Some(slot) = self
            .index
            .get(chain)
            .and_then(|position| self.chains.get_mut(*position))
        {
            slot.1 = slot.1.saturating_add(1);
            return;
        }
        self.index.insert(chain.to_vec(), self.chains.len());
        self.chains.push((chain.to_vec(), 1));
    }

    fn note_leading(&mut self, node: &Node) {
        node.walk(&mut |reference| {
            if let Some(first) = reference.alias_segments().and_then(<[String]>::first) {
                self.leading.insert(first.clone());
            }
        });
    }

    fn visit(&mut self, node: &Node) {
        if let Some(name) = node.call_name() {
            if SCOPE_OPENERS.contains(&name) {
                if name != "defimpl"
                    && let Some(last) = node
                        .call_args()
                        .first()
                        .and_then(Node::alias_segments)
                        .and_then(<[String]>::last)
                {
                    self.submodules.insert(last.clone());
                }
                self.note_leading(node);
                return;
            }
            if name == "quote" {
                self.note_leading(node);
                return;
            }
            if name == "alias" {
                let mut env = AliasEnv::default();
                env.define(node);
                self.nested_bindings
                    .extend(env.bindings().map(|(short, _)| short.to_owned()));
            }
        }
        if let Some(segments) = node.alias_segments() {
            if let Some(first) = segments.first() {
                self.leading.insert(first.clone());
            }
            if segments.len() >= MIN_CHAIN_LEN {
                self.count(segments);
            }
            return;
        }
        for child in &node.children {
            self.visit(child);
        }
    }
}

/// Chains chosen for promotion, in order of first appearance.
#[derive(Debug, Default)]
pub(crate) struct LiftPlan {
    chains: Vec<Vec<String>>,
}

impl LiftPlan {
    /// Decides which chains to promote.
    ///
    /// `env` holds the module's final `alias` block; `scope` is every
    /// statement that may be rewritten.
    #[must_use]
    pub(crate) fn new<'a, I>(env: &AliasEnv, scope: I, config: &StyleConfig) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut scan = Scan::default();
        for statement in scope {
            scan.visit(statement);
        }
        scan.leading.extend(env.heads().map(str::to_owned));

        let candidates: Vec<(Vec<String>, String)> = scan
            .chains
            .iter()
            .filter(|(chain, count)| {
                *count >= MIN_OCCURRENCES && effective_len(env, chain) >= MIN_CHAIN_LEN
            })
            .filter_map(|(chain, _)| chain.last().map(|short| (chain.clone(), short.clone())))
            .collect();

        let mut claims: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, short) in &candidates {
            let claimed = claims.entry(short.as_str()).or_default();
            *claimed = claimed.saturating_add(1);
        }

        let chains = candidates
            .iter()
            .filter(|(chain, short)| {
                let veto = veto_reason(short, env, &scan, config).or_else(|| {
                    (claims.get(short.as_str()).copied().unwrap_or_default() > 1)
                        .then_some("shared by another candidate")
                });
                if let Some(reason) = veto {
                    trace!(
                        target: DIRECTIVES_TARGET,
                        chain = %chain.join("."),
                        reason,
                        "alias lift vetoed"
                    );
                }
                veto.is_none()
            })
            .map(|(chain, _)| chain.clone())
            .collect();
        Self { chains }
    }

    /// Returns whether nothing will be promoted.
    #[must_use]
    pub(crate) const fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns the number of chains promoted.
    #[must_use]
    pub(crate) const fn len(&self) -> usize {
        self.chains.len()
    }

    /// Builds the new `alias` statements, expanded against `env` and placed
    /// on `line`.
    #[must_use]
    pub(crate) fn statements(&self, env: &AliasEnv, line: u32) -> Vec<Node> {
        self.chains
            .iter()
            .map(|chain| Node {
                kind: NodeKind::Call(String::from("alias")),
                line,
                children: vec![Node {
                    kind: NodeKind::Alias(env.resolve(chain)),
                    line,
                    children: Vec::new(),
                }],
            })
            .collect()
    }

    /// Rewrites exact occurrences of promoted chains in the module's own
    /// scope to their last segment.
    ///
    /// Returns the rewritten statement and the number of references changed.
    #[must_use]
    pub(crate) fn rewrite(&self, statement: Node) -> (Node, usize) {
        if self.is_empty() {
            return (statement, 0);
        }
        prewalk(statement, 0, &mut |mut current, count| {
            if opens_scope(&current) {
                return Visit::Skip(current, count);
            }
            let short = match &current.kind {
                NodeKind::Alias(segments) if self.chains.contains(segments) => {
                    segments.last().cloned()
                }
                NodeKind::Alias(_) => return Visit::Skip(current, count),
                _ => return Visit::Descend(current, count),
            };
            match short {
                Some(name) => {
                    current.kind = NodeKind::Alias(vec![name]);
                    Visit::Skip(current, count + 1)
                }
                None => Visit::Skip(current, count),
            }
        })
    }
}

/// Length of `chain` as it would be written given the existing aliases:
/// the longest bound path prefix collapses to one segment.
fn effective_len(env: &AliasEnv, chain: &[String]) -> usize {
    let covered = env
        .bindings()
        .map(|(_, path)| path)
        .filter(|path| chain.starts_with(path))
        .map(<[String]>::len)
        .max()
        .unwrap_or_default();
    if covered == 0 {
        chain.len()
    } else {
        chain.len().saturating_sub(covered).saturating_add(1)
    }
}

fn veto_reason(
    short: &str,
    env: &AliasEnv,
    scan: &Scan,
    config: &StyleConfig,
) -> Option<&'static str> {
    if config.is_lift_excluded(short) {
        Some("excluded by configuration")
    } else if config.is_stdlib_name(short) {
        Some("standard-library name")
    } else if env.binds(short) {
        Some("already aliased")
    } else if scan.submodules.contains(short) {
        Some("nested module name")
    } else if scan.nested_bindings.contains(short) {
        Some("bound by a nested alias")
    } else if scan.leading.contains(short) {
        Some("leading segment of a reference or alias target")
    } else {
        None
    }
}
