//! Module directive organisation for the Preen style enforcer.
//!
//! This crate rewrites module definitions so their preamble follows one
//! layout:
//!
//! 1. `@shortdoc`, then `@moduledoc` (synthesised as `@moduledoc false`
//!    when missing)
//! 2. `@behaviour`
//! 3. `use`
//! 4. `import`
//! 5. `alias`
//! 6. `require`
//! 7. everything else, in its original order
//!
//! Along the way multi-target directives are split, references are expanded
//! through earlier aliases, categories other than `use` are sorted and
//! deduplicated, repeated long module paths are lifted into new aliases, and
//! attributes read by hoisted directives are lifted ahead of the module.
//!
//! The entry points are [`organise_tree`] for a whole file and
//! [`organise_module`] for a single definition. Both are fail-soft: anything
//! they cannot handle is left as it was.
//!
//! Events are emitted under the [`DIRECTIVES_TARGET`] tracing target.

mod alias_env;
mod attr_lift;
mod directive;
mod error;
mod expand;
mod fold;
mod layout;
mod lift;
mod organise;
mod outcome;
mod sort;
mod walk;

pub use alias_env::AliasEnv;
pub use directive::{Classified, DirectiveKind, classify, is_moduledoc, is_statement_directive};
pub use expand::expand_multi_target;
pub use layout::DEFAULT_ANCHOR_LINE;
pub use outcome::{ChangeSummary, Outcome};
pub use walk::{organise_module, organise_tree};

/// Tracing target for directive organisation events.
pub const DIRECTIVES_TARGET: &str = "preen::directives";

#[cfg(test)]
mod tests;
