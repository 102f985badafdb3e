//! Internal failures while rewriting a region.
//!
//! The public entry points are fail-soft: these errors are logged and the
//! region they occurred in is left as it was.

use preen_syntax::{NodeId, TreeError};
use thiserror::Error;

/// Reasons a region could not be rewritten.
#[derive(Debug, Error)]
pub(crate) enum OrganiseError {
    /// An arena edit was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A node the pass relies on is no longer reachable from the root.
    #[error("node {id} is no longer reachable from the root")]
    Detached {
        /// The unreachable node.
        id: NodeId,
    },
}

impl OrganiseError {
    pub(crate) const fn detached(id: NodeId) -> Self {
        Self::Detached { id }
    }
}
