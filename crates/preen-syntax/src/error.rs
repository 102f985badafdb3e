//! Error types for tree navigation and editing.
//!
//! Lookups on a [`SyntaxTree`](crate::SyntaxTree) return `Option`; only
//! edits that cannot be carried out report a [`TreeError`].

use thiserror::Error;

use crate::tree::NodeId;

/// Errors from cursor edits on a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The node identifier does not belong to the tree being edited.
    #[error("node {id} does not exist in this tree")]
    UnknownNode {
        /// The identifier that failed to resolve.
        id: NodeId,
    },

    /// A sibling edit was requested on a node without a parent.
    #[error("node {id} is the tree root and has no siblings")]
    NoParent {
        /// The focused root node.
        id: NodeId,
    },
}

impl TreeError {
    /// Creates an unknown node error.
    #[must_use]
    pub const fn unknown_node(id: NodeId) -> Self {
        Self::UnknownNode { id }
    }

    /// Creates a missing parent error.
    #[must_use]
    pub const fn no_parent(id: NodeId) -> Self {
        Self::NoParent { id }
    }
}
