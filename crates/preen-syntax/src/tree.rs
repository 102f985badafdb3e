//! Arena storage for syntax trees.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`]. Identifiers
//! stay valid for the lifetime of the tree: edits relink children but never
//! move or free slots, so a captured identifier can always be located again
//! after surrounding edits.

use std::fmt;

use crate::error::TreeError;
use crate::node::{Node, NodeKind};
use crate::render;

/// Identifier of a node within a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    line: u32,
    children: Vec<NodeId>,
}

/// A mutable syntax tree backed by an arena.
///
/// # Example
///
/// ```
/// use preen_syntax::{SyntaxTree, build};
///
/// let tree = SyntaxTree::new(&build::alias("Foo.Bar"));
/// assert_eq!(tree.render(tree.root()), "alias Foo.Bar");
/// ```
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    slots: Vec<Slot>,
    root: NodeId,
}

impl SyntaxTree {
    /// Builds a tree holding a copy of `root`.
    #[must_use]
    pub fn new(root: &Node) -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc(root);
        tree
    }

    /// Returns the root node identifier.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Makes `id` the new root.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not part of this arena.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        if self.slots.get(id.0).is_none() {
            return Err(TreeError::unknown_node(id));
        }
        self.root = id;
        Ok(())
    }

    /// Returns the number of allocated slots, reachable or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the arena is empty. A constructed tree never is.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Copies an owned subtree into the arena and returns its identifier.
    ///
    /// The new subtree is detached until linked with a cursor edit.
    pub fn alloc(&mut self, node: &Node) -> NodeId {
        let children = node.children.iter().map(|child| self.alloc(child)).collect();
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            kind: node.kind.clone(),
            line: node.line,
            children,
        });
        id
    }

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.slots.get(id.0).map(|slot| &slot.kind)
    }

    /// Returns the source line of a node.
    #[must_use]
    pub fn line(&self, id: NodeId) -> Option<u32> {
        self.slots.get(id.0).map(|slot| slot.line)
    }

    /// Returns the ordered children of a node; empty for unknown nodes.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.0)
            .map(|slot| slot.children.as_slice())
            .unwrap_or_default()
    }

    /// Replaces the children of a node wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` or any child is not part of
    /// this arena.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) -> Result<(), TreeError> {
        if let Some(missing) = children.iter().find(|child| child.0 >= self.slots.len()) {
            return Err(TreeError::unknown_node(*missing));
        }
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or_else(|| TreeError::unknown_node(id))?;
        slot.children = children;
        Ok(())
    }

    /// Copies a subtree out of the arena.
    #[must_use]
    pub fn snapshot(&self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get(id.0)?;
        let children = slot
            .children
            .iter()
            .map(|child| self.snapshot(*child))
            .collect::<Option<Vec<_>>>()?;
        Some(Node {
            kind: slot.kind.clone(),
            line: slot.line,
            children,
        })
    }

    /// Copies the whole reachable tree out of the arena.
    #[must_use]
    pub fn to_node(&self) -> Node {
        self.snapshot(self.root).unwrap_or_default()
    }

    /// Renders a subtree in canonical surface syntax.
    #[must_use]
    pub fn render(&self, id: NodeId) -> String {
        self.snapshot(id)
            .map(|node| render::render(&node))
            .unwrap_or_default()
    }
}
