//! Cursor navigation and in-place editing.
//!
//! A [`Cursor`] is a focus node plus the path of `(parent, index)` frames
//! leading to it from the root. Moving is cheap and never touches the arena;
//! edits mutate the arena and hand back a cursor that reflects the new
//! structure, so callers can keep walking without re-traversing the tree.

use crate::error::TreeError;
use crate::tree::{NodeId, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    parent: NodeId,
    index: usize,
}

/// A position within a [`SyntaxTree`].
///
/// # Example
///
/// ```
/// use preen_syntax::{Cursor, SyntaxTree, build};
///
/// let tree = SyntaxTree::new(&build::block(vec![build::int(1), build::int(2)]));
/// let first = Cursor::root(&tree).down(&tree).unwrap();
/// let second = first.right(&tree).unwrap();
/// assert_eq!(tree.render(second.focus()), "2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    focus: NodeId,
    path: Vec<Frame>,
}

impl Cursor {
    /// Creates a cursor focused on the tree root.
    #[must_use]
    pub const fn root(tree: &SyntaxTree) -> Self {
        Self {
            focus: tree.root(),
            path: Vec::new(),
        }
    }

    /// Returns the focused node.
    #[must_use]
    pub const fn focus(&self) -> NodeId {
        self.focus
    }

    /// Returns the parent of the focused node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.path.last().map(|frame| frame.parent)
    }

    /// Returns the position of the focus among its siblings.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.path.last().map(|frame| frame.index)
    }

    /// Returns the number of ancestors above the focus.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.path.len()
    }

    fn descend(&self, child: NodeId, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(Frame {
            parent: self.focus,
            index,
        });
        Self { focus: child, path }
    }

    /// Moves to the first child.
    #[must_use]
    pub fn down(&self, tree: &SyntaxTree) -> Option<Self> {
        self.child(tree, 0)
    }

    /// Moves to the child at `index`.
    #[must_use]
    pub fn child(&self, tree: &SyntaxTree, index: usize) -> Option<Self> {
        let child = *tree.children(self.focus).get(index)?;
        Some(self.descend(child, index))
    }

    /// Moves to the parent.
    #[must_use]
    pub fn up(&self) -> Option<Self> {
        let mut path = self.path.clone();
        let frame = path.pop()?;
        Some(Self {
            focus: frame.parent,
            path,
        })
    }

    fn sibling(&self, tree: &SyntaxTree, index: usize) -> Option<Self> {
        let mut path = self.path.clone();
        let frame = path.pop()?;
        let focus = *tree.children(frame.parent).get(index)?;
        path.push(Frame {
            parent: frame.parent,
            index,
        });
        Some(Self { focus, path })
    }

    /// Moves to the next sibling.
    #[must_use]
    pub fn right(&self, tree: &SyntaxTree) -> Option<Self> {
        let index = self.index()?.checked_add(1)?;
        self.sibling(tree, index)
    }

    /// Moves to the previous sibling.
    #[must_use]
    pub fn left(&self, tree: &SyntaxTree) -> Option<Self> {
        let index = self.index()?.checked_sub(1)?;
        self.sibling(tree, index)
    }

    /// Reads the focused node's children.
    #[must_use]
    pub fn children<'t>(&self, tree: &'t SyntaxTree) -> &'t [NodeId] {
        tree.children(self.focus)
    }

    /// Replaces the focused node's children wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if the focus or a new child is not
    /// part of `tree`.
    pub fn replace_children(
        self,
        tree: &mut SyntaxTree,
        children: Vec<NodeId>,
    ) -> Result<Self, TreeError> {
        tree.set_children(self.focus, children)?;
        Ok(self)
    }

    /// Swaps the focused node for `replacement`, keeping the same position.
    ///
    /// Replacing the root makes `replacement` the new root.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `replacement` is not part of
    /// `tree`.
    pub fn replace(self, tree: &mut SyntaxTree, replacement: NodeId) -> Result<Self, TreeError> {
        let Some(frame) = self.path.last().copied() else {
            tree.set_root(replacement)?;
            return Ok(Self {
                focus: replacement,
                path: self.path,
            });
        };
        let mut siblings = tree.children(frame.parent).to_vec();
        let slot = siblings
            .get_mut(frame.index)
            .ok_or_else(|| TreeError::unknown_node(self.focus))?;
        *slot = replacement;
        tree.set_children(frame.parent, siblings)?;
        Ok(Self {
            focus: replacement,
            path: self.path,
        })
    }

    /// Inserts `nodes` as siblings immediately after the focus.
    ///
    /// The returned cursor stays on the original focus.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NoParent`] when the focus is the root.
    pub fn insert_right(self, tree: &mut SyntaxTree, nodes: Vec<NodeId>) -> Result<Self, TreeError> {
        let frame = self
            .path
            .last()
            .copied()
            .ok_or_else(|| TreeError::no_parent(self.focus))?;
        let mut siblings = tree.children(frame.parent).to_vec();
        let at = frame.index.saturating_add(1).min(siblings.len());
        siblings.splice(at..at, nodes);
        tree.set_children(frame.parent, siblings)?;
        Ok(self)
    }

    /// Inserts `nodes` as siblings immediately before the focus.
    ///
    /// The returned cursor stays on the original focus, whose index has moved
    /// right by the number of inserted nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NoParent`] when the focus is the root.
    pub fn insert_left(self, tree: &mut SyntaxTree, nodes: Vec<NodeId>) -> Result<Self, TreeError> {
        let frame = self
            .path
            .last()
            .copied()
            .ok_or_else(|| TreeError::no_parent(self.focus))?;
        let inserted = nodes.len();
        let mut siblings = tree.children(frame.parent).to_vec();
        let at = frame.index.min(siblings.len());
        siblings.splice(at..at, nodes);
        tree.set_children(frame.parent, siblings)?;

        let mut path = self.path;
        path.pop();
        path.push(Frame {
            parent: frame.parent,
            index: frame.index.saturating_add(inserted),
        });
        Ok(Self {
            focus: self.focus,
            path,
        })
    }

    /// Finds the nearest strict ancestor satisfying `predicate`.
    #[must_use]
    pub fn find_ancestor<F>(&self, tree: &SyntaxTree, mut predicate: F) -> Option<Self>
    where
        F: FnMut(&SyntaxTree, &Self) -> bool,
    {
        let mut current = self.up()?;
        loop {
            if predicate(tree, &current) {
                return Some(current);
            }
            current = current.up()?;
        }
    }

    /// Locates `target` within the focused subtree, depth first.
    #[must_use]
    pub fn find(&self, tree: &SyntaxTree, target: NodeId) -> Option<Self> {
        let mut stack = vec![self.clone()];
        while let Some(cursor) = stack.pop() {
            if cursor.focus == target {
                return Some(cursor);
            }
            for (index, child) in cursor.children(tree).iter().enumerate().rev() {
                stack.push(cursor.descend(*child, index));
            }
        }
        None
    }
}
