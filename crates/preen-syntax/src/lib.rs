//! Arena-backed syntax trees for the Preen style enforcer.
//!
//! This crate provides the tree model the directive organiser rewrites:
//!
//! - **Node kinds** via [`NodeKind`], an exhaustive sum type over the shapes
//!   the engine distinguishes
//! - **Owned subtrees** via [`Node`], used to build, compare and reshape
//!   statements
//! - **Arena storage** via [`SyntaxTree`], addressed by stable [`NodeId`]s
//! - **Navigation and editing** via [`Cursor`], which keeps its ancestor path
//!   so local edits never need a full re-traversal
//! - **Canonical rendering** via [`render()`], the textual form used for
//!   sorting and for tests
//!
//! Parsing source text into a tree is the job of an external front end; it
//! hands over a [`Node`] (which is serde-deserialisable) and gets a rewritten
//! one back.
//!
//! # Example
//!
//! ```
//! use preen_syntax::{Cursor, SyntaxTree, build};
//!
//! let module = build::defmodule("Sample", vec![build::alias("B"), build::alias("A")]);
//! let mut tree = SyntaxTree::new(&module);
//!
//! // defmodule -> [do: ...] -> do pair -> body block
//! let body = Cursor::root(&tree)
//!     .child(&tree, 1)
//!     .and_then(|keywords| keywords.down(&tree))
//!     .and_then(|pair| pair.down(&tree))
//!     .unwrap();
//! let mut children = body.children(&tree).to_vec();
//! children.reverse();
//! body.replace_children(&mut tree, children)?;
//!
//! assert_eq!(tree.render(tree.root()), "defmodule Sample do\n  alias A\n  alias B\nend");
//! # Ok::<(), preen_syntax::TreeError>(())
//! ```

pub mod build;
mod cursor;
mod error;
mod node;
mod render;
mod tree;

pub use cursor::Cursor;
pub use error::TreeError;
pub use node::{Node, NodeKind};
pub use render::render;
pub use tree::{NodeId, SyntaxTree};

#[cfg(test)]
mod tests;
