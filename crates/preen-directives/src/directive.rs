//! Directive categories and shape classification.

use std::str::FromStr;

use preen_syntax::{Node, NodeKind};
use strum::{Display, EnumString};

/// A module preamble category.
///
/// Variants are declared in layout order: the assembled preamble lists
/// categories exactly as they appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DirectiveKind {
    /// `@shortdoc` documentation.
    #[strum(serialize = "shortdoc")]
    ShortDoc,
    /// `@moduledoc` documentation.
    #[strum(serialize = "moduledoc")]
    ModuleDoc,
    /// `@behaviour` contract declarations.
    Behaviour,
    /// `use` statements.
    Use,
    /// `import` statements.
    Import,
    /// `alias` statements.
    Alias,
    /// `require` statements.
    Require,
}

impl DirectiveKind {
    /// Every category in layout order.
    pub const LAYOUT_ORDER: [Self; 7] = [
        Self::ShortDoc,
        Self::ModuleDoc,
        Self::Behaviour,
        Self::Use,
        Self::Import,
        Self::Alias,
        Self::Require,
    ];

    /// Returns whether the category is written as a module attribute.
    #[must_use]
    pub const fn is_attribute(self) -> bool {
        matches!(self, Self::ShortDoc | Self::ModuleDoc | Self::Behaviour)
    }

    /// Returns whether the category is sorted and deduplicated.
    #[must_use]
    pub const fn is_sorted(self) -> bool {
        matches!(
            self,
            Self::Behaviour | Self::Import | Self::Alias | Self::Require
        )
    }

    /// Returns whether statements of this category are canonicalised against
    /// the alias environment at their original position.
    ///
    /// Everything placed above or inside the alias block is; `require` stays
    /// below it and keeps its written form. A `require` written before an
    /// alias that binds its first segment therefore resolves through that
    /// alias once organised.
    #[must_use]
    pub const fn is_dealiased(self) -> bool {
        !matches!(self, Self::Require)
    }

    /// Parses a statement call name such as `alias` or `use`.
    #[must_use]
    pub fn from_call(name: &str) -> Option<Self> {
        Self::from_str(name).ok().filter(|kind| !kind.is_attribute())
    }

    /// Parses an attribute name such as `moduledoc` or `behaviour`.
    #[must_use]
    pub fn from_attribute(name: &str) -> Option<Self> {
        Self::from_str(name).ok().filter(|kind| kind.is_attribute())
    }
}

/// What a module body child is, judged by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// A preamble directive.
    Directive(DirectiveKind),
    /// A custom module attribute assignment, `@name value`.
    Attribute(String),
    /// Anything else.
    Other,
}

/// Classifies a module body child.
///
/// Only the node itself is inspected; nested modules and quotations are
/// never looked into.
#[must_use]
pub fn classify(node: &Node) -> Classified {
    match &node.kind {
        NodeKind::AttrAssign(name) if node.children.len() == 1 => {
            DirectiveKind::from_attribute(name)
                .map_or_else(|| Classified::Attribute(name.clone()), Classified::Directive)
        }
        NodeKind::Call(name) => match DirectiveKind::from_call(name) {
            Some(kind) if is_statement_shape(node) => Classified::Directive(kind),
            _ => Classified::Other,
        },
        _ => Classified::Other,
    }
}

/// A statement directive takes a target and optionally a keyword list of
/// options, and never a do-block.
fn is_statement_shape(node: &Node) -> bool {
    if node.do_body().is_some() {
        return false;
    }
    match node.children.as_slice() {
        [target] => target.kind != NodeKind::KeywordList,
        [target, options] => {
            target.kind != NodeKind::KeywordList && options.kind == NodeKind::KeywordList
        }
        _ => false,
    }
}

/// Returns whether `node` is a `@moduledoc` declaration.
#[must_use]
pub fn is_moduledoc(node: &Node) -> bool {
    classify(node) == Classified::Directive(DirectiveKind::ModuleDoc)
}

/// Returns whether `node` is a statement directive (`use`, `import`,
/// `alias` or `require`).
#[must_use]
pub fn is_statement_directive(node: &Node) -> bool {
    matches!(classify(node), Classified::Directive(kind) if !kind.is_attribute())
}
