//! What an organising pass did.

/// Counters describing the rewrites applied by a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Module bodies and blocks whose contents changed.
    pub regions: usize,
    /// Statements added by splitting multi-target directives.
    pub expanded_statements: usize,
    /// Duplicate and no-op directives dropped.
    pub removed_statements: usize,
    /// Alias references rewritten to their expanded form.
    pub dealiased_references: usize,
    /// New `alias` statements introduced by lifting.
    pub lifted_aliases: usize,
    /// References shortened to a lifted alias.
    pub shortened_references: usize,
    /// Module attributes lifted out of hoisted directives.
    pub lifted_attributes: usize,
    /// `@moduledoc false` declarations synthesised.
    pub moduledocs_added: usize,
}

impl ChangeSummary {
    /// Adds `other`'s counters to this summary.
    pub const fn merge(&mut self, other: &Self) {
        self.regions = self.regions.saturating_add(other.regions);
        self.expanded_statements = self
            .expanded_statements
            .saturating_add(other.expanded_statements);
        self.removed_statements = self
            .removed_statements
            .saturating_add(other.removed_statements);
        self.dealiased_references = self
            .dealiased_references
            .saturating_add(other.dealiased_references);
        self.lifted_aliases = self.lifted_aliases.saturating_add(other.lifted_aliases);
        self.shortened_references = self
            .shortened_references
            .saturating_add(other.shortened_references);
        self.lifted_attributes = self
            .lifted_attributes
            .saturating_add(other.lifted_attributes);
        self.moduledocs_added = self.moduledocs_added.saturating_add(other.moduledocs_added);
    }
}

/// The result of organising a module or a whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The tree is exactly as it was.
    Unchanged,
    /// At least one region was rewritten.
    Changed(ChangeSummary),
}

impl Outcome {
    /// Builds an outcome from a summary; no changed regions means
    /// [`Outcome::Unchanged`].
    pub const fn from_summary(summary: ChangeSummary) -> Self {
        if summary.regions == 0 {
            Self::Unchanged
        } else {
            Self::Changed(summary)
        }
    }

    /// Returns whether anything changed.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Returns the change counters, if anything changed.
    #[must_use]
    pub const fn summary(&self) -> Option<&ChangeSummary> {
        match self {
            Self::Changed(summary) => Some(summary),
            Self::Unchanged => None,
        }
    }
}
