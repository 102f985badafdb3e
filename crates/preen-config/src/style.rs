//! Style settings consumed by the directive organiser.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::defaults::default_moduledoc_skip_suffixes;

/// Settings for one run of the directive organiser.
///
/// # Defaults
///
/// - `alias_lifting_exclude`: empty
/// - `stdlib_names`: empty; the host language's standard-library module
///   names are supplied by the caller
/// - `moduledoc_skip_suffixes`: [`DEFAULT_MODULEDOC_SKIP_SUFFIXES`]
///
/// [`DEFAULT_MODULEDOC_SKIP_SUFFIXES`]: crate::DEFAULT_MODULEDOC_SKIP_SUFFIXES
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Short names never introduced as lifted aliases.
    alias_lifting_exclude: BTreeSet<String>,
    /// Top-level standard-library names a lifted alias must not shadow.
    stdlib_names: BTreeSet<String>,
    /// Module name suffixes exempt from documentation synthesis.
    moduledoc_skip_suffixes: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            alias_lifting_exclude: BTreeSet::new(),
            stdlib_names: BTreeSet::new(),
            moduledoc_skip_suffixes: default_moduledoc_skip_suffixes(),
        }
    }
}

impl StyleConfig {
    /// Replaces the alias lifting exclusion set.
    #[must_use]
    pub fn with_alias_lifting_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias_lifting_exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the standard-library name set.
    #[must_use]
    pub fn with_stdlib_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stdlib_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the documentation skip suffixes.
    #[must_use]
    pub fn with_moduledoc_skip_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moduledoc_skip_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the alias lifting exclusion set.
    #[must_use]
    pub const fn alias_lifting_exclude(&self) -> &BTreeSet<String> {
        &self.alias_lifting_exclude
    }

    /// Returns the standard-library name set.
    #[must_use]
    pub const fn stdlib_names(&self) -> &BTreeSet<String> {
        &self.stdlib_names
    }

    /// Returns the documentation skip suffixes.
    #[must_use]
    pub fn moduledoc_skip_suffixes(&self) -> &[String] {
        &self.moduledoc_skip_suffixes
    }

    /// Returns whether `name` must never become a lifted alias.
    #[must_use]
    pub fn is_lift_excluded(&self, name: &str) -> bool {
        self.alias_lifting_exclude.contains(name)
    }

    /// Returns whether `name` is a standard-library top-level name.
    #[must_use]
    pub fn is_stdlib_name(&self, name: &str) -> bool {
        self.stdlib_names.contains(name)
    }

    /// Returns whether a module called `module_name` is exempt from
    /// documentation synthesis.
    #[must_use]
    pub fn skips_moduledoc(&self, module_name: &str) -> bool {
        self.moduledoc_skip_suffixes
            .iter()
            .any(|suffix| module_name.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("MyApp.UserTest", true)]
    #[case("MyApp.MixProject", true)]
    #[case("MyAppWeb.PageController", true)]
    #[case("MyApp.Accounts", false)]
    #[case("MyApp.Testing", false)]
    fn default_suffixes_skip_framework_modules(#[case] name: &str, #[case] skipped: bool) {
        assert_eq!(StyleConfig::default().skips_moduledoc(name), skipped);
    }

    #[test]
    fn builders_replace_rather_than_extend() {
        let config = StyleConfig::default()
            .with_moduledoc_skip_suffixes(["Schema"])
            .with_alias_lifting_exclude(["A"])
            .with_alias_lifting_exclude(["B"]);

        assert!(config.skips_moduledoc("Accounts.UserSchema"));
        assert!(!config.skips_moduledoc("MyApp.UserTest"));
        assert!(!config.is_lift_excluded("A"));
        assert!(config.is_lift_excluded("B"));
    }

    #[test]
    fn stdlib_names_default_to_empty() {
        let config = StyleConfig::default();
        assert!(config.stdlib_names().is_empty());
        assert!(!config.is_stdlib_name("List"));
    }
}
