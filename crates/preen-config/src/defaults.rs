//! Default configuration values.

/// Module name suffixes that do not receive a synthesised `@moduledoc false`.
pub const DEFAULT_MODULEDOC_SKIP_SUFFIXES: &[&str] = &[
    "Test",
    "Mixfile",
    "MixProject",
    "Controller",
    "Endpoint",
    "Repo",
    "Router",
    "Socket",
    "View",
    "HTML",
    "JSON",
];

/// Owned copy of [`DEFAULT_MODULEDOC_SKIP_SUFFIXES`] used where allocation
/// is required (e.g. serde).
#[must_use]
pub fn default_moduledoc_skip_suffixes() -> Vec<String> {
    DEFAULT_MODULEDOC_SKIP_SUFFIXES
        .iter()
        .map(|suffix| (*suffix).to_owned())
        .collect()
}
