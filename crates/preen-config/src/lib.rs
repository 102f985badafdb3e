//! Configuration for the Preen module directive organiser.
//!
//! The organiser reads a single [`StyleConfig`] value, threaded explicitly
//! into every entry point. Loading it from files, the environment or the
//! command line belongs to the caller; this crate only describes the typed
//! settings and their defaults, and derives `serde` so any loader can fill
//! it in.
//!
//! # Example
//!
//! ```
//! use preen_config::StyleConfig;
//!
//! let config = StyleConfig::default()
//!     .with_alias_lifting_exclude(["Repo"])
//!     .with_stdlib_names(["List", "Map"]);
//!
//! assert!(config.is_lift_excluded("Repo"));
//! assert!(config.is_stdlib_name("List"));
//! assert!(config.skips_moduledoc("MyAppWeb.PageController"));
//! ```

mod defaults;
mod style;

pub use defaults::{DEFAULT_MODULEDOC_SKIP_SUFFIXES, default_moduledoc_skip_suffixes};
pub use style::StyleConfig;
