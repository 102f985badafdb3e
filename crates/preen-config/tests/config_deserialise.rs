//! Deserialisation tests for `StyleConfig` as an external loader would use it.

use rstest::rstest;

use preen_config::{DEFAULT_MODULEDOC_SKIP_SUFFIXES, StyleConfig};

#[test]
fn empty_document_yields_defaults() {
    let config: StyleConfig = serde_json::from_str("{}").unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(config, StyleConfig::default());
    assert_eq!(
        config.moduledoc_skip_suffixes().len(),
        DEFAULT_MODULEDOC_SKIP_SUFFIXES.len()
    );
}

#[test]
fn partial_document_keeps_remaining_defaults() {
    let json = r#"{
        "alias_lifting_exclude": ["Repo", "Schema"],
        "stdlib_names": ["List", "Supervisor"]
    }"#;
    let config: StyleConfig = serde_json::from_str(json).unwrap_or_else(|err| panic!("{err}"));

    assert!(config.is_lift_excluded("Repo"));
    assert!(config.is_lift_excluded("Schema"));
    assert!(config.is_stdlib_name("Supervisor"));
    assert!(config.skips_moduledoc("MyApp.Router"));
}

#[rstest]
#[case(r#"{"alias_lifting_excludes": []}"#)]
#[case(r#"{"stdlib_names": "List"}"#)]
fn malformed_documents_are_rejected(#[case] json: &str) {
    let result: Result<StyleConfig, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn configuration_round_trips_through_json() {
    let config = StyleConfig::default()
        .with_alias_lifting_exclude(["C"])
        .with_moduledoc_skip_suffixes(["Live"]);
    let json = serde_json::to_string(&config).unwrap_or_else(|err| panic!("{err}"));
    let restored: StyleConfig = serde_json::from_str(&json).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(restored, config);
}
