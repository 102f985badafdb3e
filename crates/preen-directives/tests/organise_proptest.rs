//! Property-based tests for module directive organisation.
//!
//! Random module bodies mix `alias`, `use`, `import` and `require`
//! statements with functions calling qualified paths. The segment pool is
//! small so aliases, lift candidates and short names collide often.

use preen_config::StyleConfig;
use preen_directives::{Outcome, organise_tree};
use preen_syntax::build::{alias, def, defmodule, import, remote_path, require, use_};
use preen_syntax::{Node, SyntaxTree};
use proptest::prelude::*;

/// Generate a dotted module path of up to `max` segments.
fn module_path(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["A", "B", "C", "D"]), 1..=max)
        .prop_map(|segments| segments.join("."))
}

/// Generate a single directive statement.
fn directive() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => module_path(3).prop_map(|path| alias(&path)),
        1 => module_path(2).prop_map(|path| use_(&path)),
        1 => module_path(2).prop_map(|path| import(&path)),
        1 => module_path(3).prop_map(|path| require(&path)),
    ]
}

/// Generate a call through a qualified path, such as `A.B.C.f()`.
fn remote_call() -> impl Strategy<Value = Node> {
    (module_path(4), prop::sample::select(vec!["f", "g"]))
        .prop_map(|(path, function)| remote_path(&format!("{path}.{function}"), vec![]))
}

/// Generate a directive or a function full of remote calls.
fn statement() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => directive(),
        1 => prop::collection::vec(remote_call(), 0..5)
            .prop_map(|calls| def("run", vec![], calls)),
    ]
}

fn module() -> impl Strategy<Value = Node> {
    prop::collection::vec(statement(), 0..10)
        .prop_map(|statements| defmodule("Sample", statements))
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn organising_an_organised_module_changes_nothing(module in module()) {
            let config = StyleConfig::default();
            let mut tree = SyntaxTree::new(&module);
            let _first = organise_tree(&mut tree, &config);
            let once = tree.to_node();

            let second = organise_tree(&mut tree, &config);

            prop_assert_eq!(
                second,
                Outcome::Unchanged,
                "second pass changed:\n{}",
                tree.render(tree.root())
            );
            prop_assert_eq!(tree.to_node(), once);
        }

        #[test]
        fn aliases_never_bind_the_head_of_a_later_alias(module in module()) {
            let mut tree = SyntaxTree::new(&module);
            let _outcome = organise_tree(&mut tree, &StyleConfig::default());
            let rendered = tree.render(tree.root());

            let mut bound: Vec<String> = Vec::new();
            for line in rendered.lines().map(str::trim) {
                let Some(target) = line.strip_prefix("alias ") else {
                    continue;
                };
                let head = target.split('.').next().unwrap_or_default();
                prop_assert!(
                    head == "Elixir" || !bound.iter().any(|name| name == head),
                    "`{}` is captured in:\n{}",
                    line,
                    rendered
                );
                if let Some(short) = target.rsplit('.').next() {
                    bound.push(short.to_owned());
                }
            }
        }
    }
}
