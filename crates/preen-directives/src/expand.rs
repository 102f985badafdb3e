//! Multi-target directive expansion.

use preen_syntax::{Node, NodeKind};

/// Expands `directive Root.{A, B.C}` into one statement per target.
///
/// Each produced statement takes its target's line, falling back to the
/// original statement's line. Anything that is not a single-argument
/// multi-target statement with an alias or `__MODULE__` root and plain alias
/// targets comes back unchanged.
#[must_use]
pub fn expand_multi_target(statement: Node) -> Vec<Node> {
    match split_targets(&statement) {
        Some(paths) => paths
            .into_iter()
            .map(|(segments, target_line)| {
                let line = if target_line > 0 {
                    target_line
                } else {
                    statement.line
                };
                Node {
                    kind: statement.kind.clone(),
                    line,
                    children: vec![Node {
                        kind: NodeKind::Alias(segments),
                        line,
                        children: Vec::new(),
                    }],
                }
            })
            .collect(),
        None => vec![statement],
    }
}

/// Returns the full path and line of every target, or `None` when the
/// statement is not an expandable multi-target form.
fn split_targets(statement: &Node) -> Option<Vec<(Vec<String>, u32)>> {
    let [multi] = statement.children.as_slice() else {
        return None;
    };
    if multi.kind != NodeKind::MultiAlias {
        return None;
    }
    let (root, targets) = multi.children.split_first()?;
    let prefix = match &root.kind {
        NodeKind::Alias(segments) => segments.clone(),
        NodeKind::ModuleSelf => vec![String::from("__MODULE__")],
        _ => return None,
    };
    targets
        .iter()
        .map(|target| {
            target.alias_segments().map(|suffix| {
                let mut path = prefix.clone();
                path.extend_from_slice(suffix);
                (path, target.line)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use preen_syntax::build::{alias, alias_ref, atom, call, module_self, multi_alias};
    use preen_syntax::render;

    use super::*;

    #[test]
    fn expands_each_target_onto_its_own_line() {
        let statement = call(
            "alias",
            vec![multi_alias(
                alias_ref("Foo").at(2),
                vec![alias_ref("Bar").at(3), alias_ref("Baz.Qux").at(4)],
            )],
        )
        .at(2);
        let expanded = expand_multi_target(statement);
        let rendered: Vec<_> = expanded.iter().map(render).collect();
        assert_eq!(rendered, vec!["alias Foo.Bar", "alias Foo.Baz.Qux"]);
        let lines: Vec<_> = expanded.iter().map(|node| node.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn unknown_target_lines_fall_back_to_the_statement() {
        let statement = Node {
            line: 9,
            ..call(
                "import",
                vec![multi_alias(module_self(), vec![alias_ref("A")])],
            )
        };
        let expanded = expand_multi_target(statement);
        assert_eq!(expanded, vec![call("import", vec![alias_ref("__MODULE__.A")]).at(9)]);
    }

    #[test]
    fn non_alias_targets_pass_through() {
        let statement = call(
            "alias",
            vec![multi_alias(alias_ref("Foo"), vec![alias_ref("Bar"), atom("baz")])],
        );
        assert_eq!(expand_multi_target(statement.clone()), vec![statement]);
        assert_eq!(expand_multi_target(alias("Foo")), vec![alias("Foo")]);
    }
}
