//! Preamble layout: documentation synthesis and line repair.

use preen_config::StyleConfig;
use preen_syntax::{Node, NodeKind};

/// Anchor line used when nothing follows the preamble.
pub const DEFAULT_ANCHOR_LINE: u32 = 999_999;

/// Builds `@moduledoc false` for an undocumented module, placed on the line
/// after the module header.
///
/// Returns `None` when the module name is not a plain alias or ends with one
/// of the configured skip suffixes.
#[must_use]
pub(crate) fn synthesise_moduledoc(module: &Node, config: &StyleConfig) -> Option<Node> {
    let segments = module.call_args().first()?.alias_segments()?;
    let name = segments.join(".");
    if config.skips_moduledoc(&name) {
        return None;
    }
    let line = if module.line > 0 {
        module.line.saturating_add(1)
    } else {
        0
    };
    Some(Node {
        kind: NodeKind::AttrAssign(String::from("moduledoc")),
        line,
        children: vec![Node {
            kind: NodeKind::Bool(false),
            line,
            children: Vec::new(),
        }],
    })
}

/// Picks the line the preamble must stay above: the first known line of
/// the statements that follow it, or [`DEFAULT_ANCHOR_LINE`].
#[must_use]
pub(crate) fn anchor_line(rest: &[Node]) -> u32 {
    rest.iter()
        .map(|node| node.line)
        .find(|line| *line > 0)
        .unwrap_or(DEFAULT_ANCHOR_LINE)
}

/// Makes preamble lines non-decreasing and no later than `anchor`.
///
/// Walks backwards from the anchor; a directive placed below its successor
/// is shifted up, together with its whole subtree, onto the successor's line.
/// Directives with unknown lines are left alone.
pub(crate) fn repair_lines(preamble: &mut [Node], anchor: u32) {
    let mut bound = anchor;
    for directive in preamble.iter_mut().rev() {
        if directive.line == 0 {
            continue;
        }
        if directive.line > bound {
            let delta = directive.line.saturating_sub(bound);
            directive.shift_up(delta);
        }
        bound = directive.line;
    }
}

#[cfg(test)]
mod tests {
    use preen_syntax::build::{alias, defmodule, import, int, use_};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("MyApp.Accounts", true)]
    #[case("MyApp.AccountsTest", false)]
    #[case("MyAppWeb.Router", false)]
    fn synthesis_respects_skip_suffixes(#[case] name: &str, #[case] synthesised: bool) {
        let module = defmodule(name, vec![int(1)]).at(4);
        let doc = synthesise_moduledoc(&module, &StyleConfig::default());
        assert_eq!(doc.is_some(), synthesised);
        if let Some(node) = doc {
            assert_eq!(node.line, 5);
        }
    }

    #[test]
    fn lines_are_pulled_up_to_the_following_statement() {
        let mut preamble = vec![use_("A").at(2), import("B").at(7), alias("C").at(3)];
        repair_lines(&mut preamble, 6);
        let lines: Vec<_> = preamble.iter().map(|node| node.line).collect();
        assert_eq!(lines, vec![2, 3, 3]);
    }

    #[test]
    fn subtrees_move_with_their_directive() {
        let mut preamble = vec![alias("A.B").at(10)];
        repair_lines(&mut preamble, 4);
        let target_line = preamble
            .first()
            .and_then(|node| node.children.first())
            .map(|node| node.line);
        assert_eq!(target_line, Some(4));
    }

    #[test]
    fn anchor_skips_unknown_lines() {
        assert_eq!(anchor_line(&[int(1), int(2).at(8)]), 8);
        assert_eq!(anchor_line(&[]), DEFAULT_ANCHOR_LINE);
    }
}
