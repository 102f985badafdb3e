//! Unit tests for preen-syntax.

use rstest::{fixture, rstest};

use crate::build::{self, alias, alias_ref, block, call, int, keywords, remote_path};
use crate::{Cursor, Node, NodeKind, SyntaxTree, TreeError, render};

/// Fixture providing a block of three integers.
#[fixture]
fn numbers() -> SyntaxTree {
    SyntaxTree::new(&block(vec![int(1), int(2), int(3)]))
}

// =============================================================================
// Arena Tests
// =============================================================================

#[test]
fn snapshot_returns_the_original_node() {
    let node = build::defmodule("Sample", vec![alias("Foo.Bar"), int(1)]).at(1);
    let tree = SyntaxTree::new(&node);
    assert_eq!(tree.to_node(), node);
}

#[test]
fn detached_allocations_do_not_change_the_reachable_tree() {
    let mut tree = SyntaxTree::new(&int(1));
    let before = tree.to_node();
    let detached = tree.alloc(&int(2));
    assert_eq!(tree.to_node(), before);
    assert_eq!(tree.kind(detached), Some(&NodeKind::Int(2)));
}

#[test]
fn set_children_rejects_foreign_ids() {
    let mut tree = SyntaxTree::new(&block(vec![int(1)]));
    let other = SyntaxTree::new(&block(vec![int(1), int(2), int(3), int(4), int(5)]));
    let foreign = other
        .children(other.root())
        .last()
        .copied()
        .expect("foreign child");
    let result = tree.set_children(tree.root(), vec![foreign]);
    assert!(matches!(result, Err(TreeError::UnknownNode { .. })));
}

// =============================================================================
// Cursor Navigation Tests
// =============================================================================

#[rstest]
fn cursor_moves_between_siblings(numbers: SyntaxTree) {
    let first = Cursor::root(&numbers).down(&numbers).expect("first child");
    let second = first.right(&numbers).expect("second child");
    let third = second.right(&numbers).expect("third child");

    assert_eq!(numbers.render(third.focus()), "3");
    assert!(third.right(&numbers).is_none());
    assert_eq!(third.left(&numbers), Some(second));
    assert!(first.left(&numbers).is_none());
}

#[rstest]
fn cursor_up_returns_the_parent(numbers: SyntaxTree) {
    let child = Cursor::root(&numbers).child(&numbers, 2).expect("child");
    assert_eq!(child.depth(), 1);
    assert_eq!(child.index(), Some(2));
    assert_eq!(child.up(), Some(Cursor::root(&numbers)));
    assert!(Cursor::root(&numbers).up().is_none());
}

#[test]
fn find_locates_a_captured_node() {
    let tree = SyntaxTree::new(&build::defmodule(
        "Sample",
        vec![alias("Foo"), build::def("run", vec![], vec![int(7)])],
    ));
    let root = Cursor::root(&tree);
    let body = root
        .child(&tree, 1)
        .and_then(|keywords| keywords.down(&tree))
        .and_then(|pair| pair.down(&tree))
        .expect("module body");
    let def = body.child(&tree, 1).expect("def");

    let found = root.find(&tree, def.focus()).expect("found");
    assert_eq!(found, def);
    assert_eq!(found.parent(), Some(body.focus()));
}

#[test]
fn find_ancestor_skips_the_focus() {
    let tree = SyntaxTree::new(&block(vec![block(vec![int(1)])]));
    let leaf = Cursor::root(&tree)
        .down(&tree)
        .and_then(|inner| inner.down(&tree))
        .expect("leaf");
    let inner = leaf.up().expect("inner block");

    let nearest = leaf
        .find_ancestor(&tree, |tree, cursor| {
            tree.kind(cursor.focus()) == Some(&NodeKind::Block)
        })
        .expect("block ancestor");
    assert_eq!(nearest, inner);

    let none = inner.find_ancestor(&tree, |tree, cursor| {
        tree.kind(cursor.focus()) == Some(&NodeKind::Nil)
    });
    assert!(none.is_none());
}

// =============================================================================
// Cursor Editing Tests
// =============================================================================

#[rstest]
fn replace_children_swaps_the_whole_list(mut numbers: SyntaxTree) {
    let replacement = numbers.alloc(&int(9));
    let root = Cursor::root(&numbers)
        .replace_children(&mut numbers, vec![replacement])
        .expect("replace");
    assert_eq!(root.children(&numbers), &[replacement]);
    assert_eq!(numbers.render(numbers.root()), "9");
}

#[rstest]
fn insert_left_keeps_focus_on_the_original_node(mut numbers: SyntaxTree) {
    let second = Cursor::root(&numbers).child(&numbers, 1).expect("second");
    let focus = second.focus();
    let new_nodes = vec![numbers.alloc(&int(10)), numbers.alloc(&int(11))];

    let moved = second.insert_left(&mut numbers, new_nodes).expect("insert");
    assert_eq!(moved.focus(), focus);
    assert_eq!(moved.index(), Some(3));
    assert_eq!(numbers.render(numbers.root()), "1\n10\n11\n2\n3");
    assert_eq!(moved.right(&numbers).map(|c| numbers.render(c.focus())), Some("3".to_owned()));
}

#[rstest]
fn insert_right_places_nodes_after_the_focus(mut numbers: SyntaxTree) {
    let first = Cursor::root(&numbers).down(&numbers).expect("first");
    let new_node = numbers.alloc(&int(5));
    let same = first.insert_right(&mut numbers, vec![new_node]).expect("insert");
    assert_eq!(same.index(), Some(0));
    assert_eq!(numbers.render(numbers.root()), "1\n5\n2\n3");
}

#[rstest]
fn sibling_edits_fail_at_the_root(mut numbers: SyntaxTree) {
    let extra = numbers.alloc(&int(4));
    let result = Cursor::root(&numbers).insert_left(&mut numbers, vec![extra]);
    assert!(matches!(result, Err(TreeError::NoParent { .. })));
}

#[rstest]
fn replacing_the_root_moves_the_root(mut numbers: SyntaxTree) {
    let old_root = numbers.root();
    let wrapper = block(vec![int(0)]);
    let wrapper_id = numbers.alloc(&wrapper);
    let mut children = numbers.children(wrapper_id).to_vec();
    children.push(old_root);
    numbers
        .set_children(wrapper_id, children)
        .expect("link wrapper");

    let cursor = Cursor::root(&numbers)
        .replace(&mut numbers, wrapper_id)
        .expect("replace root");
    assert_eq!(numbers.root(), wrapper_id);
    assert_eq!(cursor.focus(), wrapper_id);
    assert!(Cursor::root(&numbers).find(&numbers, old_root).is_some());
}

// =============================================================================
// Node Tests
// =============================================================================

#[test]
fn at_fills_unknown_lines_only() {
    let node = call("use", vec![alias_ref("Foo").at(4)]).at(2);
    assert_eq!(node.line, 2);
    assert_eq!(node.children.first().map(|child| child.line), Some(4));

    let filled = call("use", vec![alias_ref("Foo")]).at(2);
    assert_eq!(filled.children.first().map(|child| child.line), Some(2));
}

#[test]
fn shift_up_moves_known_lines_and_never_reaches_zero() {
    let mut node = call("alias", vec![alias_ref("Foo").at(12)]).at(10);
    node.shift_up(5);
    assert_eq!(node.line, 5);
    assert_eq!(node.children.first().map(|child| child.line), Some(7));

    node.shift_up(100);
    assert_eq!(node.line, 1);
}

#[test]
fn do_body_and_call_args_split_the_do_block() {
    let def = build::def("run", vec![], vec![int(1)]);
    assert_eq!(def.do_body(), Some(&int(1)));
    assert_eq!(def.call_args(), &[call("run", vec![])]);

    let plain = call("use", vec![alias_ref("Foo"), keywords(vec![("opt", int(1))])]);
    assert!(plain.do_body().is_none());
    assert_eq!(plain.call_args().len(), 2);
}

#[test]
fn nodes_deserialise_from_json() {
    let json = r#"{
        "kind": {"type": "call", "value": "alias"},
        "line": 3,
        "children": [{"kind": {"type": "alias", "value": ["Foo", "Bar"]}, "line": 3}]
    }"#;
    let node: Node = serde_json::from_str(json).expect("deserialise");
    assert_eq!(node, alias("Foo.Bar").at(3));
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[rstest]
#[case(alias("Foo.Bar"), "alias Foo.Bar")]
#[case(build::alias_as("Foo.Bar", "Baz"), "alias Foo.Bar, as: Baz")]
#[case(build::moduledoc(build::boolean(false)), "@moduledoc false")]
#[case(build::behaviour("GenServer"), "@behaviour GenServer")]
#[case(remote_path("A.B.C.f", vec![int(1), build::atom("ok")]), "A.B.C.f(1, :ok)")]
#[case(call("unquote", vec![build::var("opts")]), "unquote(opts)")]
#[case(
    call("alias", vec![build::multi_alias(build::module_self(), vec![alias_ref("A"), alias_ref("B.C")])]),
    "alias __MODULE__.{A, B.C}"
)]
#[case(
    build::matches(build::var("x"), build::string("say \"hi\"")),
    r#"x = "say \"hi\"""#
)]
#[case(call("foo", vec![keywords(vec![("a", int(1))]), int(2)]), "foo([a: 1], 2)")]
#[case(build::nil(), "nil")]
fn renders_single_line_forms(#[case] node: Node, #[case] expected: &str) {
    assert_eq!(render(&node), expected);
}

#[test]
fn renders_nested_do_blocks_with_indentation() {
    let module = build::defmodule(
        "Sample",
        vec![
            alias("Foo"),
            build::def("run", vec![], vec![int(1), int(2)]),
            build::quote(vec![]),
        ],
    );
    let expected = "defmodule Sample do\n  alias Foo\n  def run() do\n    1\n    2\n  end\n  quote do\n  end\nend";
    assert_eq!(render(&module), expected);
}
