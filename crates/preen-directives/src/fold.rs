//! Pre-order rewriting with a threaded accumulator.

use preen_syntax::Node;

/// What a visitor decided for one node.
pub(crate) enum Visit<A> {
    /// Keep the node and carry on into its children.
    Descend(Node, A),
    /// Keep the node as returned and leave its children alone.
    Skip(Node, A),
}

/// Rewrites `root` top down, threading `initial` through every visit.
///
/// The visitor sees each node before its children and may replace it; when
/// it answers [`Visit::Descend`] the children of the returned node are
/// visited in order.
pub(crate) fn prewalk<A, F>(root: Node, initial: A, visit: &mut F) -> (Node, A)
where
    F: FnMut(Node, A) -> Visit<A>,
{
    match visit(root, initial) {
        Visit::Skip(kept, acc) => (kept, acc),
        Visit::Descend(mut parent, mut acc) => {
            let children = std::mem::take(&mut parent.children);
            let mut rebuilt = Vec::with_capacity(children.len());
            for child in children {
                let (rewritten, next) = prewalk(child, acc, visit);
                rebuilt.push(rewritten);
                acc = next;
            }
            parent.children = rebuilt;
            (parent, acc)
        }
    }
}

#[cfg(test)]
mod tests {
    use preen_syntax::NodeKind;
    use preen_syntax::build::{block, int, var};

    use super::*;

    #[test]
    fn prewalk_threads_the_accumulator_in_source_order() {
        let tree = block(vec![int(1), block(vec![int(2), int(3)]), int(4)]);
        let (rebuilt, seen) = prewalk(tree.clone(), Vec::new(), &mut |node, mut seen: Vec<i64>| {
            if let NodeKind::Int(value) = node.kind {
                seen.push(value);
            }
            Visit::Descend(node, seen)
        });
        assert_eq!(rebuilt, tree);
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn skip_leaves_children_untouched() {
        let tree = block(vec![block(vec![int(1)]), int(2)]);
        let (rebuilt, count) = prewalk(tree, 0_usize, &mut |node, count| match node.kind {
            NodeKind::Int(_) => Visit::Skip(var("x"), count + 1),
            NodeKind::Block if node.children.iter().all(|c| c.kind != NodeKind::Block) => {
                Visit::Skip(node, count)
            }
            _ => Visit::Descend(node, count),
        });
        assert_eq!(rebuilt, block(vec![block(vec![int(1)]), var("x")]));
        assert_eq!(count, 1);
    }
}
