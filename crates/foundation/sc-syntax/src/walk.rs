//! Pre-order traversal in declaration order

use crate::tree::{NodeId, SyntaxTree};
use std::ops::ControlFlow;

/// Visits every node of `tree` once, parents before children and siblings in
/// declaration order. Returning [`ControlFlow::Break`] from the visitor stops
/// the walk immediately.
pub fn walk<F>(tree: &SyntaxTree, visitor: &mut F) -> ControlFlow<()>
where
    F: FnMut(NodeId) -> ControlFlow<()>,
{
    let mut stack = vec![tree.root()];
    while let Some(current) = stack.pop() {
        visitor(current)?;
        stack.extend(tree.children(current).iter().rev().copied());
    }
    ControlFlow::Continue(())
}

/// All nodes of `tree` in pre-order
#[must_use]
pub fn descendants(tree: &SyntaxTree) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(tree.len());
    let _ = walk(tree, &mut |node| {
        order.push(node);
        ControlFlow::<()>::Continue(())
    });
    order
}
