//! Nearest-ancestor resolution over a depth-annotated node sequence.

use crate::outline::{Node, NodeId};

/// Resolve each node's parent: the nearest earlier node with strictly smaller
/// depth. `None` marks a root. The result is indexed like `nodes`.
///
/// Uses an explicit ancestor stack; every node is pushed once and popped at
/// most once, so the walk is linear in the number of nodes.
#[must_use]
pub fn parents(nodes: &[Node]) -> Vec<Option<NodeId>> {
    let mut stack: Vec<(NodeId, usize)> = Vec::new();
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        while stack.last().is_some_and(|&(_, depth)| depth >= node.depth()) {
            stack.pop();
        }
        out.push(stack.last().map(|&(id, _)| id));
        stack.push((node.id(), node.depth()));
    }

    out
}

/// Number of roots (nodes without a parent). More than one means a forest.
#[must_use]
pub fn root_count(nodes: &[Node]) -> usize {
    parents(nodes).iter().filter(|p| p.is_none()).count()
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
