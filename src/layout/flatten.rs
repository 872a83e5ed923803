//! Pre-order flattening and the textual outline.

use serde::Serialize;

use crate::tree::NodeId;

use super::tree_layout::{PositionedNode, PositionedTree};

/// One row of the depth-indented outline overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub id: NodeId,
    pub title: String,
    pub depth: usize,
    /// `">" * depth` followed by a space and the title.
    pub label: String,
    /// Left indent in CSS pixels, growing quadratically with depth.
    pub indent: f64,
}

impl OutlineEntry {
    fn from_node(node: &PositionedNode) -> Self {
        let depth = node.depth;
        Self {
            id: node.id.clone(),
            title: node.title.clone(),
            depth,
            label: format!("{} {}", ">".repeat(depth), node.title),
            indent: ((depth + 1) * (depth + 1) * 6) as f64,
        }
    }
}

/// Depth-first walk: root first, then each child subtree in order.
pub fn flatten(tree: &PositionedTree) -> Vec<&PositionedNode> {
    let mut out = Vec::with_capacity(tree.len());
    if tree.is_empty() {
        return out;
    }
    let mut stack = vec![0usize];
    while let Some(index) = stack.pop() {
        let Some(node) = tree.get(index) else {
            continue;
        };
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Outline rows for every node, in [`flatten`] order.
pub fn outline(tree: &PositionedTree) -> Vec<OutlineEntry> {
    flatten(tree)
        .into_iter()
        .map(OutlineEntry::from_node)
        .collect()
}
