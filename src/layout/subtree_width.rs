//! Reserved subtree width computation.
//!
//! A subtree reserves enough horizontal space to fit its own node and all of
//! its child subtrees laid side by side with fixed spacing between them:
//!
//! ```text
//! width(leaf) = W
//! width(node) = max(W, sum(width(child)) + (n - 1) * HSPACING)
//! ```
//!
//! Reserved widths never shrink as a subtree grows, which is what makes the
//! single top-down placement pass in [`TreeLayout`](super::TreeLayout)
//! overlap-free by construction.

use crate::tree::InputNode;

use super::tree_layout::LayoutConfig;

/// Minimum horizontal width the subtree rooted at `node` requires.
///
/// Pure function of the subtree's shape. Recursion depth equals tree depth.
pub fn subtree_width(node: &InputNode, config: &LayoutConfig) -> f64 {
    if node.children.is_empty() {
        return config.node_width;
    }
    let widths: Vec<f64> = node
        .children
        .iter()
        .map(|child| subtree_width(child, config))
        .collect();
    config
        .node_width
        .max(row_width(&widths, config.horizontal_spacing))
}

/// Combined width of a row of reserved slots separated by `spacing`.
///
/// An empty row is zero wide; there is no `(n - 1)` spacing term to apply.
pub(crate) fn row_width(widths: &[f64], spacing: f64) -> f64 {
    match widths.len() {
        0 => 0.0,
        n => widths.iter().sum::<f64>() + (n - 1) as f64 * spacing,
    }
}
