//! Top-down layered tree layout.
//!
//! Converts an [`InputNode`] tree into non-overlapping world positions in a
//! single recursive pass:
//!
//! 1. **Vertical:** `y = parent_y + level * (H + VSPACING)`. Every node at a
//!    given depth shares the same y-coordinate.
//! 2. **Horizontal:** the children of a node are laid side by side in slots
//!    sized by their reserved [`subtree_width`]. The block of slots is centered
//!    under the parent's center, and each child sits at the center of its slot.
//!
//! Results live in an arena ([`PositionedTree`]) in pre-order. Children are
//! owned by index; the parent back-reference is a separate, non-owning index
//! that is only attached once the child's subtree has been fully placed.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{MindmapError, Result};
use crate::tree::{InputNode, NodeId};

use super::subtree_width::{row_width, subtree_width};

/// Configuration for the tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Fixed node width `W`.
    pub node_width: f64,
    /// Fixed node height `H`.
    pub node_height: f64,
    /// Gap between adjacent child subtree slots.
    pub horizontal_spacing: f64,
    /// Gap added below each node height when stepping down a level.
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 100.0,
            horizontal_spacing: 100.0,
            vertical_spacing: 150.0,
        }
    }
}

impl LayoutConfig {
    /// Vertical distance contributed by one level: `H + VSPACING`.
    #[inline]
    pub fn level_step(&self) -> f64 {
        self.node_height + self.vertical_spacing
    }

    /// Reject sizes that would produce NaN or collapsed geometry.
    pub fn validate(&self) -> Result<()> {
        let positive = [("nodeWidth", self.node_width), ("nodeHeight", self.node_height)];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(MindmapError::InvalidConfig { field });
            }
        }
        let non_negative = [
            ("horizontalSpacing", self.horizontal_spacing),
            ("verticalSpacing", self.vertical_spacing),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(MindmapError::InvalidConfig { field });
            }
        }
        Ok(())
    }
}

/// A laid-out node.
///
/// `x`/`y` is the top-left corner in world units. `children` and `parent`
/// index into the owning [`PositionedTree`] and are not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Depth in the tree (root = 0).
    pub depth: usize,
    /// Horizontal span reserved for this node's whole subtree.
    pub reserved_width: f64,
    #[serde(skip)]
    pub children: Vec<usize>,
    #[serde(skip)]
    pub parent: Option<usize>,
}

impl PositionedNode {
    /// Node rectangle in world coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center of the node rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Reserved slot `[start, end)` this node's subtree occupies horizontally.
    #[inline]
    pub fn slot(&self) -> (f64, f64) {
        let mid = self.x + self.width / 2.0;
        (
            mid - self.reserved_width / 2.0,
            mid + self.reserved_width / 2.0,
        )
    }

    /// Bottom-center anchor where outgoing branches start.
    #[inline]
    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    /// Top-center anchor where the incoming branch ends.
    #[inline]
    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }
}

/// Arena of positioned nodes in pre-order (root at index 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionedTree {
    nodes: Vec<PositionedNode>,
}

impl PositionedTree {
    /// A tree with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&PositionedNode> {
        self.nodes.first()
    }

    /// Node at arena index `index`.
    pub fn get(&self, index: usize) -> Option<&PositionedNode> {
        self.nodes.get(index)
    }

    /// Parent of the node at `index` (None for the root).
    pub fn parent(&self, index: usize) -> Option<&PositionedNode> {
        self.nodes
            .get(index)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(parent))
    }

    /// Children of the node at `index`, in input order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &PositionedNode> + '_ {
        self.nodes
            .get(index)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|&child| self.nodes.get(child))
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The tree layout engine.
pub struct TreeLayout {
    config: LayoutConfig,
}

impl TreeLayout {
    /// Create a new tree layout with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `root` with its top-left corner at the world origin.
    pub fn compute(&self, root: &InputNode) -> PositionedTree {
        self.compute_at(root, Point::ORIGIN)
    }

    /// Lay out `root` with its top-left corner at `origin`.
    pub fn compute_at(&self, root: &InputNode, origin: Point) -> PositionedTree {
        let mut nodes = Vec::with_capacity(root.subtree_len());
        let reserved = subtree_width(root, &self.config);
        self.place(root, origin.x, origin.y, 0, reserved, &mut nodes);
        tracing::debug!(
            nodes = nodes.len(),
            reserved_width = reserved,
            "tree layout computed"
        );
        PositionedTree { nodes }
    }

    /// Place `node` at `x` and recurse into its children. Returns the arena index.
    fn place(
        &self,
        node: &InputNode,
        x: f64,
        parent_y: f64,
        level: usize,
        reserved_width: f64,
        nodes: &mut Vec<PositionedNode>,
    ) -> usize {
        let config = &self.config;
        let y = parent_y + level as f64 * config.level_step();

        let index = nodes.len();
        nodes.push(PositionedNode {
            id: node.id.clone(),
            title: node.title.clone(),
            description: node.description.clone(),
            x,
            y,
            width: config.node_width,
            height: config.node_height,
            depth: level,
            reserved_width,
            children: Vec::new(),
            parent: None,
        });

        if node.children.is_empty() {
            return index;
        }

        let widths: Vec<f64> = node
            .children
            .iter()
            .map(|child| subtree_width(child, config))
            .collect();
        let total_width = row_width(&widths, config.horizontal_spacing);

        // Children block is centered under the parent's center.
        let mut cursor = x + config.node_width / 2.0 - total_width / 2.0;
        let mut child_indices = Vec::with_capacity(node.children.len());

        for (child, &width) in node.children.iter().zip(&widths) {
            let child_x = cursor + width / 2.0 - config.node_width / 2.0;
            let child_index = self.place(child, child_x, y, level + 1, width, nodes);
            nodes[child_index].parent = Some(index);
            child_indices.push(child_index);
            cursor += width + config.horizontal_spacing;
        }

        nodes[index].children = child_indices;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> InputNode {
        InputNode::new(id, id.to_uppercase(), "")
    }

    fn sample_tree() -> InputNode {
        // r → a, b;  a → a1, a2, a3;  b → b1
        leaf("r").with_children([
            leaf("a").with_children([leaf("a1"), leaf("a2"), leaf("a3")]),
            leaf("b").with_child(leaf("b1")),
        ])
    }

    #[test]
    fn test_single_node() {
        let tree = TreeLayout::with_defaults().compute(&leaf("solo"));
        assert_eq!(tree.len(), 1);
        let root = tree.root().unwrap();
        assert_eq!((root.x, root.y), (0.0, 0.0));
        assert_eq!((root.width, root.height), (200.0, 100.0));
        assert!(root.parent.is_none());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_root_at_origin() {
        let tree = TreeLayout::with_defaults().compute_at(&sample_tree(), Point::new(40.0, -10.0));
        let root = tree.root().unwrap();
        assert_eq!((root.x, root.y), (40.0, -10.0));
    }

    #[test]
    fn test_two_children_centered() {
        let input = leaf("r").with_children([leaf("a"), leaf("b")]);
        let tree = TreeLayout::with_defaults().compute(&input);

        // total = 200 + 100 + 200 = 500, cursor starts at 100 - 250 = -150
        let a = tree.get(1).unwrap();
        let b = tree.get(2).unwrap();
        assert_eq!(a.x, -150.0);
        assert_eq!(b.x, 150.0);
        assert_eq!(a.y, 250.0);
        assert_eq!(b.y, 250.0);

        let root_mid = tree.root().unwrap().center().x;
        let span_mid = (a.x + b.x + b.width) / 2.0;
        assert!((root_mid - span_mid).abs() < 1e-9);
    }

    #[test]
    fn test_levels_share_y() {
        let config = LayoutConfig::default();
        let tree = TreeLayout::new(config).compute(&sample_tree());
        let step = config.level_step();

        // y accumulates level * step on top of the parent's y
        for node in tree.nodes() {
            let d = node.depth as f64;
            let expected = step * d * (d + 1.0) / 2.0;
            assert!(
                (node.y - expected).abs() < 1e-9,
                "{} at depth {} has y {} (expected {expected})",
                node.id,
                node.depth,
                node.y
            );
        }
    }

    #[test]
    fn test_parent_back_references() {
        let tree = TreeLayout::with_defaults().compute(&sample_tree());
        assert!(tree.parent(0).is_none());
        for (index, node) in tree.nodes().iter().enumerate().skip(1) {
            let parent = tree.parent(index).unwrap();
            assert!(
                tree.children(node.parent.unwrap()).any(|c| c.id == node.id),
                "{} missing from children of {}",
                node.id,
                parent.id
            );
            assert_eq!(parent.depth + 1, node.depth);
        }
    }

    #[test]
    fn test_children_preserve_input_order() {
        let tree = TreeLayout::with_defaults().compute(&sample_tree());
        let a_index = tree.nodes().iter().position(|n| n.id.as_str() == "a").unwrap();
        let ids: Vec<_> = tree.children(a_index).map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);

        let xs: Vec<_> = tree.children(a_index).map(|n| n.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sibling_slots_do_not_overlap() {
        let tree = TreeLayout::with_defaults().compute(&sample_tree());
        for index in 0..tree.len() {
            let slots: Vec<_> = tree.children(index).map(PositionedNode::slot).collect();
            for pair in slots.windows(2) {
                assert!(pair[1].0 >= pair[0].1 - 1e-9, "slots overlap: {pair:?}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let layout = TreeLayout::with_defaults();
        let first = layout.compute(&sample_tree());
        let second = layout.compute(&sample_tree());
        for (a, b) in first.nodes().iter().zip(second.nodes()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_parent_excluded_from_serialization() {
        let tree = TreeLayout::with_defaults().compute(&leaf("r").with_child(leaf("a")));
        let json = serde_json::to_value(tree.get(1).unwrap()).unwrap();
        assert!(json.get("parent").is_none());
        assert!(json.get("children").is_none());
        assert_eq!(json["id"], "a");
        assert_eq!(json["reservedWidth"], 200.0);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let bad = LayoutConfig {
            node_width: 0.0,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(MindmapError::InvalidConfig { field: "nodeWidth" })
        );

        let nan = LayoutConfig {
            vertical_spacing: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let zero_gap = LayoutConfig {
            horizontal_spacing: 0.0,
            ..Default::default()
        };
        assert!(zero_gap.validate().is_ok());
    }
}
