//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Point-in-node hit testing
//! - Rectangle intersection (view box culling)

use std::fmt;

use kurbo::{Point, Rect};
use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::layout::PositionedTree;

/// A node rectangle in the spatial index, tagged with its arena index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    /// Index into the owning [`PositionedTree`].
    pub index: usize,
    pub rect: Rect,
}

impl RTreeObject for NodeRect {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.rect.x0, self.rect.y0], [self.rect.x1, self.rect.y1])
    }
}

impl PointDistance for NodeRect {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.rect.contains(Point::new(point[0], point[1]))
    }
}

/// Spatial index for positioned nodes.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<NodeRect>,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.len()).finish()
    }
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load every node rectangle of `tree`.
    pub fn from_tree(tree: &PositionedTree) -> Self {
        let mut index = Self::new();
        index.rebuild(tree);
        index
    }

    /// Rebuild the index from a freshly computed layout.
    pub fn rebuild(&mut self, tree: &PositionedTree) {
        let rects: Vec<_> = tree
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| NodeRect {
                index,
                rect: node.rect(),
            })
            .collect();
        self.tree = RTree::bulk_load(rects);
    }

    /// Topmost node containing `point`.
    ///
    /// Nodes are drawn in arena order, so among overlapping rectangles the
    /// one with the highest index is on top.
    pub fn hit(&self, point: Point) -> Option<usize> {
        self.tree
            .locate_all_at_point(&[point.x, point.y])
            .map(|node| node.index)
            .max()
    }

    /// All nodes intersecting `rect`, in arena order.
    pub fn in_rect(&self, rect: Rect) -> Vec<usize> {
        let envelope = AABB::from_corners([rect.x0, rect.y0], [rect.x1, rect.y1]);
        let mut found: Vec<_> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|node| node.index)
            .collect();
        found.sort_unstable();
        found
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
