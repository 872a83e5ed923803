//! Parent-to-child branch curves.

use kurbo::{BezPath, CubicBez, Point};
use serde::Serialize;

use crate::layout::{PositionedNode, PositionedTree, flatten};
use crate::tree::NodeId;

/// A branch from a parent's bottom-center to a child's top-center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub parent_id: NodeId,
    pub child_id: NodeId,
    /// SVG path data for the curve.
    pub path: String,
}

/// S-shaped cubic from `start` down to `end`; both control points sit on
/// the vertical midpoint.
pub fn branch_curve(start: Point, end: Point) -> CubicBez {
    let mid_y = start.y + (end.y - start.y) / 2.0;
    CubicBez::new(
        start,
        Point::new(start.x, mid_y),
        Point::new(end.x, mid_y),
        end,
    )
}

fn branch_path(parent: &PositionedNode, child: &PositionedNode) -> String {
    let curve = branch_curve(parent.bottom_center(), child.top_center());
    let mut path = BezPath::new();
    path.move_to(curve.p0);
    path.curve_to(curve.p1, curve.p2, curve.p3);
    path.to_svg()
}

/// One branch per non-root node, in flatten order.
pub fn branches(tree: &PositionedTree) -> Vec<Branch> {
    flatten(tree)
        .into_iter()
        .filter_map(|node| {
            let parent = tree.get(node.parent?)?;
            Some(Branch {
                parent_id: parent.id.clone(),
                child_id: node.id.clone(),
                path: branch_path(parent, node),
            })
        })
        .collect()
}
