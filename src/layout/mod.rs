//! Hierarchical layout for mindmap trees.
//!
//! The layout is a pure projection of an [`InputNode`](crate::tree::InputNode)
//! tree into world coordinates. It is recomputed from scratch on every pass;
//! nothing here holds state across renders.

pub mod flatten;
pub mod subtree_width;
pub mod tree_layout;

pub use flatten::{OutlineEntry, flatten, outline};
pub use subtree_width::subtree_width;
pub use tree_layout::{LayoutConfig, PositionedNode, PositionedTree, TreeLayout};
