//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree over node rectangles for pointer hit
//! testing and view box culling.

mod rtree;

pub use rtree::SpatialIndex;
