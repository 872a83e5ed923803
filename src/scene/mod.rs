//! Render-ready geometry derived from the layout and the view box.
//!
//! None of this is required to lay out or navigate a tree; it saves the
//! rendering surface from re-deriving branch curves and grid lines.

mod branches;
mod grid;

pub use branches::{Branch, branch_curve, branches};
pub use grid::{GridLine, GridOrientation, grid_lines};
