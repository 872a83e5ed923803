//! Background grid lines covering the current view box.

use kurbo::{Line, Point};
use serde::Serialize;

use crate::viewport::ViewBox;

/// Upper bound on lines per axis. A far zoomed-out view with a tiny grid
/// would otherwise allocate without limit.
const MAX_LINES_PER_AXIS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GridOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLine {
    pub orientation: GridOrientation,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl GridLine {
    pub fn line(&self) -> Line {
        Line::new(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }
}

/// Grid lines snapped to multiples of `grid_size` across `view`.
///
/// Lines start at the first multiple at or before the view's left/top edge
/// and continue while inside the right/bottom edge. A non-positive or
/// non-finite `grid_size` yields no lines.
pub fn grid_lines(view: &ViewBox, grid_size: f64) -> Vec<GridLine> {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return Vec::new();
    }
    let mut lines = Vec::new();

    let right = view.x + view.width;
    let bottom = view.y + view.height;

    let mut x = (view.x / grid_size).floor() * grid_size;
    let mut count = 0;
    while x <= right && count < MAX_LINES_PER_AXIS {
        lines.push(GridLine {
            orientation: GridOrientation::Vertical,
            x1: x,
            y1: view.y,
            x2: x,
            y2: bottom,
        });
        x += grid_size;
        count += 1;
    }

    let mut y = (view.y / grid_size).floor() * grid_size;
    count = 0;
    while y <= bottom && count < MAX_LINES_PER_AXIS {
        lines.push(GridLine {
            orientation: GridOrientation::Horizontal,
            x1: view.x,
            y1: y,
            x2: right,
            y2: y,
        });
        y += grid_size;
        count += 1;
    }

    lines
}
