//! World bounds and the visible view box.
//!
//! The view box is the world-space rectangle currently mapped onto the
//! rendering surface. It is derived, never stored: every read recomputes it
//! from the layout bounds and the current pan/zoom.
//!
//! ```text
//! view_w = (max_x - min_x + 2 * padding) / zoom
//! view_h = (max_y - min_y + 2 * padding) / zoom
//! view_x = min_x - padding - pan.x
//! view_y = min_y - padding - pan.y
//! ```

use std::fmt;

use kurbo::{Point, Rect, Size, Vec2};
use serde::Serialize;

use crate::layout::PositionedNode;

/// Axis-aligned extent of all node rectangles in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Degenerate but finite bounds used when there is nothing to measure.
    pub const EMPTY: Self = Self {
        min_x: 0.0,
        max_x: 0.0,
        min_y: 0.0,
        max_y: 0.0,
    };

    /// Reduce over every node's `(x, y)` and `(x + width, y + height)`.
    ///
    /// Returns [`Bounds::EMPTY`] for an empty input so no infinities leak
    /// into view box math.
    pub fn of<'a>(nodes: impl IntoIterator<Item = &'a PositionedNode>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for node in nodes {
            min_x = min_x.min(node.x);
            max_x = max_x.max(node.x + node.width);
            min_y = min_y.min(node.y);
            max_y = max_y.max(node.y + node.height);
        }

        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return Self::EMPTY;
        }

        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Bounds grown by `padding` on every side.
    pub fn padded(&self, padding: f64) -> Rect {
        Rect::new(
            self.min_x - padding,
            self.min_y - padding,
            self.max_x + padding,
            self.max_y + padding,
        )
    }

    /// The view box origin at zero pan: the padded top-left corner.
    #[inline]
    pub fn padded_origin(&self, padding: f64) -> Point {
        Point::new(self.min_x - padding, self.min_y - padding)
    }

    /// Pan offset that places the view box origin at `view_origin`.
    #[inline]
    pub fn pan_for_view_origin(&self, padding: f64, view_origin: Point) -> Vec2 {
        self.padded_origin(padding) - view_origin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The world-space rectangle mapped onto the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Derive the view box for the given bounds, pan, and zoom.
    pub fn from_pan_zoom(bounds: &Bounds, pan: Vec2, zoom: f64, padding: f64) -> Self {
        // Zoom is clamped positive at every entry point; this only keeps a
        // caller-built zero from producing infinities.
        let zoom = zoom.max(f64::MIN_POSITIVE);
        let origin = bounds.padded_origin(padding) - pan;
        Self {
            x: origin.x,
            y: origin.y,
            width: (bounds.width() + 2.0 * padding) / zoom,
            height: (bounds.height() + 2.0 * padding) / zoom,
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Map a pointer position on a surface of size `surface` into world space.
    ///
    /// A zero-sized surface maps every pointer to the view box origin.
    pub fn screen_to_world(&self, screen: Point, surface: Size) -> Point {
        Point::new(
            ratio(screen.x, surface.width) * self.width + self.x,
            ratio(screen.y, surface.height) * self.height + self.y,
        )
    }

    /// Inverse of [`screen_to_world`](Self::screen_to_world).
    pub fn world_to_screen(&self, world: Point, surface: Size) -> Point {
        Point::new(
            ratio(world.x - self.x, self.width) * surface.width,
            ratio(world.y - self.y, self.height) * surface.height,
        )
    }
}

/// SVG `viewBox` attribute form: `"x y width height"`.
impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[inline]
fn ratio(value: f64, extent: f64) -> f64 {
    if extent > 0.0 { value / extent } else { 0.0 }
}
