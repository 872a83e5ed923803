//! Pan/zoom/drag state machine.
//!
//! All transitions run to completion on the caller's event loop. Each zoom
//! entry point (wheel, buttons, outline focus, selection) clamps against its
//! own named limits before committing; no operation can leave `zoom` zero or
//! negative.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{MindmapError, Result};

use super::bounds::{Bounds, ViewBox};

/// Smallest zoom any [`ZoomLimits`] will produce, whatever it was configured with.
pub const MIN_ZOOM_FLOOR: f64 = 1e-3;

/// Pointer button index for the primary (usually left) button.
pub const PRIMARY_BUTTON: i16 = 0;

/// Inclusive zoom range for one entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Normalized `(low, high)` with `low` never below [`MIN_ZOOM_FLOOR`].
    fn range(&self) -> (f64, f64) {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let low = if low.is_finite() { low.max(MIN_ZOOM_FLOOR) } else { MIN_ZOOM_FLOOR };
        let high = if high.is_nan() { low } else { high.max(low) };
        (low, high)
    }

    /// Clamp `zoom` into this range. NaN maps to the lower limit.
    pub fn clamp(&self, zoom: f64) -> f64 {
        let (low, high) = self.range();
        if zoom.is_nan() { low } else { zoom.clamp(low, high) }
    }

    /// Apply only the lower limit.
    pub fn at_least(&self, zoom: f64) -> f64 {
        let (low, _) = self.range();
        if zoom.is_nan() { low } else { zoom.max(low) }
    }

    /// Apply only the upper limit (still floored at [`MIN_ZOOM_FLOOR`]).
    pub fn at_most(&self, zoom: f64) -> f64 {
        let (low, high) = self.range();
        if zoom.is_nan() { low } else { zoom.min(high).max(MIN_ZOOM_FLOOR) }
    }
}

/// Configuration for the viewport controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// World-space margin around the layout bounds at zoom 1.
    pub padding: f64,
    /// Multiplier on zoom-compensated drag deltas.
    pub drag_speed: f64,
    /// Additive zoom change per wheel event.
    pub wheel_step: f64,
    pub wheel_zoom: ZoomLimits,
    /// Additive zoom change per zoom-in/zoom-out button press.
    pub button_step: f64,
    pub button_zoom: ZoomLimits,
    /// Multiplicative magnification when centering on a node.
    pub focus_factor: f64,
    pub focus_max_zoom: f64,
    /// Multiplicative zoom-out applied when the side panel opens.
    pub selection_shrink: f64,
    pub selection_zoom: ZoomLimits,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding: 200.0,
            drag_speed: 3.0,
            wheel_step: 0.1,
            wheel_zoom: ZoomLimits::new(0.75, 6.0),
            button_step: 0.2,
            button_zoom: ZoomLimits::new(0.1, 3.0),
            focus_factor: 2.0,
            focus_max_zoom: 3.0,
            selection_shrink: 0.7,
            selection_zoom: ZoomLimits::new(0.5, 3.0),
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("dragSpeed", self.drag_speed),
            ("wheelStep", self.wheel_step),
            ("buttonStep", self.button_step),
            ("focusFactor", self.focus_factor),
            ("focusMaxZoom", self.focus_max_zoom),
            ("selectionShrink", self.selection_shrink),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(MindmapError::InvalidConfig { field });
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(MindmapError::InvalidConfig { field: "padding" });
        }
        let limits = [
            ("wheelZoom", self.wheel_zoom),
            ("buttonZoom", self.button_zoom),
            ("selectionZoom", self.selection_zoom),
        ];
        for (field, range) in limits {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min <= 0.0 || range.max <= 0.0 {
                return Err(MindmapError::InvalidConfig { field });
            }
        }
        Ok(())
    }
}

/// Mutable pan/zoom/drag state owned by one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    #[serde(serialize_with = "serialize_vec2")]
    pub pan: Vec2,
    pub zoom: f64,
    pub is_dragging: bool,
    #[serde(serialize_with = "serialize_point")]
    pub drag_anchor: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            is_dragging: false,
            drag_anchor: Point::ORIGIN,
        }
    }
}

fn serialize_vec2<S: serde::Serializer>(v: &Vec2, s: S) -> std::result::Result<S::Ok, S::Error> {
    XY { x: v.x, y: v.y }.serialize(s)
}

fn serialize_point<S: serde::Serializer>(p: &Point, s: S) -> std::result::Result<S::Ok, S::Error> {
    XY { x: p.x, y: p.y }.serialize(s)
}

#[derive(Serialize)]
struct XY {
    x: f64,
    y: f64,
}

/// The viewport controller.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    state: ViewportState,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            state: ViewportState::default(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ViewportConfig::default())
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    #[inline]
    pub fn pan(&self) -> Vec2 {
        self.state.pan
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.state.zoom * 100.0).round() as u32
    }

    /// The visible world rectangle for `bounds` at the current pan/zoom.
    pub fn view_box(&self, bounds: &Bounds) -> ViewBox {
        self.view_box_at(bounds, self.state.zoom)
    }

    fn view_box_at(&self, bounds: &Bounds, zoom: f64) -> ViewBox {
        ViewBox::from_pan_zoom(bounds, self.state.pan, zoom, self.config.padding)
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// Start a drag if `button` is the primary button. Returns whether it started.
    pub fn begin_drag(&mut self, pointer: Point, button: i16) -> bool {
        if button != PRIMARY_BUTTON {
            return false;
        }
        self.state.is_dragging = true;
        self.state.drag_anchor = pointer;
        tracing::trace!(x = pointer.x, y = pointer.y, "drag started");
        true
    }

    /// Pan by the pointer movement since the previous event.
    ///
    /// The delta is frame-local: the anchor moves to `pointer` on every call,
    /// so consecutive moves add up exactly. Returns the applied pan delta, or
    /// `None` when no drag is active.
    pub fn drag_move(&mut self, pointer: Point) -> Option<Vec2> {
        if !self.state.is_dragging {
            return None;
        }
        let scale = (1.0 / self.state.zoom) * self.config.drag_speed;
        let delta = (pointer - self.state.drag_anchor) * scale;
        self.state.pan += delta;
        self.state.drag_anchor = pointer;
        tracing::trace!(dx = delta.x, dy = delta.y, "drag pan");
        Some(delta)
    }

    /// End the current drag. Also used when the pointer leaves the surface.
    pub fn end_drag(&mut self) {
        if self.state.is_dragging {
            tracing::trace!("drag ended");
        }
        self.state.is_dragging = false;
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    /// Cursor-anchored wheel zoom.
    ///
    /// Positive `delta_y` (scrolling down) zooms out, negative zooms in, zero
    /// does nothing. The world point under `pointer` stays under `pointer`.
    /// Returns the committed zoom.
    pub fn wheel(&mut self, bounds: &Bounds, pointer: Point, surface: Size, delta_y: f64) -> f64 {
        let step = if delta_y > 0.0 {
            -self.config.wheel_step
        } else if delta_y < 0.0 {
            self.config.wheel_step
        } else {
            return self.state.zoom;
        };
        let new_zoom = self.config.wheel_zoom.clamp(self.state.zoom + step);

        if surface.width > 0.0 && surface.height > 0.0 {
            let anchor = self.view_box(bounds).screen_to_world(pointer, surface);
            let after = self.view_box_at(bounds, new_zoom);
            let origin = Point::new(
                anchor.x - (pointer.x / surface.width) * after.width,
                anchor.y - (pointer.y / surface.height) * after.height,
            );
            self.state.pan = bounds.pan_for_view_origin(self.config.padding, origin);
        }

        self.commit_zoom(new_zoom, "wheel");
        new_zoom
    }

    /// Discrete zoom-in step. Pan is unchanged.
    pub fn zoom_in(&mut self) -> f64 {
        let zoom = self.config.button_zoom.clamp(self.state.zoom + self.config.button_step);
        self.commit_zoom(zoom, "zoom in");
        zoom
    }

    /// Discrete zoom-out step. Pan is unchanged.
    pub fn zoom_out(&mut self) -> f64 {
        let zoom = self.config.button_zoom.clamp(self.state.zoom - self.config.button_step);
        self.commit_zoom(zoom, "zoom out");
        zoom
    }

    /// Return to the initial framing: zoom 1, no pan.
    pub fn reset(&mut self) {
        self.state.zoom = 1.0;
        self.state.pan = Vec2::ZERO;
        tracing::debug!("viewport reset");
    }

    /// Shrink zoom to make room for a side panel (lower limit only).
    pub(crate) fn shrink_for_panel(&mut self) {
        let zoom = self
            .config
            .selection_zoom
            .at_least(self.state.zoom * self.config.selection_shrink);
        self.commit_zoom(zoom, "panel opened");
    }

    /// Undo [`shrink_for_panel`](Self::shrink_for_panel) (upper limit only).
    pub(crate) fn restore_from_panel(&mut self) {
        let zoom = self
            .config
            .selection_zoom
            .at_most(self.state.zoom / self.config.selection_shrink);
        self.commit_zoom(zoom, "panel closed");
    }

    fn commit_zoom(&mut self, zoom: f64, cause: &'static str) {
        debug_assert!(zoom > 0.0, "zoom must stay positive");
        self.state.zoom = zoom;
        tracing::debug!(zoom, cause, "zoom committed");
    }

    // =========================================================================
    // Centering
    // =========================================================================

    /// Pan so `target` maps to the center of the view box. Zoom is unchanged.
    pub fn center_on(&mut self, bounds: &Bounds, target: Point) {
        self.state.pan = self.pan_centering(bounds, target, self.state.zoom);
        tracing::debug!(x = target.x, y = target.y, "centered");
    }

    /// Magnify by the focus factor and center on `target` in one step.
    ///
    /// Both zoom and pan are committed together. Returns the new zoom.
    pub fn focus_on(&mut self, bounds: &Bounds, target: Point) -> f64 {
        let zoom = (self.state.zoom * self.config.focus_factor)
            .min(self.config.focus_max_zoom)
            .max(MIN_ZOOM_FLOOR);
        let pan = self.pan_centering(bounds, target, zoom);
        self.state.pan = pan;
        self.commit_zoom(zoom, "focus");
        zoom
    }

    fn pan_centering(&self, bounds: &Bounds, target: Point, zoom: f64) -> Vec2 {
        let view = self.view_box_at(bounds, zoom);
        let origin = Point::new(target.x - view.width / 2.0, target.y - view.height / 2.0);
        bounds.pan_for_view_origin(self.config.padding, origin)
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
