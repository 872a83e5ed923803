//! Viewport math and interaction state.
//!
//! - `bounds`: world bounds, the derived view box, screen/world conversion
//! - `controller`: pan/zoom/drag state machine
//! - `selection`: selected node and the side-panel zoom nudge

pub mod bounds;
pub mod controller;
pub mod selection;

pub use bounds::{Bounds, ViewBox};
pub use controller::{PRIMARY_BUTTON, ViewportConfig, ViewportController, ViewportState, ZoomLimits};
pub use selection::{Selection, SelectionChange, SelectionCoupler};
