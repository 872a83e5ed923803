//! Mindmap Canvas - WASM Module
//!
//! This module provides the layout and viewport engine for the Mindmap
//! Canvas concept-map viewer. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; the host page owns rendering
//! (SVG or canvas) and forwards pointer events.
//!
//! # Architecture
//!
//! - `tree`: Input tree types, deserialized from the session payload
//! - `layout`: Subtree widths, top-down layered layout, flattening, outline
//! - `viewport`: View box math, pan/zoom/drag controller, selection coupler
//! - `scene`: Branch curves and grid lines for the rendering surface
//! - `spatial`: R-tree over node rectangles for hit testing and culling
//! - `diagram`: The engine tying all of the above together

use js_sys::Float64Array;
use kurbo::{Point, Size};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod diagram;
pub mod error;
pub mod layout;
pub mod logging;
pub mod scene;
pub mod spatial;
pub mod tree;
pub mod viewport;

use config::EngineConfig;
use diagram::Diagram;
use error::MindmapError;
use tree::{InputNode, NodeId};
use viewport::SelectionChange;

const SERIALIZER: serde_wasm_bindgen::Serializer = serde_wasm_bindgen::Serializer::json_compatible();

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&SERIALIZER)?)
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Route engine diagnostics to the browser console.
///
/// `level` is one of `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    logging::init(logging::parse_level(level));
}

/// Main entry point for the mindmap engine.
///
/// This struct wraps the internal Diagram and provides the public API
/// exposed to JavaScript. Pointer coordinates are relative to the rendering
/// surface's top-left corner, in CSS pixels.
#[wasm_bindgen]
pub struct MindmapCanvas {
    diagram: Diagram,
}

#[wasm_bindgen]
impl MindmapCanvas {
    /// Create a new engine.
    ///
    /// `config` is an optional, possibly partial, configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MindmapCanvas, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| MindmapError::MalformedConfig(err.to_string()))?
        };
        Ok(Self {
            diagram: Diagram::new(config)?,
        })
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Replace the tree with a `{ node_id, title, description, children }` object.
    #[wasm_bindgen(js_name = setTree)]
    pub fn set_tree(&mut self, tree: JsValue) -> Result<(), JsError> {
        let input: InputNode = serde_wasm_bindgen::from_value(tree).map_err(MindmapError::from)?;
        self.diagram.set_tree(input);
        Ok(())
    }

    /// Replace the tree from its JSON text.
    #[wasm_bindgen(js_name = setTreeJson)]
    pub fn set_tree_json(&mut self, json: &str) -> Result<(), JsError> {
        Ok(self.diagram.set_tree_json(json)?)
    }

    /// Remove the tree.
    #[wasm_bindgen(js_name = clearTree)]
    pub fn clear_tree(&mut self) {
        self.diagram.clear_tree();
    }

    /// Get the number of laid-out nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.diagram.tree().len()
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Set the on-screen size of the rendering surface.
    #[wasm_bindgen(js_name = setSurfaceSize)]
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.diagram.set_surface_size(Size::new(width, height));
    }

    /// Pointer pressed. Only the primary button (0) starts a drag.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) -> bool {
        self.diagram.pointer_down(Point::new(x, y), button)
    }

    /// Pointer moved. Returns true if the view panned.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.diagram.pointer_move(Point::new(x, y)).is_some()
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.diagram.pointer_up();
    }

    /// Pointer left the surface; ends any drag.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.diagram.pointer_leave();
    }

    /// Wheel event at a pointer position. Returns the new zoom.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> f64 {
        self.diagram.wheel(Point::new(x, y), delta_y)
    }

    /// Click at a pointer position. Returns the id of the node selected, if any.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        self.diagram.click(Point::new(x, y))?;
        self.selected_node_id()
    }

    /// Id of the topmost node under a pointer position.
    #[wasm_bindgen(js_name = nodeAtPoint)]
    pub fn node_at_point(&self, x: f64, y: f64) -> Option<String> {
        self.diagram
            .node_at(Point::new(x, y))
            .map(|node| node.id.to_string())
    }

    // =========================================================================
    // Viewport Controls
    // =========================================================================

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> f64 {
        self.diagram.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> f64 {
        self.diagram.zoom_out()
    }

    /// Back to zoom 1 with no pan.
    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) {
        self.diagram.reset_view();
    }

    #[wasm_bindgen(js_name = centerOnRoot)]
    pub fn center_on_root(&mut self) -> Result<(), JsError> {
        Ok(self.diagram.center_on_root()?)
    }

    /// Zoom in and center on a node (outline click). Returns the new zoom.
    #[wasm_bindgen(js_name = centerOnNode)]
    pub fn center_on_node(&mut self, id: &str) -> Result<f64, JsError> {
        Ok(self.diagram.center_on_node(&NodeId::from(id))?)
    }

    /// SVG `viewBox` attribute for the current pan/zoom.
    #[wasm_bindgen(js_name = viewBox)]
    pub fn view_box(&self) -> String {
        self.diagram.view_box().to_string()
    }

    pub fn zoom(&self) -> f64 {
        self.diagram.zoom()
    }

    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> u32 {
        self.diagram.zoom_percent()
    }

    /// Current pan offset as `[x, y]`.
    pub fn pan(&self) -> Float64Array {
        let pan = self.diagram.pan();
        Float64Array::from(&[pan.x, pan.y][..])
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.diagram.is_dragging()
    }

    /// Full viewport state `{ pan, zoom, isDragging, dragAnchor }`.
    #[wasm_bindgen(js_name = viewportState)]
    pub fn viewport_state(&self) -> Result<JsValue, JsError> {
        to_js(self.diagram.viewport().state())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Node-click callback. Returns true if this opened the side panel.
    #[wasm_bindgen(js_name = selectNode)]
    pub fn select_node(&mut self, id: &str) -> Result<bool, JsError> {
        let change = self.diagram.select(&NodeId::from(id))?;
        Ok(change == SelectionChange::Opened)
    }

    /// Close the side panel. Returns false if nothing was selected.
    #[wasm_bindgen(js_name = closeSelection)]
    pub fn close_selection(&mut self) -> bool {
        self.diagram.deselect()
    }

    #[wasm_bindgen(js_name = selectedNodeId)]
    pub fn selected_node_id(&self) -> Option<String> {
        self.diagram.selected_id().map(ToString::to_string)
    }

    #[wasm_bindgen(js_name = isDrawerOpen)]
    pub fn is_drawer_open(&self) -> bool {
        self.diagram.is_drawer_open()
    }

    // =========================================================================
    // Render Read-backs
    // =========================================================================

    /// All positioned nodes in pre-order.
    pub fn nodes(&self) -> Result<JsValue, JsError> {
        to_js(&self.diagram.nodes())
    }

    /// A single positioned node by id.
    pub fn node(&self, id: &str) -> Result<JsValue, JsError> {
        let id = NodeId::from(id);
        let node = self
            .diagram
            .node(&id)
            .ok_or_else(|| MindmapError::unknown_node(id.clone()))?;
        to_js(node)
    }

    /// Node top-left positions as `[x0, y0, x1, y1, ...]` in pre-order.
    pub fn positions(&self) -> Float64Array {
        let nodes = self.diagram.nodes();
        let mut positions = Vec::with_capacity(nodes.len() * 2);
        for node in nodes {
            positions.push(node.x);
            positions.push(node.y);
        }
        Float64Array::from(&positions[..])
    }

    /// Branch curves `{ parentId, childId, path }`.
    pub fn branches(&self) -> Result<JsValue, JsError> {
        to_js(&self.diagram.branches())
    }

    /// Outline rows `{ id, title, depth, label, indent }`.
    pub fn outline(&self) -> Result<JsValue, JsError> {
        to_js(&self.diagram.outline())
    }

    /// Background grid lines for the current view box.
    #[wasm_bindgen(js_name = gridLines)]
    pub fn grid_lines(&self) -> Result<JsValue, JsError> {
        to_js(&self.diagram.grid_lines())
    }

    /// Ids of nodes intersecting the current view box.
    #[wasm_bindgen(js_name = visibleNodes)]
    pub fn visible_nodes(&self) -> Vec<String> {
        self.diagram
            .visible_nodes()
            .into_iter()
            .map(|node| node.id.to_string())
            .collect()
    }

    /// Layout bounds `{ minX, maxX, minY, maxY }`.
    pub fn bounds(&self) -> Result<JsValue, JsError> {
        to_js(&self.diagram.bounds())
    }
}
