//! Browser smoke tests for the JavaScript-facing API.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use mindmap_canvas_wasm::MindmapCanvas;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TREE: &str = r#"{
    "node_id": "root",
    "title": "Root",
    "description": "Top",
    "children": [
        { "node_id": "a", "title": "A", "description": "First" },
        { "node_id": "b", "title": "B", "description": "Second", "children": null }
    ]
}"#;

fn canvas() -> MindmapCanvas {
    let mut canvas = MindmapCanvas::new(JsValue::UNDEFINED).map_err(JsValue::from).unwrap();
    canvas.set_tree_json(TREE).map_err(JsValue::from).unwrap();
    canvas.set_surface_size(900.0, 750.0);
    canvas
}

#[wasm_bindgen_test]
fn loads_tree_and_frames_it() {
    let canvas = canvas();
    assert_eq!(canvas.node_count(), 3);
    assert_eq!(canvas.view_box(), "-350 -200 900 750");
    assert_eq!(canvas.zoom_percent(), 100);
    assert_eq!(canvas.positions().length(), 6);
    assert_eq!(canvas.visible_nodes().len(), 3);
}

#[wasm_bindgen_test]
fn selection_round_trip() {
    let mut canvas = canvas();
    assert!(canvas.select_node("a").map_err(JsValue::from).unwrap());
    assert!(canvas.is_drawer_open());
    assert_eq!(canvas.selected_node_id().as_deref(), Some("a"));
    assert!(!canvas.select_node("b").map_err(JsValue::from).unwrap());
    assert!(canvas.close_selection());
    assert!(!canvas.is_drawer_open());
    assert!(canvas.select_node("missing").is_err());
}

#[wasm_bindgen_test]
fn drag_and_zoom() {
    let mut canvas = canvas();
    assert!(canvas.pointer_down(10.0, 10.0, 0));
    assert!(canvas.pointer_move(20.0, 10.0));
    canvas.pointer_leave();
    assert!(!canvas.is_dragging());
    assert_eq!(canvas.pan().to_vec(), vec![30.0, 0.0]);

    canvas.zoom_in();
    assert_eq!(canvas.zoom_percent(), 120);
    canvas.reset_zoom();
    assert_eq!(canvas.zoom(), 1.0);
}

#[wasm_bindgen_test]
fn read_backs_serialize() {
    let canvas = canvas();
    assert!(canvas.nodes().map_err(JsValue::from).unwrap().is_object());
    assert!(canvas.branches().is_ok());
    assert!(canvas.outline().is_ok());
    assert!(canvas.grid_lines().is_ok());
    assert!(canvas.node("b").is_ok());
}

#[wasm_bindgen_test]
fn rejects_malformed_config() {
    let config = JsValue::from_str("not a config");
    assert!(MindmapCanvas::new(config).is_err());
}
