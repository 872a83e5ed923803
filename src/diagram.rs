//! Diagram - the mindmap engine behind one rendering surface.
//!
//! The Diagram owns:
//! - The input tree (single source of truth)
//! - Its positioned projection, bounds, id lookup, and spatial index
//! - Viewport pan/zoom/drag state
//! - The selection coupler
//!
//! The projection is rebuilt from scratch whenever the input tree or the
//! layout configuration changes. Because layout is deterministic, reading it
//! back between those changes is equivalent to recomputing it per render.
//!
//! Diagrams share nothing; each instance is independent.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use kurbo::{Point, Size, Vec2};

use crate::config::EngineConfig;
use crate::error::{MindmapError, Result};
use crate::layout::{OutlineEntry, PositionedNode, PositionedTree, TreeLayout, flatten, outline};
use crate::scene::{Branch, GridLine, branches, grid_lines};
use crate::spatial::SpatialIndex;
use crate::tree::{InputNode, NodeId};
use crate::viewport::{
    Bounds, Selection, SelectionChange, SelectionCoupler, ViewBox, ViewportController,
};

/// The mindmap engine.
#[derive(Debug)]
pub struct Diagram {
    config: EngineConfig,
    input: Option<InputNode>,
    tree: PositionedTree,
    bounds: Bounds,
    ids: HashMap<NodeId, usize>,
    spatial: SpatialIndex,
    viewport: ViewportController,
    selection: SelectionCoupler,
    surface: Size,
}

impl Diagram {
    /// Create an empty diagram with a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Create an empty diagram with the default configuration.
    pub fn with_defaults() -> Self {
        Self::from_valid(EngineConfig::default())
    }

    fn from_valid(config: EngineConfig) -> Self {
        Self {
            config,
            input: None,
            tree: PositionedTree::empty(),
            bounds: Bounds::EMPTY,
            ids: HashMap::new(),
            spatial: SpatialIndex::new(),
            viewport: ViewportController::new(config.viewport),
            selection: SelectionCoupler::new(),
            surface: Size::ZERO,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Replace the input tree and rebuild the projection.
    ///
    /// Viewport state is kept. If the selected node no longer exists the
    /// selection is closed, which also reverses its zoom nudge.
    pub fn set_tree(&mut self, input: InputNode) {
        self.input = Some(input);
        self.relayout();
        let stale = self
            .selection
            .selected()
            .is_some_and(|id| !self.ids.contains_key(id));
        if stale {
            self.selection.deselect(&mut self.viewport);
        }
    }

    /// Parse `json` and [`set_tree`](Self::set_tree) it.
    pub fn set_tree_json(&mut self, json: &str) -> Result<()> {
        let input = InputNode::from_json(json)?;
        self.set_tree(input);
        Ok(())
    }

    /// Drop the tree. Open selections are closed.
    pub fn clear_tree(&mut self) {
        self.input = None;
        self.relayout();
        self.selection.deselect(&mut self.viewport);
    }

    pub fn input(&self) -> Option<&InputNode> {
        self.input.as_ref()
    }

    /// Recompute the positioned tree, bounds, id map, and spatial index.
    pub fn relayout(&mut self) {
        self.tree = match &self.input {
            Some(input) => TreeLayout::new(self.config.layout).compute(input),
            None => PositionedTree::empty(),
        };
        self.bounds = Bounds::of(self.tree.nodes());

        self.ids.clear();
        self.ids.reserve(self.tree.len());
        for (index, node) in self.tree.nodes().iter().enumerate() {
            match self.ids.entry(node.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(node = %node.id, "duplicate node id; lookups resolve to the first");
                }
            }
        }

        self.spatial.rebuild(&self.tree);
        tracing::debug!(nodes = self.tree.len(), "diagram relaid out");
    }

    pub fn tree(&self) -> &PositionedTree {
        &self.tree
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Positioned node by id.
    pub fn node(&self, id: &NodeId) -> Option<&PositionedNode> {
        self.ids.get(id).and_then(|&index| self.tree.get(index))
    }

    fn require_node(&self, id: &NodeId) -> Result<&PositionedNode> {
        self.node(id).ok_or_else(|| {
            tracing::warn!(node = %id, "unknown node");
            MindmapError::unknown_node(id.clone())
        })
    }

    // =========================================================================
    // Surface and pointer input
    // =========================================================================

    /// On-screen size of the rendering surface, for pointer conversion.
    pub fn set_surface_size(&mut self, size: Size) {
        self.surface = size;
    }

    pub fn surface_size(&self) -> Size {
        self.surface
    }

    pub fn pointer_down(&mut self, pointer: Point, button: i16) -> bool {
        self.viewport.begin_drag(pointer, button)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<Vec2> {
        self.viewport.drag_move(pointer)
    }

    pub fn pointer_up(&mut self) {
        self.viewport.end_drag();
    }

    /// Leaving the surface while pressed ends the drag like a pointer-up.
    pub fn pointer_leave(&mut self) {
        self.viewport.end_drag();
    }

    /// Cursor-anchored wheel zoom at `pointer` (surface-relative).
    pub fn wheel(&mut self, pointer: Point, delta_y: f64) -> f64 {
        self.viewport.wheel(&self.bounds, pointer, self.surface, delta_y)
    }

    /// Convert a surface-relative pointer position into world coordinates.
    pub fn screen_to_world(&self, pointer: Point) -> Point {
        self.view_box().screen_to_world(pointer, self.surface)
    }

    /// Convert a world position into surface-relative coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.view_box().world_to_screen(world, self.surface)
    }

    /// Topmost node under a surface-relative pointer position.
    pub fn node_at(&self, pointer: Point) -> Option<&PositionedNode> {
        let world = self.screen_to_world(pointer);
        self.spatial.hit(world).and_then(|index| self.tree.get(index))
    }

    /// Hit test `pointer` and select the node under it, if any.
    pub fn click(&mut self, pointer: Point) -> Option<SelectionChange> {
        let id = self.node_at(pointer)?.id.clone();
        Some(self.selection.select(id, &mut self.viewport))
    }

    // =========================================================================
    // Viewport controls
    // =========================================================================

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Center the root node in the view at the current zoom.
    pub fn center_on_root(&mut self) -> Result<()> {
        let center = self.tree.root().ok_or(MindmapError::NoTree)?.center();
        self.viewport.center_on(&self.bounds, center);
        Ok(())
    }

    /// Magnify and center on the node with `id` (outline navigation).
    pub fn center_on_node(&mut self, id: &NodeId) -> Result<f64> {
        let center = self.require_node(id)?.center();
        Ok(self.viewport.focus_on(&self.bounds, center))
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn view_box(&self) -> ViewBox {
        self.viewport.view_box(&self.bounds)
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    pub fn pan(&self) -> Vec2 {
        self.viewport.pan()
    }

    pub fn is_dragging(&self) -> bool {
        self.viewport.is_dragging()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the node with `id` (node-click callback).
    pub fn select(&mut self, id: &NodeId) -> Result<SelectionChange> {
        self.require_node(id)?;
        Ok(self.selection.select(id.clone(), &mut self.viewport))
    }

    /// Close the side panel. Returns whether anything was selected.
    pub fn deselect(&mut self) -> bool {
        self.selection.deselect(&mut self.viewport)
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selection.selected()
    }

    /// The selected positioned node, for the side panel.
    pub fn selected_node(&self) -> Option<&PositionedNode> {
        self.selected_id().and_then(|id| self.node(id))
    }

    pub fn is_drawer_open(&self) -> bool {
        self.selection.is_open()
    }

    // =========================================================================
    // Render read-backs
    // =========================================================================

    /// Every node once, root first, children in order.
    pub fn nodes(&self) -> Vec<&PositionedNode> {
        flatten(&self.tree)
    }

    pub fn branches(&self) -> Vec<Branch> {
        branches(&self.tree)
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline(&self.tree)
    }

    pub fn grid_lines(&self) -> Vec<GridLine> {
        grid_lines(&self.view_box(), self.config.grid_size)
    }

    /// Nodes intersecting the current view box, in arena order.
    pub fn visible_nodes(&self) -> Vec<&PositionedNode> {
        self.spatial
            .in_rect(self.view_box().rect())
            .into_iter()
            .filter_map(|index| self.tree.get(index))
            .collect()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::with_defaults()
    }
}
