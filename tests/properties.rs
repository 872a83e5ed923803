//! Property-based invariant tests for the layout and viewport engine.
//!
//! 1. Sibling subtree slots never overlap
//! 2. A parent is centered over the span of its children
//! 3. Layout is deterministic down to the bit
//! 4. Wheel zoom keeps the world point under the cursor fixed
//! 5. Consecutive drag moves add up to the total pointer travel
//! 6. Bounds always cover at least one node
//! 7. Zoom stays positive under arbitrary input

use kurbo::{Point, Size};
use mindmap_canvas_wasm::diagram::Diagram;
use mindmap_canvas_wasm::layout::{LayoutConfig, PositionedTree, TreeLayout, flatten};
use mindmap_canvas_wasm::tree::InputNode;
use mindmap_canvas_wasm::viewport::{Bounds, PRIMARY_BUTTON};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

// ── Strategies ──────────────────────────────────────────────────────────

/// Tree shape without ids; ids are assigned in pre-order so they are unique.
#[derive(Debug, Clone)]
struct Shape(Vec<Shape>);

fn shape_strategy() -> impl Strategy<Value = Shape> {
    Just(Shape(Vec::new())).prop_recursive(4, 64, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Shape)
    })
}

fn build(shape: &Shape, next: &mut usize) -> InputNode {
    let id = format!("n{next}");
    *next += 1;
    let mut node = InputNode::new(id.as_str(), format!("Node {id}"), "");
    for child in &shape.0 {
        node.children.push(build(child, next));
    }
    node
}

fn tree_strategy() -> impl Strategy<Value = InputNode> {
    shape_strategy().prop_map(|shape| build(&shape, &mut 0))
}

/// Pointer events applied to a diagram.
#[derive(Debug, Clone)]
enum Op {
    Down(f64, f64, i16),
    Move(f64, f64),
    Up,
    Leave,
    Wheel(f64, f64, f64),
    ZoomIn,
    ZoomOut,
    Select(usize),
    Deselect,
    Focus(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let coord = -200.0..1200.0f64;
    prop_oneof![
        (coord.clone(), coord.clone(), 0i16..3).prop_map(|(x, y, b)| Op::Down(x, y, b)),
        (coord.clone(), coord.clone()).prop_map(|(x, y)| Op::Move(x, y)),
        Just(Op::Up),
        Just(Op::Leave),
        (coord.clone(), coord, -300.0..300.0f64).prop_map(|(x, y, d)| Op::Wheel(x, y, d)),
        Just(Op::ZoomIn),
        Just(Op::ZoomOut),
        (0usize..64).prop_map(Op::Select),
        Just(Op::Deselect),
        (0usize..64).prop_map(Op::Focus),
    ]
}

fn loaded(input: InputNode) -> Diagram {
    let mut diagram = Diagram::with_defaults();
    diagram.set_tree(input);
    diagram.set_surface_size(Size::new(1024.0, 768.0));
    diagram
}

fn node_id(tree: &PositionedTree, pick: usize) -> mindmap_canvas_wasm::tree::NodeId {
    let index = pick % tree.len();
    tree.get(index).map(|node| node.id.clone()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Layout
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sibling_slots_never_overlap(input in tree_strategy()) {
        let config = LayoutConfig::default();
        let tree = TreeLayout::new(config).compute(&input);
        for index in 0..tree.len() {
            let children: Vec<_> = tree.children(index).collect();
            for pair in children.windows(2) {
                let (_, left_end) = pair[0].slot();
                let (right_start, _) = pair[1].slot();
                prop_assert!(
                    left_end + config.horizontal_spacing <= right_start + EPS,
                    "{} overlaps {}", pair[0].id, pair[1].id
                );
            }
        }
    }

    #[test]
    fn same_depth_rects_are_disjoint(input in tree_strategy()) {
        let tree = TreeLayout::with_defaults().compute(&input);
        let mut nodes: Vec<_> = flatten(&tree);
        nodes.sort_by(|a, b| a.depth.cmp(&b.depth).then(a.x.total_cmp(&b.x)));
        for pair in nodes.windows(2) {
            if pair[0].depth == pair[1].depth {
                prop_assert!(pair[0].x + pair[0].width <= pair[1].x + EPS);
            }
        }
    }

    #[test]
    fn parent_centered_over_children(input in tree_strategy()) {
        let tree = TreeLayout::with_defaults().compute(&input);
        for (index, node) in tree.nodes().iter().enumerate() {
            let children: Vec<_> = tree.children(index).collect();
            if let (Some(first), Some(last)) = (children.first(), children.last()) {
                let span_mid = (first.slot().0 + last.slot().1) / 2.0;
                prop_assert!((node.center().x - span_mid).abs() < EPS);
            }
        }
    }

    #[test]
    fn levels_follow_cumulative_step(input in tree_strategy()) {
        let config = LayoutConfig::default();
        let tree = TreeLayout::new(config).compute(&input);
        for node in tree.nodes() {
            let d = node.depth as f64;
            prop_assert_eq!(node.y, config.level_step() * d * (d + 1.0) / 2.0);
        }
    }

    #[test]
    fn layout_is_bitwise_deterministic(input in tree_strategy()) {
        let layout = TreeLayout::with_defaults();
        let a = layout.compute(&input);
        let b = layout.compute(&input);
        prop_assert_eq!(a.len(), b.len());
        for (left, right) in a.nodes().iter().zip(b.nodes()) {
            prop_assert_eq!(&left.id, &right.id);
            prop_assert_eq!(left.x.to_bits(), right.x.to_bits());
            prop_assert_eq!(left.y.to_bits(), right.y.to_bits());
        }
    }

    #[test]
    fn every_node_laid_out_once(input in tree_strategy()) {
        let tree = TreeLayout::with_defaults().compute(&input);
        prop_assert_eq!(flatten(&tree).len(), input.subtree_len());
    }

    #[test]
    fn bounds_cover_a_node(input in tree_strategy()) {
        let tree = TreeLayout::with_defaults().compute(&input);
        let bounds = Bounds::of(flatten(&tree));
        prop_assert!(bounds.width() >= 200.0);
        prop_assert!(bounds.height() >= 100.0);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Viewport
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wheel_keeps_cursor_point_fixed(
        input in tree_strategy(),
        x in 0.0..1024.0f64,
        y in 0.0..768.0f64,
        delta in prop_oneof![-500.0..-0.5f64, 0.5..500.0f64],
        presses in 0usize..6,
    ) {
        let mut diagram = loaded(input);
        for _ in 0..presses {
            diagram.zoom_in();
        }
        let pointer = Point::new(x, y);
        let before = diagram.screen_to_world(pointer);
        diagram.wheel(pointer, delta);
        let after = diagram.screen_to_world(pointer);
        prop_assert!((before - after).hypot() < EPS, "{before:?} drifted to {after:?}");
    }

    #[test]
    fn drag_moves_accumulate(
        start in (-500.0..500.0f64, -500.0..500.0f64),
        moves in prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64), 1..20),
        presses in 0usize..6,
    ) {
        let mut diagram = loaded(InputNode::new("r", "Root", ""));
        for _ in 0..presses {
            diagram.zoom_out();
        }
        let zoom = diagram.zoom();
        let start = Point::new(start.0, start.1);
        prop_assert!(diagram.pointer_down(start, PRIMARY_BUTTON));
        let mut last = start;
        for &(x, y) in &moves {
            last = Point::new(x, y);
            diagram.pointer_move(last);
        }
        diagram.pointer_up();

        let expected = (last - start) * (3.0 / zoom);
        let pan = diagram.pan();
        prop_assert!((pan - expected).hypot() < 1e-6 * (1.0 + expected.hypot()));
    }

    #[test]
    fn zoom_stays_positive(
        input in tree_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut diagram = loaded(input);
        for op in ops {
            match op {
                Op::Down(x, y, button) => {
                    diagram.pointer_down(Point::new(x, y), button);
                }
                Op::Move(x, y) => {
                    diagram.pointer_move(Point::new(x, y));
                }
                Op::Up => diagram.pointer_up(),
                Op::Leave => diagram.pointer_leave(),
                Op::Wheel(x, y, d) => {
                    diagram.wheel(Point::new(x, y), d);
                }
                Op::ZoomIn => {
                    diagram.zoom_in();
                }
                Op::ZoomOut => {
                    diagram.zoom_out();
                }
                Op::Select(pick) => {
                    let id = node_id(diagram.tree(), pick);
                    prop_assert!(diagram.select(&id).is_ok());
                }
                Op::Deselect => {
                    diagram.deselect();
                }
                Op::Focus(pick) => {
                    let id = node_id(diagram.tree(), pick);
                    prop_assert!(diagram.center_on_node(&id).is_ok());
                }
            }
            prop_assert!(diagram.zoom() > 0.0);
            let view = diagram.view_box();
            prop_assert!(view.x.is_finite() && view.y.is_finite());
            prop_assert!(view.width > 0.0 && view.height > 0.0);
        }
    }
}

#[test]
fn single_node_view_box_is_finite() {
    let diagram = loaded(InputNode::new("only", "Only", ""));
    let view = diagram.view_box();
    assert_eq!(view.to_string(), "-200 -200 600 500");
    assert_eq!(diagram.branches().len(), 0);
    assert_eq!(diagram.outline()[0].label, " Only");
}
