use kurbo::Affine;

use super::*;
use crate::camera::{Axis, CameraWindow};
use crate::scene::{ObjectId, PolygonObject};
use crate::viewport::CanvasSize;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Projection(Edges),
    Polygon { world: Affine, vertices: Vec<Point>, selected: bool },
    Bbox { world: Affine, bbox: BoundingBox, style: BoxStyle },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    fail_after: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
struct Broken;

impl Recorder {
    fn record(&mut self, call: Call) -> Result<(), Broken> {
        if self.fail_after.is_some_and(|n| self.calls.len() >= n) {
            return Err(Broken);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl CanvasBounds for Recorder {
    fn canvas_size(&self) -> CanvasSize {
        CanvasSize::default()
    }
}

impl Renderer for Recorder {
    type Error = Broken;

    fn set_projection(&mut self, window: Edges) -> Result<(), Broken> {
        self.record(Call::Projection(window))
    }

    fn draw_polygon(&mut self, world: Affine, vertices: &[Point], selected: bool) -> Result<(), Broken> {
        self.record(Call::Polygon { world, vertices: vertices.to_vec(), selected })
    }

    fn draw_bbox(&mut self, world: Affine, bbox: &BoundingBox, style: BoxStyle) -> Result<(), Broken> {
        self.record(Call::Bbox { world, bbox: *bbox, style })
    }
}

fn triangle() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)]
}

fn nested_core() -> (EngineCore, ObjectId, ObjectId) {
    let mut core = EngineCore::new();
    let parent = core.scene.add(PolygonObject::with_vertices(triangle()).with_transform(Affine::translate((5.0, 0.0))));
    let child = core
        .scene
        .add_child(parent, PolygonObject::with_vertices(triangle()).with_transform(Affine::scale(2.0)))
        .unwrap();
    (core, parent, child)
}

#[test]
fn empty_scene_sets_projection_only() {
    let mut rec = Recorder::default();
    draw(&mut rec, &EngineCore::new()).unwrap();
    assert_eq!(rec.calls, vec![Call::Projection(Edges::new(-400.0, 400.0, -400.0, 400.0))]);
}

#[test]
fn projection_follows_camera() {
    let mut core = EngineCore::new();
    core.camera.pan(Axis::Horizontal, 100.0);
    assert!(core.camera.zoom(50.0));
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();
    assert_eq!(rec.calls[0], Call::Projection(Edges::new(-250.0, 450.0, -350.0, 350.0)));
}

#[test]
fn polygons_drawn_parent_first_with_accumulated_transforms() {
    let (core, _, _) = nested_core();
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();

    let parent_world = Affine::translate((5.0, 0.0));
    assert_eq!(
        rec.calls[1..],
        [
            Call::Polygon { world: parent_world, vertices: triangle(), selected: false },
            Call::Polygon { world: parent_world * Affine::scale(2.0), vertices: triangle(), selected: false },
        ]
    );
}

#[test]
fn selection_overlay_drawn_after_all_polygons() {
    let (mut core, parent, _) = nested_core();
    core.ui.selected_id = Some(parent);
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();

    assert_eq!(rec.calls.len(), 4);
    assert!(matches!(rec.calls[1], Call::Polygon { selected: true, .. }));
    assert!(matches!(rec.calls[2], Call::Polygon { selected: false, .. }));
    assert_eq!(
        rec.calls[3],
        Call::Bbox {
            world: Affine::translate((5.0, 0.0)),
            bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            style: BoxStyle::Selection,
        }
    );
}

#[test]
fn hovered_vertex_handle_uses_configured_size() {
    let (mut core, _, child) = nested_core();
    core.ui.selected_id = Some(child);
    core.ui.hovered_vertex = Some(1);
    core.config.vertex_handle = 3.0;
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();

    let last = rec.calls.last().unwrap();
    assert_eq!(
        *last,
        Call::Bbox {
            world: Affine::translate((5.0, 0.0)) * Affine::scale(2.0),
            bbox: BoundingBox::new(7.0, -3.0, 13.0, 3.0),
            style: BoxStyle::VertexHandle,
        }
    );
}

#[test]
fn stale_hover_index_draws_no_handle() {
    let (mut core, parent, _) = nested_core();
    core.ui.selected_id = Some(parent);
    core.ui.hovered_vertex = Some(9);
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();
    assert!(!rec.calls.iter().any(|c| matches!(c, Call::Bbox { style: BoxStyle::VertexHandle, .. })));
}

#[test]
fn selected_object_without_vertices_has_no_bbox_overlay() {
    let mut core = EngineCore::new();
    let id = core.scene.add(PolygonObject::new());
    core.ui.selected_id = Some(id);
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();
    assert_eq!(rec.calls.len(), 2);
}

#[test]
fn first_renderer_error_stops_the_walk() {
    let (core, _, _) = nested_core();
    let mut rec = Recorder { fail_after: Some(2), ..Recorder::default() };
    assert_eq!(draw(&mut rec, &core), Err(Broken));
    assert_eq!(rec.calls.len(), 2);
}

#[test]
fn projection_matches_viewport_camera() {
    let camera = CameraWindow::with_window(Edges::new(-200.0, 600.0, -300.0, 300.0)).unwrap();
    let core = EngineCore { camera, ..EngineCore::new() };
    let mut rec = Recorder::default();
    draw(&mut rec, &core).unwrap();
    assert_eq!(rec.calls[0], Call::Projection(camera.edges()));
}
