#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::{Axis, Edges};

const EPSILON: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn canvas() -> CanvasSize {
    CanvasSize::new(800.0, 600.0)
}

// --- device_to_world ---

#[test]
fn canvas_center_maps_to_window_center() {
    let cam = CameraWindow::default();
    assert!(point_approx_eq(device_to_world(pt(400.0, 300.0), canvas(), &cam), pt(0.0, 0.0)));
}

#[test]
fn top_left_maps_to_min_x_max_y() {
    let cam = CameraWindow::default();
    assert!(point_approx_eq(device_to_world(pt(0.0, 0.0), canvas(), &cam), pt(-400.0, 400.0)));
}

#[test]
fn bottom_right_maps_to_max_x_min_y() {
    let cam = CameraWindow::default();
    assert!(point_approx_eq(device_to_world(pt(800.0, 600.0), canvas(), &cam), pt(400.0, -400.0)));
}

#[test]
fn device_y_grows_down_world_y_grows_up() {
    let cam = CameraWindow::default();
    let upper = device_to_world(pt(400.0, 100.0), canvas(), &cam);
    let lower = device_to_world(pt(400.0, 500.0), canvas(), &cam);
    assert!(upper.y > lower.y);
}

#[test]
fn pan_shifts_mapping_by_pan_amount() {
    let mut cam = CameraWindow::default();
    cam.pan(Axis::Horizontal, 50.0);
    cam.pan(Axis::Vertical, -30.0);
    assert!(point_approx_eq(device_to_world(pt(400.0, 300.0), canvas(), &cam), pt(50.0, -30.0)));
}

#[test]
fn zoom_scales_mapping() {
    let mut cam = CameraWindow::default();
    assert!(cam.zoom(200.0));
    // Window is now ±200; the canvas edge maps to the window edge.
    assert!(point_approx_eq(device_to_world(pt(800.0, 300.0), canvas(), &cam), pt(200.0, 0.0)));
}

#[test]
fn non_square_window() {
    let cam = CameraWindow::new(Edges::new(0.0, 1000.0, 0.0, 500.0), Edges::new(-5000.0, 5000.0, -5000.0, 5000.0), Edges::new(400.0, 600.0, 200.0, 300.0))
        .unwrap();
    assert!(point_approx_eq(device_to_world(pt(0.0, 600.0), canvas(), &cam), pt(0.0, 0.0)));
    assert!(point_approx_eq(device_to_world(pt(800.0, 0.0), canvas(), &cam), pt(1000.0, 500.0)));
}

// --- world_to_device / round trips ---

#[test]
fn world_to_device_of_window_corner() {
    let cam = CameraWindow::default();
    assert!(point_approx_eq(world_to_device(pt(-400.0, 400.0), canvas(), &cam), pt(0.0, 0.0)));
}

#[test]
fn round_trip_device_first() {
    let mut cam = CameraWindow::default();
    cam.pan(Axis::Horizontal, 137.0);
    cam.zoom(-75.0);
    for device in [pt(0.0, 0.0), pt(13.5, 587.25), pt(799.0, 1.0), pt(400.0, 300.0)] {
        let back = world_to_device(device_to_world(device, canvas(), &cam), canvas(), &cam);
        assert!(point_approx_eq(device, back), "{device:?} came back as {back:?}");
    }
}

#[test]
fn round_trip_world_first() {
    let mut cam = CameraWindow::default();
    cam.pan(Axis::Vertical, -220.0);
    cam.zoom(120.0);
    let world = pt(-33.3, 71.7);
    let back = device_to_world(world_to_device(world, canvas(), &cam), canvas(), &cam);
    assert!(point_approx_eq(world, back));
}

// --- probe_far_point ---

#[test]
fn probe_far_point_is_right_edge_same_row() {
    let cam = CameraWindow::default();
    let far = probe_far_point(pt(123.0, 150.0), canvas(), &cam);
    let expected = device_to_world(pt(800.0, 150.0), canvas(), &cam);
    assert_eq!(far, expected);
    assert!(point_approx_eq(far, pt(400.0, 200.0)));
}

// --- CanvasSize ---

#[test]
fn canvas_size_is_its_own_bounds_source() {
    let size = canvas();
    assert_eq!(size.canvas_size(), size);
    assert_eq!(size.half_width(), 400.0);
    assert_eq!(size.half_height(), 300.0);
}
