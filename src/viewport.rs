//! Device pixel ↔ world coordinate mapping through the camera window.
//!
//! Device space has its origin at the canvas's top-left corner with y growing
//! downward. World space is whatever the camera window frames, with y growing
//! upward. The renderer must build its projection from the same
//! [`CameraWindow`] used here, or clicks and drawn geometry drift apart.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraWindow, Point};

/// Canvas dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height * 0.5
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 800.0)
    }
}

/// How far the camera's center sits from the world origin, per axis,
/// expressed as `half_span - max_edge` (the negated window center).
fn axis_offsets(camera: &CameraWindow) -> (f64, f64) {
    let edges = camera.edges();
    (camera.half_width() - edges.max_x, camera.half_height() - edges.max_y)
}

/// Convert a device pixel to a world point.
///
/// The pixel is first re-centered on the canvas center with the y axis
/// flipped, then scaled by `camera_half_span / canvas_half_span` and shifted
/// by the camera's offset from the origin.
#[must_use]
pub fn device_to_world(device: Point, canvas: CanvasSize, camera: &CameraWindow) -> Point {
    let centered_x = device.x - canvas.half_width();
    let centered_y = (canvas.height - device.y) - canvas.half_height();
    let (x_offset, y_offset) = axis_offsets(camera);
    Point::new(
        centered_x * camera.half_width() / canvas.half_width() - x_offset,
        centered_y * camera.half_height() / canvas.half_height() - y_offset,
    )
}

/// Convert a world point to a device pixel. Inverse of [`device_to_world`].
#[must_use]
pub fn world_to_device(world: Point, canvas: CanvasSize, camera: &CameraWindow) -> Point {
    let (x_offset, y_offset) = axis_offsets(camera);
    let centered_x = (world.x + x_offset) * canvas.half_width() / camera.half_width();
    let centered_y = (world.y + y_offset) * canvas.half_height() / camera.half_height();
    Point::new(centered_x + canvas.half_width(), canvas.half_height() - centered_y)
}

/// World point on the canvas's right edge, on the same device row as `device`.
///
/// Serves as the far end of a hit-test probe. It only clears the scene when
/// nothing extends past the visible right edge; callers that cannot promise
/// that should push it further out (see [`crate::engine::EngineCore::probe_for`]).
#[must_use]
pub fn probe_far_point(device: Point, canvas: CanvasSize, camera: &CameraWindow) -> Point {
    device_to_world(Point::new(canvas.width, device.y), canvas, camera)
}

/// Source of the current canvas size, queried on demand.
pub trait CanvasBounds {
    fn canvas_size(&self) -> CanvasSize;
}

impl CanvasBounds for CanvasSize {
    fn canvas_size(&self) -> CanvasSize {
        *self
    }
}
