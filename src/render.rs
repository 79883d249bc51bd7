//! Rendering bridge: the scene walk that feeds a host-supplied [`Renderer`].
//!
//! The crate never draws pixels. The host implements [`Renderer`] on top of
//! whatever graphics API it owns, and [`draw`] hands it read-only views of
//! the camera window, the flattened scene and the selection UI. Nothing here
//! mutates application state.
//!
//! The projection passed to [`Renderer::set_projection`] comes from the same
//! [`crate::camera::CameraWindow`] that [`crate::viewport`] maps clicks
//! through, so drawn geometry and hit-testing agree.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use kurbo::Affine;

use crate::camera::{Edges, Point};
use crate::engine::EngineCore;
use crate::geom::BoundingBox;
use crate::viewport::CanvasBounds;

/// What an overlay box represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// Bounding box of the selected object.
    Selection,
    /// Square handle around the hovered vertex.
    VertexHandle,
}

/// Drawing surface supplied by the host.
///
/// Geometry is always handed over in local space together with the
/// accumulated local-to-world transform; the renderer applies the transform
/// and then the orthographic projection.
pub trait Renderer: CanvasBounds {
    type Error;

    /// Set the orthographic projection to the camera window.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    fn set_projection(&mut self, window: Edges) -> Result<(), Self::Error>;

    /// Draw a closed polygon.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    fn draw_polygon(&mut self, world: Affine, vertices: &[Point], selected: bool) -> Result<(), Self::Error>;

    /// Draw an axis-aligned box (in local space) as an overlay.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    fn draw_bbox(&mut self, world: Affine, bbox: &BoundingBox, style: BoxStyle) -> Result<(), Self::Error>;
}

/// Draw the full scene: projection, polygons in flatten order, then the
/// selection overlays.
///
/// # Errors
///
/// Stops at and returns the first renderer error.
pub fn draw<R: Renderer + ?Sized>(renderer: &mut R, core: &EngineCore) -> Result<(), R::Error> {
    renderer.set_projection(core.camera.edges())?;

    let selected_id = core.ui.selected_id;
    let mut selected = None;
    for placed in core.scene.flatten() {
        let is_selected = selected_id == Some(placed.object.id());
        renderer.draw_polygon(placed.world, placed.object.vertices(), is_selected)?;
        if is_selected {
            selected = Some(placed);
        }
    }

    let Some(placed) = selected else {
        return Ok(());
    };
    if let Some(bbox) = placed.object.bbox() {
        renderer.draw_bbox(placed.world, bbox, BoxStyle::Selection)?;
    }
    if let Some(vertex) = core.ui.hovered_vertex.and_then(|i| placed.object.vertex(i)) {
        let handle = BoundingBox::around(vertex, core.config.vertex_handle);
        renderer.draw_bbox(placed.world, &handle, BoxStyle::VertexHandle)?;
    }
    Ok(())
}
