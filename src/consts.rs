//! Shared numeric constants for the editor core.

use crate::camera::Edges;

// ── Camera ──────────────────────────────────────────────────────

/// Window the camera opens with.
pub const DEFAULT_WINDOW: Edges = Edges::new(-400.0, 400.0, -400.0, 400.0);

/// Furthest the window may zoom out to.
pub const DEFAULT_OUTER_LIMIT: Edges = Edges::new(-5000.0, 5000.0, -5000.0, 5000.0);

/// Closest the window may zoom in to.
pub const DEFAULT_INNER_LIMIT: Edges = Edges::new(-100.0, 100.0, -100.0, 100.0);

/// World units moved per pan key press.
pub const DEFAULT_PAN_STEP: f64 = 50.0;

/// World units each edge moves per zoom key press.
pub const DEFAULT_ZOOM_STEP: f64 = 50.0;

// ── Object transforms ───────────────────────────────────────────

/// World units moved per arrow key press.
pub const DEFAULT_TRANSLATE_STEP: f64 = 20.0;

/// Degrees rotated per rotate key press.
pub const DEFAULT_ROTATE_STEP_DEG: f64 = 5.0;

/// Scale factor applied by the scale-up key.
pub const DEFAULT_SCALE_UP: f64 = 2.0;

/// Scale factor applied by the scale-down key.
pub const DEFAULT_SCALE_DOWN: f64 = 0.5;

// ── Hit-testing ─────────────────────────────────────────────────

/// Half-size of the square handle around each vertex, in local units.
pub const VERTEX_HANDLE_HALF_SIZE: f64 = 10.0;

/// Distance the probe far point is pushed past the scene's world extent.
pub const PROBE_MARGIN: f64 = 1.0;
