//! Clamped camera window over the world plane.
//!
//! The camera is an axis-aligned rectangle in world space (`Edges`) bounded by
//! two envelopes of the same shape: the outer limit caps how far the window
//! may grow (zoom out) and the inner limit caps how far it may shrink (zoom
//! in). Zoom is checked per edge and applied all-or-nothing; pan moves the
//! window and, under the default [`PanMode`], the envelopes with it.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_INNER_LIMIT, DEFAULT_OUTER_LIMIT, DEFAULT_WINDOW};

/// A point in either device or world space.
///
/// The same type carries device pixels (origin top-left, y down) and world
/// coordinates (y up). Callers track which space a value is in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Logical pan axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the four edges of an [`Edges`] rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

impl Side {
    const ALL: [Self; 4] = [Self::MinX, Self::MaxX, Self::MinY, Self::MaxY];

    /// `+1` for left/bottom edges, `-1` for right/top edges. Multiplying an
    /// edge value or delta by this makes "shrinking" always positive.
    fn inward(self) -> f64 {
        match self {
            Self::MinX | Self::MinY => 1.0,
            Self::MaxX | Self::MaxY => -1.0,
        }
    }
}

/// Four scalar edges of an axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Edges {
    #[must_use]
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Returns `true` if `other` lies inside `self` on every edge (inclusive).
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.min_x <= other.min_x && other.max_x <= self.max_x && self.min_y <= other.min_y && other.max_y <= self.max_y
    }

    fn get(&self, side: Side) -> f64 {
        match side {
            Side::MinX => self.min_x,
            Side::MaxX => self.max_x,
            Side::MinY => self.min_y,
            Side::MaxY => self.max_y,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut f64 {
        match side {
            Side::MinX => &mut self.min_x,
            Side::MaxX => &mut self.max_x,
            Side::MinY => &mut self.min_y,
            Side::MaxY => &mut self.max_y,
        }
    }

    fn shift(&mut self, axis: Axis, amount: f64) {
        match axis {
            Axis::Horizontal => {
                self.min_x += amount;
                self.max_x += amount;
            }
            Axis::Vertical => {
                self.min_y += amount;
                self.max_y += amount;
            }
        }
    }
}

/// What a pan moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanMode {
    /// The window and both limit envelopes move together, so zoom limits stay
    /// relative to wherever the user panned to.
    #[default]
    MoveEnvelope,
    /// Only the window moves; limits stay anchored in world coordinates.
    WorldAnchored,
}

/// Error returned when constructing a [`CameraWindow`] with inconsistent bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("inner limit {inner:?} is not enclosed by outer limit {outer:?}")]
    InnerOutsideOuter { inner: Edges, outer: Edges },
    #[error("window {window:?} does not lie between the inner and outer limits")]
    WindowOutOfBounds { window: Edges },
}

/// Current visible window plus its zoom envelopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraWindow {
    window: Edges,
    outer: Edges,
    inner: Edges,
    pan_mode: PanMode,
}

impl Default for CameraWindow {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, outer: DEFAULT_OUTER_LIMIT, inner: DEFAULT_INNER_LIMIT, pan_mode: PanMode::default() }
    }
}

impl CameraWindow {
    /// Build a camera from an initial window and its limits.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InnerOutsideOuter`] if `inner` is not enclosed by
    /// `outer`, and [`CameraError::WindowOutOfBounds`] if `window` does not lie
    /// between the two.
    pub fn new(window: Edges, outer: Edges, inner: Edges) -> Result<Self, CameraError> {
        if !outer.encloses(&inner) {
            return Err(CameraError::InnerOutsideOuter { inner, outer });
        }
        if !outer.encloses(&window) || !window.encloses(&inner) {
            return Err(CameraError::WindowOutOfBounds { window });
        }
        Ok(Self { window, outer, inner, pan_mode: PanMode::default() })
    }

    /// Build a camera from an initial window using the default limits.
    ///
    /// # Errors
    ///
    /// Same as [`CameraWindow::new`].
    pub fn with_window(window: Edges) -> Result<Self, CameraError> {
        Self::new(window, DEFAULT_OUTER_LIMIT, DEFAULT_INNER_LIMIT)
    }

    /// Replace the pan policy.
    #[must_use]
    pub fn with_pan_mode(mut self, pan_mode: PanMode) -> Self {
        self.pan_mode = pan_mode;
        self
    }

    /// Current window edges, for the renderer's orthographic projection.
    #[must_use]
    pub fn edges(&self) -> Edges {
        self.window
    }

    #[must_use]
    pub fn outer_limit(&self) -> Edges {
        self.outer
    }

    #[must_use]
    pub fn inner_limit(&self) -> Edges {
        self.inner
    }

    #[must_use]
    pub fn pan_mode(&self) -> PanMode {
        self.pan_mode
    }

    /// Half of the current window's horizontal span.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.window.width() * 0.5
    }

    /// Half of the current window's vertical span.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.window.height() * 0.5
    }

    /// Shift both edges of `axis` by `amount`. Never fails.
    pub fn pan(&mut self, axis: Axis, amount: f64) {
        match self.pan_mode {
            PanMode::MoveEnvelope => {
                self.window.shift(axis, amount);
                self.outer.shift(axis, amount);
                self.inner.shift(axis, amount);
            }
            PanMode::WorldAnchored => self.window.shift(axis, amount),
        }
    }

    /// Move all four edges toward the center by `amount` (away from it when
    /// negative).
    ///
    /// Every edge is checked before any is written; if one would cross its
    /// limit the window is left untouched. Returns whether the zoom applied.
    pub fn zoom(&mut self, amount: f64) -> bool {
        let admissible = Side::ALL.iter().all(|&side| self.can_move(side, amount * side.inward()));
        if !admissible {
            debug!(amount, window = ?self.window, "zoom rejected at camera limit");
            return false;
        }
        for side in Side::ALL {
            *self.window.get_mut(side) += amount * side.inward();
        }
        true
    }

    /// Whether moving `side` by `delta` keeps it inside its envelope.
    ///
    /// Only the limit in the direction of travel is consulted, so a window
    /// that a world-anchored pan carried outside its limits can still be
    /// zoomed back toward them.
    fn can_move(&self, side: Side, delta: f64) -> bool {
        let dir = side.inward();
        let inward_delta = delta * dir;
        let target = (self.window.get(side) + delta) * dir;
        if inward_delta > 0.0 {
            target <= self.inner.get(side) * dir
        } else if inward_delta < 0.0 {
            target >= self.outer.get(side) * dir
        } else {
            true
        }
    }
}
