//! Geometry helpers: local-space bounding boxes, affine point mapping, and
//! the closed-segment intersection test used by the parity hit test.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::cmp::Ordering;

use kurbo::Affine;

use crate::camera::Point;

/// Axis-aligned bounding box in the owning object's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Square box of half-size `half` centered on `center`.
    #[must_use]
    pub fn around(center: Point, half: f64) -> Self {
        Self::new(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in rest {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    /// Area of this box after mapping through `transform`.
    ///
    /// An affine map scales every area by `|det|`, so boxes owned by
    /// differently transformed objects compare in a common space.
    #[must_use]
    pub fn world_area(&self, transform: Affine) -> f64 {
        self.area() * transform.determinant().abs()
    }

    /// Ordering used for the smallest-box tie-break.
    #[must_use]
    pub fn cmp_area(&self, other: &Self) -> Ordering {
        self.area().total_cmp(&other.area())
    }

    /// The four corners, counter-clockwise from `(min_x, min_y)`.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Axis-aligned bounds of this box after mapping through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: Affine) -> Self {
        let corners = self.corners().map(|c| apply(transform, c));
        let mut bbox = Self::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for c in &corners[1..] {
            bbox.min_x = bbox.min_x.min(c.x);
            bbox.min_y = bbox.min_y.min(c.y);
            bbox.max_x = bbox.max_x.max(c.x);
            bbox.max_y = bbox.max_y.max(c.y);
        }
        bbox
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Map `p` through `transform`.
#[must_use]
pub fn apply(transform: Affine, p: Point) -> Point {
    (transform * kurbo::Point::from(p)).into()
}

/// Rotation by `degrees` about `pivot`.
#[must_use]
pub fn rotate_about(pivot: Point, degrees: f64) -> Affine {
    let c = kurbo::Vec2::new(pivot.x, pivot.y);
    Affine::translate(c) * Affine::rotate(degrees.to_radians()) * Affine::translate(-c)
}

/// Uniform scale by `factor` about `pivot`.
#[must_use]
pub fn scale_about(pivot: Point, factor: f64) -> Affine {
    let c = kurbo::Vec2::new(pivot.x, pivot.y);
    Affine::translate(c) * Affine::scale(factor) * Affine::translate(-c)
}

/// Side of `p` relative to the directed segment `a → b`.
///
/// `1` counter-clockwise, `-1` clockwise. Collinear points return `0` when
/// they lie on the segment and `±1` when they lie on its extension beyond
/// either end, so that collinear overlap counts as an intersection and mere
/// collinear alignment does not.
fn relative_ccw(a: Point, b: Point, p: Point) -> i32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (mut px, mut py) = (p.x - a.x, p.y - a.y);
    let mut ccw = px * dy - py * dx;
    if ccw.partial_cmp(&0.0) == Some(Ordering::Equal) {
        // Collinear: project onto the segment.
        ccw = px * dx + py * dy;
        if ccw > 0.0 {
            px -= dx;
            py -= dy;
            ccw = px * dx + py * dy;
            if ccw < 0.0 {
                ccw = 0.0;
            }
        }
    }
    match ccw.partial_cmp(&0.0) {
        Some(Ordering::Less) => -1,
        Some(Ordering::Greater) => 1,
        _ => 0,
    }
}

/// Whether the closed segments `a1–a2` and `b1–b2` share at least one point.
///
/// Touching endpoints and collinear overlap both count.
#[must_use]
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    relative_ccw(a1, a2, b1) * relative_ccw(a1, a2, b2) <= 0 && relative_ccw(b1, b2, a1) * relative_ccw(b1, b2, a2) <= 0
}

/// Iterate the edges of a closed ring, wrapping the last vertex to the first.
pub fn ring_edges(vertices: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}
