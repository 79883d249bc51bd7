//! Hit-testing against the scene forest.
//!
//! Two queries are offered. [`find_object_at`] is shallow: the first
//! top-level object whose bounding box contains the point wins.
//! [`find_object_at_segment`] descends into nested objects and classifies
//! each candidate with an even-odd crossing count along a probe segment,
//! then keeps the smallest candidate so that inner shapes beat the shapes
//! that enclose them.
//!
//! The probe's far end must lie outside every candidate; otherwise the
//! crossing parity is meaningless. [`far_point_is_clear`] checks that, and
//! the segment query logs a warning when it sees a candidate that encloses
//! the far point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use kurbo::Affine;
use tracing::{trace, warn};

use crate::camera::Point;
use crate::geom::{self, segments_intersect};
use crate::scene::{ObjectId, Placed, PolygonObject, Scene};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub object_id: ObjectId,
    /// The query point in the hit object's local space.
    pub local: Point,
}

/// First top-level object (insertion order) whose bounding box contains
/// `world_pt` once mapped into the object's local space. Children are not
/// considered.
#[must_use]
pub fn find_object_at(scene: &Scene, world_pt: Point) -> Option<Hit> {
    scene.roots().iter().find_map(|object| {
        let local = geom::apply(object.transform().inverse(), world_pt);
        object.contains(local).then_some(Hit { object_id: object.id(), local })
    })
}

/// Innermost object containing `world_pt`, judged by the parity of crossings
/// between the probe segment `world_pt → far_pt` and each candidate's edges.
///
/// Candidates come from the whole flattened forest and must first contain the
/// point in their local bounding box. Among candidates with an odd crossing
/// count, the one with the smallest world-space bounding-box area wins; the
/// earlier one in flatten order wins ties.
///
/// `far_pt` must lie outside every object in the scene.
#[must_use]
pub fn find_object_at_segment(scene: &Scene, world_pt: Point, far_pt: Point) -> Option<Hit> {
    if scene.is_empty() {
        return None;
    }
    let hit = scene
        .flatten()
        .into_iter()
        .filter_map(|placed| {
            let inverse = placed.world.inverse();
            let local = geom::apply(inverse, world_pt);
            placed.object.contains(local).then_some((placed, inverse, local))
        })
        .filter(|(placed, inverse, local)| {
            let far_local = geom::apply(*inverse, far_pt);
            if placed.object.contains(far_local) {
                warn!(object_id = %placed.object.id(), ?far_pt, "probe far point lies inside a candidate");
            }
            is_inside_by_parity(placed.object, *local, far_local)
        })
        .min_by(|(a, ..), (b, ..)| world_area(a).total_cmp(&world_area(b)))
        .map(|(placed, _, local)| Hit { object_id: placed.object.id(), local });
    trace!(?world_pt, ?far_pt, hit = ?hit.map(|h| h.object_id), "segment hit test");
    hit
}

/// Number of `object`'s ring edges crossed by the local-space segment `a → b`.
#[must_use]
pub fn crossing_count(object: &PolygonObject, a: Point, b: Point) -> usize {
    geom::ring_edges(object.vertices()).filter(|&(v0, v1)| segments_intersect(a, b, v0, v1)).count()
}

/// Even-odd classification of `local_pt` using a probe towards `local_far`.
#[must_use]
pub fn is_inside_by_parity(object: &PolygonObject, local_pt: Point, local_far: Point) -> bool {
    crossing_count(object, local_pt, local_far) % 2 == 1
}

/// Whether `far_pt` lies outside the world-space bounds of every object.
#[must_use]
pub fn far_point_is_clear(scene: &Scene, far_pt: Point) -> bool {
    scene
        .flatten()
        .iter()
        .all(|placed| placed.object.bbox().is_none_or(|bbox| !bbox.transformed(placed.world).contains(far_pt)))
}

fn world_area(placed: &Placed<'_>) -> f64 {
    placed.object.bbox().map_or(f64::INFINITY, |bbox| bbox.world_area(placed.world))
}

/// Map a world point into an object's local space given its world transform.
#[must_use]
pub fn to_local(world: Affine, world_pt: Point) -> Point {
    geom::apply(world.inverse(), world_pt)
}
