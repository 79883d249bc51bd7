//! Scene model: polygon objects and the forest that owns them.
//!
//! Every [`PolygonObject`] owns its children by value, so the scene is a
//! strict tree per top-level object and no object can have two parents.
//! Top-level objects keep insertion order, which the shallow hit query relies
//! on. Vertices are stored in the object's local space; the object's
//! transform maps local space into its parent's space, and accumulated
//! transforms map into world space (see [`Scene::flatten`]).

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use kurbo::Affine;
use uuid::Uuid;

use crate::camera::Point;
use crate::geom::{self, BoundingBox};

/// Unique identifier for a polygon object.
pub type ObjectId = Uuid;

/// Error returned by scene mutations that address a missing object or vertex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),
    #[error("vertex {index} out of range for object {id} with {len} vertices")]
    VertexOutOfRange { id: ObjectId, index: usize, len: usize },
}

/// A closed polygon with its own affine transform and nested children.
#[derive(Debug, Clone)]
pub struct PolygonObject {
    id: ObjectId,
    vertices: Vec<Point>,
    transform: Affine,
    bbox: Option<BoundingBox>,
    children: Vec<PolygonObject>,
}

impl Default for PolygonObject {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonObject {
    /// Create an empty polygon with a fresh id and identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), vertices: Vec::new(), transform: Affine::IDENTITY, bbox: None, children: Vec::new() }
    }

    /// Create a polygon from a vertex ring in local space.
    #[must_use]
    pub fn with_vertices(vertices: Vec<Point>) -> Self {
        let bbox = BoundingBox::from_points(&vertices);
        Self { vertices, bbox, ..Self::new() }
    }

    /// Replace the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Vertex ring in local space. The last vertex connects back to the first.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    #[must_use]
    pub fn last_vertex_index(&self) -> Option<usize> {
        self.vertices.len().checked_sub(1)
    }

    /// Local-to-parent transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    #[must_use]
    pub fn has_bbox(&self) -> bool {
        self.bbox.is_some()
    }

    /// Local-space bounding box; `None` until the first vertex exists.
    #[must_use]
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[PolygonObject] {
        &self.children
    }

    /// Whether a local-space point falls inside this object's bounding box.
    #[must_use]
    pub fn contains(&self, local: Point) -> bool {
        self.bbox.is_some_and(|bbox| bbox.contains(local))
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, local: Point) -> usize {
        self.vertices.push(local);
        self.refresh_bbox();
        self.vertices.len() - 1
    }

    /// Move an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::VertexOutOfRange`] if `index` is past the end.
    pub fn set_vertex(&mut self, index: usize, local: Point) -> Result<(), SceneError> {
        let len = self.vertices.len();
        let slot = self.vertices.get_mut(index).ok_or(SceneError::VertexOutOfRange { id: self.id, index, len })?;
        *slot = local;
        self.refresh_bbox();
        Ok(())
    }

    /// Remove a vertex, returning its position.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::VertexOutOfRange`] if `index` is past the end.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Point, SceneError> {
        let len = self.vertices.len();
        if index >= len {
            return Err(SceneError::VertexOutOfRange { id: self.id, index, len });
        }
        let removed = self.vertices.remove(index);
        self.refresh_bbox();
        Ok(removed)
    }

    /// Index of the first vertex whose square handle of half-size `half`
    /// contains the local-space point.
    #[must_use]
    pub fn vertex_index_at(&self, local: Point, half: f64) -> Option<usize> {
        self.vertices.iter().position(|v| BoundingBox::around(*v, half).contains(local))
    }

    /// Translate in the parent's space.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = Affine::translate((dx, dy)) * self.transform;
    }

    /// Rotate about the center of the local bounding box.
    pub fn rotate(&mut self, degrees: f64) {
        let pivot = self.pivot();
        self.transform = self.transform * geom::rotate_about(pivot, degrees);
    }

    /// Scale uniformly about the center of the local bounding box.
    pub fn scale(&mut self, factor: f64) {
        let pivot = self.pivot();
        self.transform = self.transform * geom::scale_about(pivot, factor);
    }

    /// Nest `child` under this object.
    pub fn add_child(&mut self, child: PolygonObject) -> ObjectId {
        let id = child.id;
        self.children.push(child);
        id
    }

    fn pivot(&self) -> Point {
        self.bbox.map_or_else(Point::default, |bbox| bbox.center())
    }

    fn refresh_bbox(&mut self) {
        self.bbox = BoundingBox::from_points(&self.vertices);
    }
}

/// An object paired with its accumulated local-to-world transform.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub object: &'a PolygonObject,
    pub world: Affine,
    /// Nesting depth; top-level objects are 0.
    pub depth: usize,
}

/// Insertion-ordered forest of polygon objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    roots: Vec<PolygonObject>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level object.
    pub fn add(&mut self, object: PolygonObject) -> ObjectId {
        let id = object.id;
        self.roots.push(object);
        id
    }

    /// Nest `child` under the object `parent`, wherever it sits in the forest.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotFound`] if `parent` is not in the scene.
    pub fn add_child(&mut self, parent: ObjectId, child: PolygonObject) -> Result<ObjectId, SceneError> {
        let parent = self.get_mut(parent).ok_or(SceneError::NotFound(parent))?;
        Ok(parent.add_child(child))
    }

    /// Remove an object (and its subtree) from anywhere in the forest.
    pub fn remove(&mut self, id: ObjectId) -> Option<PolygonObject> {
        remove_from(&mut self.roots, id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PolygonObject> {
        find(&self.roots, id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PolygonObject> {
        find_mut(&mut self.roots, id)
    }

    /// Accumulated local-to-world transform of an object.
    #[must_use]
    pub fn world_transform(&self, id: ObjectId) -> Option<Affine> {
        world_of(&self.roots, id, Affine::IDENTITY)
    }

    /// Top-level objects in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[PolygonObject] {
        &self.roots
    }

    /// Number of top-level objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first walk of the whole forest, parents before children, each
    /// object paired with its accumulated transform.
    ///
    /// Computed fresh on every call so it can never go stale after an edit.
    #[must_use]
    pub fn flatten(&self) -> Vec<Placed<'_>> {
        let mut out = Vec::new();
        let mut stack: Vec<Placed<'_>> =
            self.roots.iter().rev().map(|object| Placed { object, world: object.transform, depth: 0 }).collect();
        while let Some(placed) = stack.pop() {
            stack.extend(placed.object.children.iter().rev().map(|child| Placed {
                object: child,
                world: placed.world * child.transform,
                depth: placed.depth + 1,
            }));
            out.push(placed);
        }
        out
    }

    /// World-space bounds of every object that has geometry.
    #[must_use]
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        self.flatten()
            .iter()
            .filter_map(|p| p.object.bbox().map(|bbox| bbox.transformed(p.world)))
            .reduce(|acc, bbox| acc.union(&bbox))
    }
}

fn find(list: &[PolygonObject], id: ObjectId) -> Option<&PolygonObject> {
    list.iter().find_map(|obj| if obj.id == id { Some(obj) } else { find(&obj.children, id) })
}

fn find_mut(list: &mut [PolygonObject], id: ObjectId) -> Option<&mut PolygonObject> {
    for obj in list {
        if obj.id == id {
            return Some(obj);
        }
        if let Some(found) = find_mut(&mut obj.children, id) {
            return Some(found);
        }
    }
    None
}

fn remove_from(list: &mut Vec<PolygonObject>, id: ObjectId) -> Option<PolygonObject> {
    if let Some(pos) = list.iter().position(|obj| obj.id == id) {
        return Some(list.remove(pos));
    }
    list.iter_mut().find_map(|obj| remove_from(&mut obj.children, id))
}

fn world_of(list: &[PolygonObject], id: ObjectId, parent: Affine) -> Option<Affine> {
    list.iter().find_map(|obj| {
        let world = parent * obj.transform;
        if obj.id == id { Some(world) } else { world_of(&obj.children, id, world) }
    })
}
