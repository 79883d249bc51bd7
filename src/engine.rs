//! Editing session: the state the editor's event handlers read and mutate.
//!
//! [`EngineCore`] owns the scene, the camera window, the selection and the
//! vertex gesture in progress. It has no host dependencies so every flow can
//! be driven from tests. [`Engine`] pairs it with a [`Renderer`] and keeps
//! the canvas size in step with the renderer before each pointer event.
//!
//! Handlers never fail. They return the [`Action`]s the host should react
//! to; an event that changes nothing returns an empty list.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::camera::{Axis, CameraWindow, Edges, Point};
use crate::config::{ConfigError, EditorConfig};
use crate::consts::PROBE_MARGIN;
use crate::hit::{self, Hit};
use crate::input::{CameraCommand, InputState, Key, Modifiers, UiState, VertexOrigin};
use crate::render::{self, Renderer};
use crate::scene::{ObjectId, PolygonObject, Scene};
use crate::viewport::{self, CanvasSize};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SelectionChanged(Option<ObjectId>),
    ObjectCreated { id: ObjectId, parent: Option<ObjectId> },
    ObjectUpdated { id: ObjectId },
    ObjectDeleted { id: ObjectId },
    CameraChanged(Edges),
}

/// Core engine state: all logic that doesn't depend on the renderer.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub scene: Scene,
    pub camera: CameraWindow,
    pub ui: UiState,
    pub input: InputState,
    pub canvas: CanvasSize,
    pub config: EditorConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            camera: CameraWindow::default(),
            ui: UiState::default(),
            input: InputState::default(),
            canvas: CanvasSize::default(),
            config: EditorConfig::default(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Camera`] if the configured camera bounds are
    /// inconsistent.
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        Ok(Self { camera: config.camera()?, config, ..Self::default() })
    }

    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    // --- Camera ---

    pub fn pan(&mut self, axis: Axis, amount: f64) {
        self.camera.pan(axis, amount);
    }

    /// Zoom the camera window; returns whether it applied.
    pub fn zoom(&mut self, amount: f64) -> bool {
        self.camera.zoom(amount)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&PolygonObject> {
        self.scene.get(id)
    }

    #[must_use]
    pub fn device_to_world(&self, device: Point) -> Point {
        viewport::device_to_world(device, self.canvas, &self.camera)
    }

    #[must_use]
    pub fn find_object_at(&self, world_pt: Point) -> Option<Hit> {
        hit::find_object_at(&self.scene, world_pt)
    }

    #[must_use]
    pub fn find_object_at_segment(&self, world_pt: Point, far_pt: Point) -> Option<Hit> {
        hit::find_object_at_segment(&self.scene, world_pt, far_pt)
    }

    /// Probe segment for a click at `device`: the click's world point and a
    /// far point on the same row that clears every object in the scene.
    ///
    /// The far point starts at the canvas's right edge and is pushed past the
    /// scene's world extent when geometry reaches beyond the visible area.
    #[must_use]
    pub fn probe_for(&self, device: Point) -> (Point, Point) {
        let near = self.device_to_world(device);
        let mut far = viewport::probe_far_point(device, self.canvas, &self.camera);
        if let Some(bounds) = self.scene.world_bounds() {
            far.x = far.x.max(bounds.max_x + PROBE_MARGIN);
        }
        (near, far)
    }

    /// Innermost object under a device pixel.
    #[must_use]
    pub fn pick(&self, device: Point) -> Option<Hit> {
        let (near, far) = self.probe_for(device);
        self.find_object_at_segment(near, far)
    }

    // --- Input events ---

    /// Handle a primary click at a device pixel.
    ///
    /// Precedence: Shift with a selection seeds a child polygon; a drag in
    /// progress is committed; a click on one of the selection's vertex
    /// handles picks that vertex up; Ctrl places a new vertex; anything else
    /// changes the selection.
    pub fn on_click(&mut self, device: Point, modifiers: Modifiers) -> Vec<Action> {
        let world = self.device_to_world(device);

        if modifiers.shift
            && let Some(parent) = self.ui.selected_id
        {
            return self.create_child(parent, world);
        }
        if let InputState::DraggingVertex { id, index, .. } = self.input {
            self.input = InputState::Idle;
            debug!(%id, index, "vertex drag committed");
            return vec![Action::ObjectUpdated { id }, Action::RenderNeeded];
        }
        if let Some(actions) = self.grab_vertex(world) {
            return actions;
        }
        if modifiers.ctrl {
            return self.place_vertex(world);
        }
        self.select_at(device)
    }

    /// Handle pointer motion: a dragged vertex follows the pointer, otherwise
    /// the hovered vertex handle of the selection is tracked.
    pub fn on_pointer_move(&mut self, device: Point) -> Vec<Action> {
        let world = self.device_to_world(device);

        if let InputState::DraggingVertex { id, index, .. } = self.input {
            let Some(local) = self.to_local(id, world) else {
                warn!(%id, "dragged object vanished");
                self.input = InputState::Idle;
                return Vec::new();
            };
            if let Some(object) = self.scene.get_mut(id)
                && let Err(err) = object.set_vertex(index, local)
            {
                warn!(%err, "dragged vertex vanished");
                self.input = InputState::Idle;
                return Vec::new();
            }
            return vec![Action::RenderNeeded];
        }

        let hovered = self.vertex_under(world).map(|(_, index)| index);
        if hovered == self.ui.hovered_vertex {
            return Vec::new();
        }
        self.ui.hovered_vertex = hovered;
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if let Some(command) = key.camera_command() {
            return self.camera_command(command);
        }

        let steps = self.config.steps;
        match key {
            Key::Escape => self.cancel_drag(),
            Key::R => self.remove(),
            Key::Up => self.edit_selected(|obj| obj.translate(0.0, steps.translate)),
            Key::Down => self.edit_selected(|obj| obj.translate(0.0, -steps.translate)),
            Key::Left => self.edit_selected(|obj| obj.translate(-steps.translate, 0.0)),
            Key::Right => self.edit_selected(|obj| obj.translate(steps.translate, 0.0)),
            Key::F1 => self.edit_selected(|obj| obj.rotate(steps.rotate_deg)),
            Key::F2 => self.edit_selected(|obj| obj.rotate(-steps.rotate_deg)),
            Key::F3 => self.edit_selected(|obj| obj.scale(steps.scale_up)),
            Key::F4 => self.edit_selected(|obj| obj.scale(steps.scale_down)),
            _ => Vec::new(),
        }
    }

    /// Releasing Ctrl drops a vertex that is still being placed.
    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        match (key, self.input) {
            (Key::Control, InputState::DraggingVertex { id, index, origin: VertexOrigin::Placing }) => {
                self.input = InputState::Idle;
                self.remove_vertex(id, index)
            }
            _ => Vec::new(),
        }
    }

    // --- Handlers ---

    fn camera_command(&mut self, command: CameraCommand) -> Vec<Action> {
        match command {
            CameraCommand::Zoom(steps) => {
                if !self.zoom(steps * self.config.steps.zoom) {
                    return Vec::new();
                }
            }
            CameraCommand::Pan(axis, steps) => self.pan(axis, steps * self.config.steps.pan),
        }
        vec![Action::CameraChanged(self.camera.edges()), Action::RenderNeeded]
    }

    fn create_child(&mut self, parent: ObjectId, world: Point) -> Vec<Action> {
        let Some(local) = self.to_local(parent, world) else {
            warn!(%parent, "selected object vanished");
            self.clear_selection();
            return Vec::new();
        };
        self.input = InputState::Idle;
        let child = PolygonObject::with_vertices(vec![local]);
        let id = match self.scene.add_child(parent, child) {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "child creation failed");
                return Vec::new();
            }
        };
        info!(%id, %parent, "child object created");
        self.ui.selected_id = Some(id);
        self.ui.hovered_vertex = None;
        vec![Action::ObjectCreated { id, parent: Some(parent) }, Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    fn grab_vertex(&mut self, world: Point) -> Option<Vec<Action>> {
        let (id, index) = self.vertex_under(world)?;
        let original = self.scene.get(id)?.vertex(index)?;
        debug!(%id, index, "vertex drag started");
        self.input = InputState::DraggingVertex { id, index, origin: VertexOrigin::Existing(original) };
        Some(vec![Action::RenderNeeded])
    }

    fn place_vertex(&mut self, world: Point) -> Vec<Action> {
        if let Some(id) = self.ui.selected_id {
            let local = self.to_local(id, world);
            if let (Some(local), Some(object)) = (local, self.scene.get_mut(id)) {
                let index = object.push_vertex(local);
                self.input = InputState::DraggingVertex { id, index, origin: VertexOrigin::Placing };
                return vec![Action::ObjectUpdated { id }, Action::RenderNeeded];
            }
            warn!(%id, "selected object vanished");
            self.clear_selection();
        }

        // The first vertex stays put; the second follows the pointer.
        let id = self.scene.add(PolygonObject::with_vertices(vec![world, world]));
        info!(%id, "object created");
        self.ui.selected_id = Some(id);
        self.ui.hovered_vertex = None;
        self.input = InputState::DraggingVertex { id, index: 1, origin: VertexOrigin::Placing };
        vec![Action::ObjectCreated { id, parent: None }, Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    fn select_at(&mut self, device: Point) -> Vec<Action> {
        let picked = self.pick(device).map(|hit| hit.object_id);
        if picked == self.ui.selected_id {
            return Vec::new();
        }
        info!(selected = ?picked, "selection changed");
        self.ui.selected_id = picked;
        self.ui.hovered_vertex = None;
        vec![Action::SelectionChanged(picked), Action::RenderNeeded]
    }

    fn cancel_drag(&mut self) -> Vec<Action> {
        let InputState::DraggingVertex { id, index, origin } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        match origin {
            VertexOrigin::Existing(original) => {
                let Some(object) = self.scene.get_mut(id) else {
                    return Vec::new();
                };
                if let Err(err) = object.set_vertex(index, original) {
                    warn!(%err, "vertex revert failed");
                    return Vec::new();
                }
                debug!(%id, index, "vertex drag reverted");
                vec![Action::ObjectUpdated { id }, Action::RenderNeeded]
            }
            VertexOrigin::Placing => self.remove_vertex(id, index),
        }
    }

    /// `R`: remove the vertex being dragged, else delete the selection.
    fn remove(&mut self) -> Vec<Action> {
        if let InputState::DraggingVertex { id, index, .. } = self.input {
            self.input = InputState::Idle;
            return self.remove_vertex(id, index);
        }
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        self.clear_selection();
        if self.scene.remove(id).is_none() {
            return vec![Action::SelectionChanged(None), Action::RenderNeeded];
        }
        info!(%id, "object deleted");
        vec![Action::ObjectDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    fn remove_vertex(&mut self, id: ObjectId, index: usize) -> Vec<Action> {
        let Some(object) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        if let Err(err) = object.remove_vertex(index) {
            warn!(%err, "vertex removal failed");
            return Vec::new();
        }
        self.ui.hovered_vertex = None;
        debug!(%id, index, "vertex removed");
        vec![Action::ObjectUpdated { id }, Action::RenderNeeded]
    }

    fn edit_selected(&mut self, edit: impl FnOnce(&mut PolygonObject)) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let Some(object) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        edit(object);
        vec![Action::ObjectUpdated { id }, Action::RenderNeeded]
    }

    // --- Helpers ---

    fn clear_selection(&mut self) {
        self.ui.selected_id = None;
        self.ui.hovered_vertex = None;
    }

    fn to_local(&self, id: ObjectId, world: Point) -> Option<Point> {
        self.scene.world_transform(id).map(|transform| hit::to_local(transform, world))
    }

    /// Selected object and the index of its vertex handle under `world`.
    fn vertex_under(&self, world: Point) -> Option<(ObjectId, usize)> {
        let id = self.ui.selected_id?;
        let local = self.to_local(id, world)?;
        let index = self.scene.get(id)?.vertex_index_at(local, self.config.vertex_handle)?;
        Some((id, index))
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the host renderer.
pub struct Engine<R> {
    renderer: R,
    pub core: EngineCore,
}

impl<R: Renderer> Engine<R> {
    /// Create a new engine drawing through `renderer`.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        let mut core = EngineCore::new();
        core.set_canvas_size(renderer.canvas_size());
        Self { renderer, core }
    }

    /// Create an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`EngineCore::with_config`].
    pub fn with_config(renderer: R, config: EditorConfig) -> Result<Self, ConfigError> {
        let mut core = EngineCore::with_config(config)?;
        core.set_canvas_size(renderer.canvas_size());
        Ok(Self { renderer, core })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Map a device pixel using the renderer's current canvas size.
    #[must_use]
    pub fn device_to_world(&self, device: Point) -> Point {
        viewport::device_to_world(device, self.renderer.canvas_size(), &self.core.camera)
    }

    // --- Input events ---

    pub fn on_click(&mut self, device: Point, modifiers: Modifiers) -> Vec<Action> {
        self.sync_canvas();
        self.core.on_click(device, modifiers)
    }

    pub fn on_pointer_move(&mut self, device: Point) -> Vec<Action> {
        self.sync_canvas();
        self.core.on_pointer_move(device)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state through the renderer.
    ///
    /// # Errors
    ///
    /// Returns the renderer's first error.
    pub fn render(&mut self) -> Result<(), R::Error> {
        render::draw(&mut self.renderer, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> &CameraWindow {
        &self.core.camera
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&PolygonObject> {
        self.core.object(id)
    }

    fn sync_canvas(&mut self) {
        self.core.set_canvas_size(self.renderer.canvas_size());
    }
}
