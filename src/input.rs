//! Input model: modifier keys, editor keys, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture what the host's event layer reports.
//! `UiState` is what the renderer needs to know about the session (selection
//! and hover), and `InputState` is the vertex gesture in progress, if any.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{Axis, Point};
use crate::scene::ObjectId;

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
}

/// Keys the editor reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Zoom in.
    I,
    /// Zoom out.
    O,
    /// Pan right.
    E,
    /// Pan left.
    D,
    /// Pan up.
    C,
    /// Pan down.
    B,
    /// Remove the dragged vertex, or delete the selected object.
    R,
    Up,
    Down,
    Left,
    Right,
    /// Rotate counter-clockwise.
    F1,
    /// Rotate clockwise.
    F2,
    /// Scale up.
    F3,
    /// Scale down.
    F4,
    Escape,
    Control,
    /// A key with no editor binding, named as the host reports it.
    Other(String),
}

/// Camera command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Zoom by this many steps (positive = in).
    Zoom(f64),
    /// Pan along an axis by this many steps.
    Pan(Axis, f64),
}

impl Key {
    /// Camera command bound to this key, in units of the configured step.
    #[must_use]
    pub fn camera_command(&self) -> Option<CameraCommand> {
        match self {
            Self::I => Some(CameraCommand::Zoom(1.0)),
            Self::O => Some(CameraCommand::Zoom(-1.0)),
            Self::E => Some(CameraCommand::Pan(Axis::Horizontal, 1.0)),
            Self::D => Some(CameraCommand::Pan(Axis::Horizontal, -1.0)),
            Self::C => Some(CameraCommand::Pan(Axis::Vertical, 1.0)),
            Self::B => Some(CameraCommand::Pan(Axis::Vertical, -1.0)),
            _ => None,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiState {
    /// The id of the currently selected object, if any.
    pub selected_id: Option<ObjectId>,
    /// Index of the selected object's vertex under the pointer, if any.
    pub hovered_vertex: Option<usize>,
}

/// How a vertex drag started, which decides how it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexOrigin {
    /// An existing vertex picked up by clicking its handle; `Escape` puts it
    /// back here.
    Existing(Point),
    /// A freshly appended vertex following the pointer until the next click;
    /// releasing Ctrl drops it.
    Placing,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A vertex of `id` follows the pointer.
    DraggingVertex {
        id: ObjectId,
        index: usize,
        origin: VertexOrigin,
    },
}
