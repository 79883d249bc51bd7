//! Camera, viewport and hit-testing core for an interactive 2D polygon editor.
//!
//! The crate owns the parts of the editor that are pure math and state: a
//! clamped camera window driven by pan/zoom, the mapping from device pixels to
//! world coordinates through that window, and the parity-based hit tester that
//! resolves which nested, individually transformed polygon the user clicked.
//! Window creation, event wiring and draw submission live in the host; the
//! host talks to the crate through [`engine::Engine`] and implements
//! [`render::Renderer`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editing session ([`engine::EngineCore`]) and renderer-bound [`engine::Engine`] |
//! | [`scene`] | Polygon objects and the scene forest |
//! | [`camera`] | Clamped camera window, pan/zoom |
//! | [`viewport`] | Device pixel ↔ world coordinate mapping |
//! | [`hit`] | Shallow and segment-probe hit-testing |
//! | [`geom`] | Bounding boxes, affine helpers, segment intersection |
//! | [`input`] | Input event types and the gesture state |
//! | [`render`] | Renderer trait and the scene walk that feeds it |
//! | [`config`] | Editor configuration and environment overrides |
//! | [`consts`] | Default limits and step sizes |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod viewport;
