//! Editor configuration: camera bounds and step sizes, with environment
//! overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::camera::{CameraError, CameraWindow, Edges, PanMode};
use crate::consts::{
    DEFAULT_INNER_LIMIT, DEFAULT_OUTER_LIMIT, DEFAULT_PAN_STEP, DEFAULT_ROTATE_STEP_DEG, DEFAULT_SCALE_DOWN,
    DEFAULT_SCALE_UP, DEFAULT_TRANSLATE_STEP, DEFAULT_WINDOW, DEFAULT_ZOOM_STEP, VERTEX_HANDLE_HALF_SIZE,
};

pub const ENV_WINDOW: &str = "POLYEDIT_WINDOW";
pub const ENV_OUTER_LIMIT: &str = "POLYEDIT_OUTER_LIMIT";
pub const ENV_INNER_LIMIT: &str = "POLYEDIT_INNER_LIMIT";
pub const ENV_PAN_MODE: &str = "POLYEDIT_PAN_MODE";
pub const ENV_PAN_STEP: &str = "POLYEDIT_PAN_STEP";
pub const ENV_ZOOM_STEP: &str = "POLYEDIT_ZOOM_STEP";
pub const ENV_TRANSLATE_STEP: &str = "POLYEDIT_TRANSLATE_STEP";
pub const ENV_ROTATE_STEP_DEG: &str = "POLYEDIT_ROTATE_STEP_DEG";
pub const ENV_SCALE_UP: &str = "POLYEDIT_SCALE_UP";
pub const ENV_SCALE_DOWN: &str = "POLYEDIT_SCALE_DOWN";
pub const ENV_VERTEX_HANDLE: &str = "POLYEDIT_VERTEX_HANDLE";

/// Error returned when configuration values cannot be parsed or are inconsistent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be four comma-separated numbers min_x,max_x,min_y,max_y, got {value:?}")]
    InvalidEdges { var: &'static str, value: String },
    #[error("POLYEDIT_PAN_MODE must be move_envelope or world_anchored, got {0:?}")]
    InvalidPanMode(String),
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Per-keypress step sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    /// World units per pan key.
    pub pan: f64,
    /// World units per edge per zoom key.
    pub zoom: f64,
    /// World units per arrow key.
    pub translate: f64,
    /// Degrees per rotate key.
    pub rotate_deg: f64,
    pub scale_up: f64,
    pub scale_down: f64,
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            pan: DEFAULT_PAN_STEP,
            zoom: DEFAULT_ZOOM_STEP,
            translate: DEFAULT_TRANSLATE_STEP,
            rotate_deg: DEFAULT_ROTATE_STEP_DEG,
            scale_up: DEFAULT_SCALE_UP,
            scale_down: DEFAULT_SCALE_DOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub window: Edges,
    pub outer_limit: Edges,
    pub inner_limit: Edges,
    pub pan_mode: PanMode,
    pub steps: Steps,
    /// Half-size of vertex handles, in local units.
    pub vertex_handle: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            outer_limit: DEFAULT_OUTER_LIMIT,
            inner_limit: DEFAULT_INNER_LIMIT,
            pan_mode: PanMode::default(),
            steps: Steps::default(),
            vertex_handle: VERTEX_HANDLE_HALF_SIZE,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// All optional; defaults apply when absent:
    /// - `POLYEDIT_WINDOW`, `POLYEDIT_OUTER_LIMIT`, `POLYEDIT_INNER_LIMIT`:
    ///   `min_x,max_x,min_y,max_y`
    /// - `POLYEDIT_PAN_MODE`: `move_envelope` (default) or `world_anchored`
    /// - `POLYEDIT_PAN_STEP`, `POLYEDIT_ZOOM_STEP`, `POLYEDIT_TRANSLATE_STEP`,
    ///   `POLYEDIT_ROTATE_STEP_DEG`, `POLYEDIT_SCALE_UP`, `POLYEDIT_SCALE_DOWN`,
    ///   `POLYEDIT_VERTEX_HANDLE`: numbers
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable values or camera bounds that
    /// violate the limit invariant.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`EditorConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let edges = |var: &'static str, default: Edges| lookup(var).map_or(Ok(default), |v| parse_edges(var, &v));
        let number = |var: &'static str, default: f64| lookup(var).map_or(Ok(default), |v| parse_number(var, &v));

        let config = Self {
            window: edges(ENV_WINDOW, defaults.window)?,
            outer_limit: edges(ENV_OUTER_LIMIT, defaults.outer_limit)?,
            inner_limit: edges(ENV_INNER_LIMIT, defaults.inner_limit)?,
            pan_mode: lookup(ENV_PAN_MODE).map_or(Ok(defaults.pan_mode), |v| parse_pan_mode(&v))?,
            steps: Steps {
                pan: number(ENV_PAN_STEP, defaults.steps.pan)?,
                zoom: number(ENV_ZOOM_STEP, defaults.steps.zoom)?,
                translate: number(ENV_TRANSLATE_STEP, defaults.steps.translate)?,
                rotate_deg: number(ENV_ROTATE_STEP_DEG, defaults.steps.rotate_deg)?,
                scale_up: number(ENV_SCALE_UP, defaults.steps.scale_up)?,
                scale_down: number(ENV_SCALE_DOWN, defaults.steps.scale_down)?,
            },
            vertex_handle: number(ENV_VERTEX_HANDLE, defaults.vertex_handle)?,
        };
        config.camera()?;
        Ok(config)
    }

    /// Build the camera window this config describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Camera`] if the bounds violate the limit invariant.
    pub fn camera(&self) -> Result<CameraWindow, ConfigError> {
        Ok(CameraWindow::new(self.window, self.outer_limit, self.inner_limit)?.with_pan_mode(self.pan_mode))
    }
}

fn parse_number(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidNumber { var, value: raw.to_string() })
}

fn parse_edges(var: &'static str, raw: &str) -> Result<Edges, ConfigError> {
    let invalid = || ConfigError::InvalidEdges { var, value: raw.to_string() };
    let parts = raw.split(',').map(|p| p.trim().parse::<f64>()).collect::<Result<Vec<_>, _>>().map_err(|_| invalid())?;
    match parts.as_slice() {
        [min_x, max_x, min_y, max_y] => Ok(Edges::new(*min_x, *max_x, *min_y, *max_y)),
        _ => Err(invalid()),
    }
}

fn parse_pan_mode(raw: &str) -> Result<PanMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "move_envelope" => Ok(PanMode::MoveEnvelope),
        "world_anchored" => Ok(PanMode::WorldAnchored),
        other => Err(ConfigError::InvalidPanMode(other.to_string())),
    }
}
