#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_set() {
    let cfg = EditorConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.window, Edges::new(-400.0, 400.0, -400.0, 400.0));
    assert_eq!(cfg.steps.pan, 50.0);
    assert_eq!(cfg.steps.zoom, 50.0);
    assert_eq!(cfg.steps.translate, 20.0);
    assert_eq!(cfg.steps.rotate_deg, 5.0);
    assert_eq!(cfg.vertex_handle, 10.0);
}

#[test]
fn default_config_builds_default_camera() {
    let cam = EditorConfig::default().camera().unwrap();
    assert_eq!(cam, CameraWindow::default());
}

#[test]
fn parses_overrides() {
    let cfg = EditorConfig::from_lookup(lookup_from(&[
        (ENV_WINDOW, "-200, 200, -150, 150"),
        (ENV_INNER_LIMIT, "-50,50,-50,50"),
        (ENV_PAN_MODE, "World_Anchored"),
        (ENV_PAN_STEP, "25"),
        (ENV_ZOOM_STEP, " 12.5 "),
        (ENV_SCALE_UP, "1.5"),
    ]))
    .unwrap();
    assert_eq!(cfg.window, Edges::new(-200.0, 200.0, -150.0, 150.0));
    assert_eq!(cfg.inner_limit, Edges::new(-50.0, 50.0, -50.0, 50.0));
    assert_eq!(cfg.pan_mode, PanMode::WorldAnchored);
    assert_eq!(cfg.steps.pan, 25.0);
    assert_eq!(cfg.steps.zoom, 12.5);
    assert_eq!(cfg.steps.scale_up, 1.5);
    assert_eq!(cfg.steps.scale_down, 0.5);
    assert_eq!(cfg.camera().unwrap().pan_mode(), PanMode::WorldAnchored);
}

#[test]
fn rejects_bad_number() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_PAN_STEP, "fast")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: ENV_PAN_STEP, value: "fast".into() });
}

#[test]
fn rejects_edges_with_wrong_arity() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_WINDOW, "1,2,3")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEdges { var: ENV_WINDOW, .. }));
}

#[test]
fn rejects_edges_with_non_numbers() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_OUTER_LIMIT, "a,b,c,d")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEdges { var: ENV_OUTER_LIMIT, .. }));
}

#[test]
fn rejects_unknown_pan_mode() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_PAN_MODE, "sideways")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPanMode("sideways".into()));
}

#[test]
fn rejects_inconsistent_limits() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_INNER_LIMIT, "-500,500,-500,500")])).unwrap_err();
    assert!(matches!(err, ConfigError::Camera(CameraError::WindowOutOfBounds { .. })));
}

#[test]
fn error_messages_name_the_variable() {
    let err = EditorConfig::from_lookup(lookup_from(&[(ENV_ZOOM_STEP, "x")])).unwrap_err();
    assert!(err.to_string().contains(ENV_ZOOM_STEP));
}
