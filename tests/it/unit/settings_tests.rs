//! Unit tests for editor settings persistence.

use chartmark::constants::DEFAULT_HOVER_TOLERANCE_PX;
use chartmark::types::Appearance;
use chartmark::{EditorSettings, ShapeEditor, ShapeError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let settings = EditorSettings::default();
    assert!(settings.enabled);
    assert!(!settings.snap);
    assert_eq!(settings.hover_tolerance_px, DEFAULT_HOVER_TOLERANCE_PX);
    assert_eq!(settings.appearance.fill, "#8AAFE2");
    assert_eq!(settings.appearance.fill_opacity, 0.7);
    assert_eq!(settings.hover_text.text, "Click to select object");
    assert_eq!(settings.cursor.r, 4.0);
}

#[test]
fn test_partial_file_loads_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"snap": true}"#).unwrap();

    let settings = EditorSettings::load(&path).unwrap();
    assert!(settings.snap);
    assert!(settings.enabled);
    assert_eq!(settings.appearance, Appearance::default());
}

#[test]
fn test_partial_appearance_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"snap": true, "appearance": {"stroke": "navy"}}"#).unwrap();

    let err = EditorSettings::load(&path).unwrap_err();
    assert!(matches!(err, ShapeError::Json(_)));
    assert_eq!(EditorSettings::load_or_default(&path), EditorSettings::default());
}

#[test]
fn test_out_of_range_appearance_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut raw = EditorSettings::default();
    raw.snap = true;
    raw.appearance.stroke = "navy".to_string();
    raw.appearance.fill_opacity = 1.5;
    raw.save(&path).unwrap();

    let settings = EditorSettings::load(&path).unwrap();
    assert!(settings.snap);
    assert_eq!(settings.appearance, Appearance::default());

    let mut editor = ShapeEditor::default();
    editor.set_appearance(Appearance {
        stroke_width: -1.0,
        ..Appearance::default()
    });
    assert_eq!(editor.settings().appearance, Appearance::default());

    editor.set_appearance(Appearance {
        fill_opacity: f64::NAN,
        ..Appearance::default()
    });
    assert_eq!(editor.settings().appearance, Appearance::default());

    let valid = Appearance {
        fill_opacity: 1.0,
        ..Appearance::default()
    };
    editor.set_appearance(valid.clone());
    assert_eq!(editor.settings().appearance, valid);
}

#[test]
fn test_save_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("chartmark").join("settings.json");

    let mut settings = EditorSettings::default();
    settings.enabled = false;
    settings.hover_tolerance_px = 10.0;
    settings.save(&path).unwrap();

    assert_eq!(EditorSettings::load(&path).unwrap(), settings);
}

#[test]
fn test_load_or_default_tolerates_bad_files() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.json");
    assert_eq!(EditorSettings::load_or_default(&missing), EditorSettings::default());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(EditorSettings::load(&broken).is_err());
    assert_eq!(EditorSettings::load_or_default(&broken), EditorSettings::default());
}

#[test]
fn test_invalid_tolerance_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"hoverTolerancePx": -3}"#).unwrap();

    let settings = EditorSettings::load(&path).unwrap();
    assert_eq!(settings.hover_tolerance_px, DEFAULT_HOVER_TOLERANCE_PX);

    let mut raw = EditorSettings::default();
    raw.hover_tolerance_px = 0.0;
    let editor = ShapeEditor::new(raw);
    assert_eq!(editor.settings().hover_tolerance_px, DEFAULT_HOVER_TOLERANCE_PX);
}

#[test]
fn test_runtime_toggles() {
    let mut editor = ShapeEditor::default();
    assert!(editor.is_enabled());

    editor.set_enabled(false);
    editor.set_snap(true);
    assert!(!editor.is_enabled());
    assert!(editor.settings().snap);
}
