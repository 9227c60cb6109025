//! Unit tests for persisted settings.

use panelgrid::config::{ConfigError, Settings};
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.drag.max_scroll_velocity = 35.0;
    settings.import.delimiter = ';';
    settings.import.preview_rows = 50;
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"drag": {"scroll_interval_ms": 40}}"#).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.drag.scroll_interval_ms, 40);
    assert_eq!(loaded.drag.scroll_edge_threshold, 30.0);
    assert_eq!(loaded.import, Settings::default().import);
}

#[test]
fn test_malformed_and_missing_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    assert!(matches!(Settings::load_from(&path), Err(ConfigError::Io(_))));

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_import_settings_build_parse_config() {
    let mut settings = Settings::default();
    settings.import.has_header_row = false;
    settings.import.comments = String::new();

    let config = settings.import.parse_config();
    assert_eq!(config.preview, 10);
    assert!(!config.has_header_row);
    assert!(config.comments.is_empty());
    assert_eq!(config.newline, None);
}
