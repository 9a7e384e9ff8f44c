//! Integration tests for Settings layered loading.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise local config and environment overrides on top of the defaults.
//! Environment variables are process-wide: each test asserts only on fields
//! no other test in this file overrides through the environment.

use std::fs;

use tempfile::TempDir;

use texttree::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.style.branch, "├── ");
    assert_eq!(settings.max_depth, None);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
max_depth = 4

[style]
branch = "+-- "
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.max_depth, Some(4));
    assert_eq!(settings.style.branch, "+-- ");
    assert_eq!(settings.style.continuation, "│   ");
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "max_depth = \"lots\"").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error"));
    assert!(err.to_string().contains(".texttree.toml"));
}

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "truncation_marker = \"(local)\"\n[style]\nlast = \"L \"\n",
    )
    .unwrap();
    std::env::set_var("TEXTTREE_TRUNCATION_MARKER", "(env)");
    std::env::set_var("TEXTTREE_STYLE__LAST", "E~");

    // Act
    let result = Settings::load(Some(dir.path()));
    std::env::remove_var("TEXTTREE_TRUNCATION_MARKER");
    std::env::remove_var("TEXTTREE_STYLE__LAST");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.truncation_marker, "(env)");
    assert_eq!(settings.style.last, "E~");
}

#[test]
fn given_effective_settings_when_shown_then_toml_lists_style_table() {
    let text = Settings::default().to_toml().unwrap();

    assert!(text.contains("[style]"));
    assert!(text.contains("truncation_marker"));
    assert!(!text.contains("max_depth"));
}
