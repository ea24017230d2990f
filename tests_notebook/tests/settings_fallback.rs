//! Settings Persistence and Fallback Tests
//!
//! Validates that broken or mistyped settings never stop the editor from
//! opening.

use double_theory::stdlib::default_library;
use notebook_settings::persistence::{load_from_path, save_to_path};
use notebook_settings::{keys, EditorConfig, SettingKey, SettingValue, SettingsRegistry};
use services_model_editor::ModelEditor;

/// Test: Overrides survive a save and load through a file
#[test]
fn test_overrides_persist_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut registry = SettingsRegistry::with_notebook_defaults();
    registry.set_override("alice", keys::ACTIVATE_NEW_CELLS, SettingValue::Boolean(false));
    registry.set_override(
        "alice",
        SettingKey::keybinding("Entity"),
        SettingValue::String("Alt+E".into()),
    );
    save_to_path(&registry, &path).unwrap();

    let mut restored = SettingsRegistry::with_notebook_defaults();
    load_from_path(&mut restored, &path).unwrap();
    let config = EditorConfig::from_registry(&restored, "alice");
    assert!(!config.activate_new_cells);
    assert_eq!(config.keybindings.get("Entity").map(String::as_str), Some("Alt+E"));

    let editor = ModelEditor::from_library(&default_library(), config).unwrap();
    let shortcut = editor.commands().get("Entity").and_then(|c| c.shortcut());
    assert_eq!(shortcut.map(|s| s.to_string()), Some("Alt+E".to_string()));
}

/// Test: A corrupt settings file falls back to defaults
#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, b"\x00\x01 definitely not json").unwrap();

    let mut registry = SettingsRegistry::with_notebook_defaults();
    registry.set_override("alice", keys::THEORY, SettingValue::String("reg-net".into()));
    load_from_path(&mut registry, &path).unwrap();

    assert_eq!(EditorConfig::from_registry(&registry, "alice"), EditorConfig::default());
}

/// Test: Values of the wrong type are ignored
#[test]
fn test_mistyped_values_use_defaults() {
    let mut registry = SettingsRegistry::with_notebook_defaults();
    registry.set_override("bob", keys::THEORY, SettingValue::Integer(3));
    registry.set_override("bob", keys::WARN_AMBIGUOUS_NAMES, SettingValue::String("no".into()));
    registry.set_override("bob", SettingKey::keybinding("Entity"), SettingValue::Boolean(true));

    let config = EditorConfig::from_registry(&registry, "bob");
    assert_eq!(config, EditorConfig::default());
    assert!(ModelEditor::from_library(&default_library(), config).is_ok());
}

/// Test: Ambiguity warnings follow the setting
#[test]
fn test_ambiguity_warnings_can_be_disabled() {
    let mut registry = SettingsRegistry::with_notebook_defaults();
    registry.set_override("quiet", keys::WARN_AMBIGUOUS_NAMES, SettingValue::Boolean(false));
    let config = EditorConfig::from_registry(&registry, "quiet");

    let mut editor = ModelEditor::from_library(&default_library(), config).unwrap();
    for _ in 0..2 {
        editor.run_command("Entity").unwrap();
        let id = editor.active_entity().unwrap();
        editor.rename(id, "Person").unwrap();
    }

    assert!(editor.name_index().is_ambiguous("Person"));
    assert!(editor.report().warnings.is_empty());
}
