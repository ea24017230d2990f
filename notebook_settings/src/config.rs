//! Typed editor configuration extracted from the registry

use crate::{keys, SettingKey, SettingValue, SettingsRegistry};
use std::collections::BTreeMap;

/// Settings the model editor reads at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub default_name: String,
    pub theory: String,
    pub activate_new_cells: bool,
    pub warn_ambiguous_names: bool,
    /// Shortcut overrides by constructor name, e.g. `"Entity" -> "Alt+E"`
    pub keybindings: BTreeMap<String, String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_name: "Untitled".to_string(),
            theory: "simple-schema".to_string(),
            activate_new_cells: true,
            warn_ambiguous_names: true,
            keybindings: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Reads the effective settings of a profile
    ///
    /// Missing keys and values of the wrong type keep the built-in default.
    pub fn from_registry(registry: &SettingsRegistry, profile: &str) -> Self {
        let mut config = Self::default();

        if let Some(name) = typed(registry, profile, keys::DEFAULT_NAME, SettingValue::as_string) {
            config.default_name = name.to_string();
        }
        if let Some(theory) = typed(registry, profile, keys::THEORY, SettingValue::as_string) {
            config.theory = theory.to_string();
        }
        if let Some(flag) =
            typed(registry, profile, keys::ACTIVATE_NEW_CELLS, SettingValue::as_boolean)
        {
            config.activate_new_cells = flag;
        }
        if let Some(flag) =
            typed(registry, profile, keys::WARN_AMBIGUOUS_NAMES, SettingValue::as_boolean)
        {
            config.warn_ambiguous_names = flag;
        }

        for (key, value) in registry.list_with_prefix(profile, keys::KEYBINDING_PREFIX) {
            let constructor = &key.as_str()[keys::KEYBINDING_PREFIX.len()..];
            match value.as_string() {
                Some(shortcut) if !constructor.is_empty() => {
                    config
                        .keybindings
                        .insert(constructor.to_string(), shortcut.to_string());
                }
                _ => tracing::warn!(%key, kind = value.kind(), "ignoring keybinding setting"),
            }
        }

        config
    }
}

fn typed<'a, V>(
    registry: &'a SettingsRegistry,
    profile: &str,
    key: &str,
    extract: impl Fn(&'a SettingValue) -> Option<V>,
) -> Option<V> {
    let value = registry.get(profile, &SettingKey::new(key))?;
    let typed = extract(value);
    if typed.is_none() {
        tracing::warn!(key, actual = value.kind(), "setting has wrong type, using default");
    }
    typed
}
