//! # Notebook Settings
//!
//! A typed, layered settings registry for the model notebook.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + per-profile overrides
//! - **Deterministic**: Settings are serializable and reproducible
//!
//! ## Features
//!
//! - Notebook, editor and validation defaults baked in ([`keys`])
//! - Per-profile overrides, persisted as versioned JSON ([`persistence`])
//! - Per-constructor keyboard shortcut overrides (`keybinding.<name>`)
//! - Typed view for the editor ([`EditorConfig`])
//!
//! ## Example
//!
//! ```
//! use notebook_settings::{keys, EditorConfig, SettingValue, SettingsRegistry};
//!
//! let mut registry = SettingsRegistry::with_notebook_defaults();
//! registry.set_override("work", keys::THEORY, SettingValue::String("reg-net".into()));
//!
//! assert_eq!(EditorConfig::from_registry(&registry, "work").theory, "reg-net");
//! assert_eq!(EditorConfig::from_registry(&registry, "home").theory, "simple-schema");
//! ```

pub mod config;
pub mod persistence;

pub use config::EditorConfig;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known setting keys
pub mod keys {
    /// Name given to new notebooks
    pub const DEFAULT_NAME: &str = "notebook.default_name";
    /// Theory used by new notebooks
    pub const THEORY: &str = "notebook.theory";
    /// Whether a newly inserted cell becomes active
    pub const ACTIVATE_NEW_CELLS: &str = "editor.activate_new_cells";
    /// Whether validation reports shared object names
    pub const WARN_AMBIGUOUS_NAMES: &str = "validation.warn_ambiguous_names";
    /// Prefix of per-constructor shortcut overrides
    pub const KEYBINDING_PREFIX: &str = "keybinding.";
}

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Shortcut override key for a constructor
    pub fn keybinding(constructor: &str) -> Self {
        Self(format!("{}{}", keys::KEYBINDING_PREFIX, constructor))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    StringList(Vec<String>),
}

impl SettingValue {
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            SettingValue::StringList(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::String(_) => "string",
            SettingValue::StringList(_) => "string list",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
            SettingValue::StringList(v) => write!(f, "{:?}", v),
        }
    }
}

/// Profile name, e.g. "default" or a user name
pub type ProfileId = String;

/// Overrides of one profile
pub type ProfileOverrides = BTreeMap<SettingKey, SettingValue>;

/// Settings registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Profile-specific overrides
    overrides: BTreeMap<ProfileId, ProfileOverrides>,
}

impl SettingsRegistry {
    /// Creates a new settings registry with no defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the notebook's built-in defaults
    pub fn with_notebook_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_default(keys::DEFAULT_NAME, SettingValue::String("Untitled".into()));
        registry.register_default(keys::THEORY, SettingValue::String("simple-schema".into()));
        registry.register_default(keys::ACTIVATE_NEW_CELLS, SettingValue::Boolean(true));
        registry.register_default(keys::WARN_AMBIGUOUS_NAMES, SettingValue::Boolean(true));
        registry
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets a profile-specific override
    pub fn set_override(
        &mut self,
        profile: impl Into<ProfileId>,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) {
        self.overrides
            .entry(profile.into())
            .or_default()
            .insert(key.into(), value);
    }

    /// Removes a profile-specific override, returning whether one existed
    pub fn remove_override(&mut self, profile: &str, key: &SettingKey) -> bool {
        self.overrides
            .get_mut(profile)
            .is_some_and(|settings| settings.remove(key).is_some())
    }

    /// Gets the effective setting value for a profile (override or default)
    pub fn get(&self, profile: &str, key: &SettingKey) -> Option<&SettingValue> {
        self.get_override(profile, key)
            .or_else(|| self.defaults.get(key))
    }

    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    pub fn get_override(&self, profile: &str, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides
            .get(profile)
            .and_then(|settings| settings.get(key))
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Effective settings under a prefix for a profile, sorted by key
    pub fn list_with_prefix(&self, profile: &str, prefix: &str) -> Vec<(SettingKey, SettingValue)> {
        let mut merged: BTreeMap<&SettingKey, &SettingValue> = self
            .defaults
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect();
        if let Some(settings) = self.overrides.get(profile) {
            merged.extend(settings.iter().filter(|(key, _)| key.starts_with(prefix)));
        }
        merged
            .into_iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Clears all overrides of a profile
    pub fn clear_overrides(&mut self, profile: &str) {
        self.overrides.remove(profile);
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<ProfileId, ProfileOverrides> {
        self.overrides.clone()
    }

    /// Imports overrides, replacing existing ones
    pub fn import_overrides(&mut self, overrides: BTreeMap<ProfileId, ProfileOverrides>) {
        self.overrides = overrides;
    }
}
