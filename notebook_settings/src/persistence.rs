//! Settings persistence layer
//!
//! Overrides are stored as versioned JSON. Loading is safe against
//! corruption: [`load_overrides_safe`] falls back to empty overrides.

use crate::{ProfileId, ProfileOverrides, SettingKey, SettingValue, SettingsRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Serializable container for settings overrides
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format
    pub version: u32,
    pub profiles: BTreeMap<ProfileId, BTreeMap<String, SettingValue>>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates a new empty settings data
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            profiles: BTreeMap::new(),
        }
    }

    /// Creates settings data from registry overrides
    pub fn from_overrides(overrides: &BTreeMap<ProfileId, ProfileOverrides>) -> Self {
        let profiles = overrides
            .iter()
            .map(|(profile, settings)| {
                let settings = settings
                    .iter()
                    .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                    .collect();
                (profile.clone(), settings)
            })
            .collect();
        Self {
            version: Self::CURRENT_VERSION,
            profiles,
        }
    }

    /// Converts settings data to registry overrides
    pub fn to_overrides(&self) -> BTreeMap<ProfileId, ProfileOverrides> {
        self.profiles
            .iter()
            .map(|(profile, settings)| {
                let settings = settings
                    .iter()
                    .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
                    .collect();
                (profile.clone(), settings)
            })
            .collect()
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings file error: {0}")]
    Io(String),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data)
        .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load settings from bytes, falling back to defaults on error
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_else(|err| {
        tracing::warn!(%err, "discarding unreadable settings");
        SettingsOverridesData::new()
    })
}

/// Writes the registry's overrides to a file
pub fn save_to_path(registry: &SettingsRegistry, path: &Path) -> PersistenceResult<()> {
    let data = SettingsOverridesData::from_overrides(&registry.export_overrides());
    let bytes = serialize_overrides(&data)?;
    fs::write(path, bytes).map_err(|e| PersistenceError::Io(e.to_string()))
}

/// Replaces the registry's overrides with those stored in a file
///
/// A missing file counts as no overrides. Corrupt content is discarded.
pub fn load_from_path(registry: &mut SettingsRegistry, path: &Path) -> PersistenceResult<()> {
    let data = match fs::read(path) {
        Ok(bytes) => load_overrides_safe(&bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsOverridesData::new(),
        Err(e) => return Err(PersistenceError::Io(e.to_string())),
    };
    registry.import_overrides(data.to_overrides());
    Ok(())
}
