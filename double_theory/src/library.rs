//! Registry of named theories

use crate::{DiscreteTheory, MorType, ObType, TheorySchema};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable identifier of a theory, e.g. `simple-schema`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheoryId(String);

impl TheoryId {
    /// Creates a new theory ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TheoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TheoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A theory together with the information needed to offer it to users
#[derive(Debug, Clone)]
pub struct TheoryEntry {
    pub id: TheoryId,
    pub name: String,
    pub description: String,
    pub theory: DiscreteTheory,
}

impl TheoryEntry {
    /// Creates a new entry
    pub fn new(
        id: impl Into<TheoryId>,
        name: impl Into<String>,
        description: impl Into<String>,
        theory: DiscreteTheory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            theory,
        }
    }

    /// Index of an object type in the theory's presentation order
    ///
    /// Stable across sessions, so front ends may store it in place of the
    /// full type token.
    pub fn ob_type_index(&self, x: &ObType) -> Option<usize> {
        self.theory.ob_type_index(x)
    }

    /// Index of a morphism type in the theory's presentation order
    pub fn mor_type_index(&self, m: &MorType) -> Option<usize> {
        self.theory.mor_type_index(m)
    }

    pub fn only_free_models(&self) -> bool {
        self.theory.only_free_models()
    }
}

/// Library of theories keyed by ID
#[derive(Debug, Clone, Default)]
pub struct TheoryLibrary {
    entries: BTreeMap<TheoryId, Arc<TheoryEntry>>,
}

impl TheoryLibrary {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a theory, replacing any entry with the same ID
    ///
    /// Returns the replaced entry, if there was one.
    pub fn register(&mut self, entry: TheoryEntry) -> Option<Arc<TheoryEntry>> {
        self.entries.insert(entry.id.clone(), Arc::new(entry))
    }

    /// Looks up a theory by ID
    pub fn get(&self, id: &TheoryId) -> Option<Arc<TheoryEntry>> {
        self.entries.get(id).cloned()
    }

    pub fn contains(&self, id: &TheoryId) -> bool {
        self.entries.contains_key(id)
    }

    /// IDs of all registered theories, sorted
    pub fn ids(&self) -> Vec<TheoryId> {
        self.entries.keys().cloned().collect()
    }

    /// All registered theories, sorted by ID
    pub fn list(&self) -> Vec<Arc<TheoryEntry>> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
