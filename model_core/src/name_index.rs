//! Resolution of object names to entity IDs

use crate::{IndexedMap, ModelJudgment};
use core_types::EntityId;

/// Result of resolving a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameResolution {
    /// First object with the name, in notebook order
    pub id: EntityId,
    /// Whether other objects share the name
    pub ambiguous: bool,
}

/// Snapshot index from object names to IDs
///
/// Only object judgments are indexed. Duplicate names are legal: lookup
/// returns the first match and the ambiguity can be queried. Unnamed
/// objects are indexed but never reported as ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    names: IndexedMap<EntityId, String>,
}

impl NameIndex {
    /// Builds an index over the object judgments, in order
    ///
    /// If an ID is declared twice, the first declaration wins.
    pub fn build<'a>(judgments: impl IntoIterator<Item = &'a ModelJudgment>) -> Self {
        let mut names = IndexedMap::default();
        for decl in judgments.into_iter().filter_map(ModelJudgment::as_object) {
            if !names.contains_key(&decl.id) {
                names.insert(decl.id, decl.name.clone());
            }
        }
        Self { names }
    }

    /// Name of an object
    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// First object with the given name
    pub fn lookup(&self, name: &str) -> Option<EntityId> {
        self.names.first_key(&name.to_string()).copied()
    }

    /// All objects with the given name, in notebook order
    pub fn lookup_all(&self, name: &str) -> &[EntityId] {
        self.names.keys_for(&name.to_string())
    }

    /// Looks up a name and reports whether it was ambiguous
    pub fn resolve(&self, name: &str) -> Option<NameResolution> {
        let ids = self.lookup_all(name);
        ids.first().map(|id| NameResolution {
            id: *id,
            ambiguous: ids.len() > 1,
        })
    }

    pub fn is_ambiguous(&self, name: &str) -> bool {
        !name.is_empty() && self.lookup_all(name).len() > 1
    }

    /// Names held by more than one object, sorted
    pub fn ambiguous_names(&self) -> Vec<(&str, &[EntityId])> {
        self.names
            .iter_reverse()
            .filter(|(name, ids)| !name.is_empty() && ids.len() > 1)
            .map(|(name, ids)| (name.as_str(), ids))
            .collect()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.names.contains_key(&id)
    }

    /// Number of indexed objects
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over (ID, name) pairs
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}
