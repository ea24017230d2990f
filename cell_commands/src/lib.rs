//! # Cell Commands
//!
//! Registry of cell constructors offered to the user when adding cells.
//!
//! ## Philosophy
//!
//! - **Discoverability**: Every constructor is listed, searchable and may
//!   carry a keyboard shortcut
//! - **Context-aware**: What is offered depends on the active cell
//! - **Deterministic**: Placement of a new cell is a pure function of the
//!   cursor ([`plan_insertion`])
//!
//! ## Example
//!
//! ```
//! use cell_commands::{plan_insertion, CellConstructor, CommandRegistry, Insertion};
//! use notebook_core::{Cell, CellTag};
//!
//! let mut registry: CommandRegistry<u32> = CommandRegistry::new();
//! registry.register(CellConstructor::new("Text", CellTag::RichText, || {
//!     Cell::rich_text("")
//! }));
//! registry.register(CellConstructor::new("Stem", CellTag::Stem, Cell::stem));
//!
//! // A stem cannot be replaced by another stem
//! assert_eq!(registry.commands_for(Some(CellTag::Stem)).len(), 1);
//! assert_eq!(plan_insertion(Some(2), Some(CellTag::Stem), 5), Insertion::ReplaceStem(2));
//! ```

use input_types::{KeyCombo, KeyEvent};
use notebook_core::{Cell, CellTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Constructor metadata, independent of the content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// Human-readable name, unique within a registry
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<KeyCombo>,
    /// Tag of the cells it builds
    pub tag: CellTag,
    /// Search keywords
    pub keywords: Vec<String>,
    pub enabled: bool,
}

impl ConstructorDescriptor {
    /// Checks if this constructor matches the given query
    pub fn matches(&self, query: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
            || self.keywords.iter().any(|k| k.to_lowercase().contains(&query))
    }

    /// Calculates a relevance score for the given query (higher is better)
    pub fn relevance_score(&self, query: &str) -> u32 {
        if !self.enabled {
            return 0;
        }

        let query = query.to_lowercase();
        let name = self.name.to_lowercase();
        let mut score = 0u32;

        if name == query {
            score += 1000;
        } else if name.starts_with(&query) {
            score += 500;
        } else if name.contains(&query) {
            score += 100;
        }

        for keyword in &self.keywords {
            let keyword = keyword.to_lowercase();
            if keyword == query {
                score += 300;
            } else if keyword.starts_with(&query) {
                score += 150;
            } else if keyword.contains(&query) {
                score += 50;
            }
        }

        if self
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
        {
            score += 10;
        }

        score
    }
}

/// Builds a fresh cell each time it is called
pub type ConstructFn<T> = Box<dyn Fn() -> Cell<T>>;

/// A named way of making a new cell
pub struct CellConstructor<T> {
    descriptor: ConstructorDescriptor,
    construct: ConstructFn<T>,
}

impl<T> CellConstructor<T> {
    /// Creates a new constructor
    pub fn new(
        name: impl Into<String>,
        tag: CellTag,
        construct: impl Fn() -> Cell<T> + 'static,
    ) -> Self {
        Self {
            descriptor: ConstructorDescriptor {
                name: name.into(),
                description: None,
                shortcut: None,
                tag,
                keywords: Vec::new(),
                enabled: true,
            },
            construct: Box::new(construct),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.descriptor.description = Some(description.into());
        self
    }

    pub fn with_shortcut(mut self, shortcut: KeyCombo) -> Self {
        self.descriptor.shortcut = Some(shortcut);
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.descriptor.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Disables the constructor
    pub fn disabled(mut self) -> Self {
        self.descriptor.enabled = false;
        self
    }

    pub fn descriptor(&self) -> &ConstructorDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn tag(&self) -> CellTag {
        self.descriptor.tag
    }

    pub fn shortcut(&self) -> Option<KeyCombo> {
        self.descriptor.shortcut
    }

    /// Builds a new cell with a fresh ID
    pub fn construct(&self) -> Cell<T> {
        (self.construct)()
    }
}

impl<T> fmt::Debug for CellConstructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellConstructor")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Where a newly constructed cell goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insertion {
    /// Replace the stem at this position
    ReplaceStem(usize),
    /// Insert at this position
    InsertAt(usize),
}

impl Insertion {
    /// Position the new cell ends up at
    pub fn position(&self) -> usize {
        match self {
            Insertion::ReplaceStem(pos) | Insertion::InsertAt(pos) => *pos,
        }
    }
}

/// Chooses where a new cell goes given the active cell
///
/// A stem is replaced in place; any other active cell gets the new cell
/// below it; with nothing active the cell is appended.
pub fn plan_insertion(active: Option<usize>, active_tag: Option<CellTag>, len: usize) -> Insertion {
    match (active, active_tag) {
        (Some(i), Some(CellTag::Stem)) => Insertion::ReplaceStem(i),
        (Some(i), _) => Insertion::InsertAt((i + 1).min(len)),
        (None, _) => Insertion::InsertAt(len),
    }
}

/// Ordered registry of cell constructors
pub struct CommandRegistry<T> {
    constructors: Vec<CellConstructor<T>>,
}

impl<T> CommandRegistry<T> {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    /// Registers a constructor, replacing one with the same name
    pub fn register(&mut self, constructor: CellConstructor<T>) {
        match self.position(constructor.name()) {
            Some(pos) => self.constructors[pos] = constructor,
            None => self.constructors.push(constructor),
        }
    }

    /// Unregisters a constructor by name
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(pos) => {
                self.constructors.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellConstructor<T>> {
        self.position(name).map(|pos| &self.constructors[pos])
    }

    /// Rebinds the shortcut of a constructor
    pub fn set_shortcut(&mut self, name: &str, shortcut: Option<KeyCombo>) -> bool {
        match self.position(name) {
            Some(pos) => {
                self.constructors[pos].descriptor.shortcut = shortcut;
                true
            }
            None => false,
        }
    }

    /// Returns all registered constructor descriptors
    pub fn list(&self) -> Vec<&ConstructorDescriptor> {
        self.constructors.iter().map(CellConstructor::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Enabled constructors applicable with the given cell active
    ///
    /// Stem constructors are left out while a stem is active.
    pub fn commands_for(&self, active_tag: Option<CellTag>) -> Vec<&CellConstructor<T>> {
        self.constructors
            .iter()
            .filter(|c| c.descriptor.enabled)
            .filter(|c| !(active_tag == Some(CellTag::Stem) && c.tag() == CellTag::Stem))
            .collect()
    }

    /// Applicable constructor bound to a key event
    pub fn find_by_shortcut(
        &self,
        event: &KeyEvent,
        active_tag: Option<CellTag>,
    ) -> Option<&CellConstructor<T>> {
        self.commands_for(active_tag)
            .into_iter()
            .find(|c| c.shortcut().is_some_and(|combo| combo.matches(event)))
    }

    /// Filters constructors by query and returns them sorted by relevance
    pub fn filter(&self, query: &str) -> Vec<&CellConstructor<T>> {
        let mut matches: Vec<_> = self
            .constructors
            .iter()
            .filter(|c| c.descriptor.matches(query))
            .map(|c| (c.descriptor.relevance_score(query), c))
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.into_iter().map(|(_, c)| c).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.constructors.iter().position(|c| c.name() == name)
    }
}

impl<T> Default for CommandRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CommandRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list()).finish()
    }
}
