//! Notebook cells

use core_types::CellId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form prose
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Kind of a cell, without its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellTag {
    RichText,
    Formal,
    Stem,
}

impl fmt::Display for CellTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellTag::RichText => write!(f, "rich-text"),
            CellTag::Formal => write!(f, "formal"),
            CellTag::Stem => write!(f, "stem"),
        }
    }
}

/// Content of a cell
///
/// A stem is a placeholder awaiting a choice of cell kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content", rename_all = "kebab-case")]
pub enum CellContent<T> {
    RichText(RichText),
    Formal(T),
    Stem,
}

impl<T> CellContent<T> {
    pub fn tag(&self) -> CellTag {
        match self {
            CellContent::RichText(_) => CellTag::RichText,
            CellContent::Formal(_) => CellTag::Formal,
            CellContent::Stem => CellTag::Stem,
        }
    }
}

/// A cell in a notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell<T> {
    pub id: CellId,
    pub content: CellContent<T>,
}

impl<T> Cell<T> {
    /// Creates a new cell with a fresh ID
    pub fn new(content: CellContent<T>) -> Self {
        Self {
            id: CellId::new(),
            content,
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        Self::new(CellContent::RichText(RichText::new(text)))
    }

    pub fn formal(content: T) -> Self {
        Self::new(CellContent::Formal(content))
    }

    pub fn stem() -> Self {
        Self::new(CellContent::Stem)
    }

    pub fn tag(&self) -> CellTag {
        self.content.tag()
    }

    pub fn is_stem(&self) -> bool {
        matches!(self.content, CellContent::Stem)
    }

    pub fn as_formal(&self) -> Option<&T> {
        match &self.content {
            CellContent::Formal(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_formal_mut(&mut self) -> Option<&mut T> {
        match &mut self.content {
            CellContent::Formal(content) => Some(content),
            _ => None,
        }
    }
}
