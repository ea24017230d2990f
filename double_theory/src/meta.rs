//! Presentation metadata for theory types

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Preferred arrow style when drawing a morphism type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowStyle {
    Default,
    Double,
    Flat,
    Plus,
    Minus,
    Indeterminate,
}

/// Display metadata for one object or morphism type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Human-readable name shown in menus
    pub name: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keyboard shortcut, e.g. "O" or "Alt+M"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// Styling class for renderers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
    /// Arrow style for morphism types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_style: Option<ArrowStyle>,
}

impl TypeMeta {
    /// Creates metadata with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shortcut: None,
            display_class: None,
            arrow_style: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn with_display_class(mut self, class: impl Into<String>) -> Self {
        self.display_class = Some(class.into());
        self
    }

    pub fn with_arrow_style(mut self, style: ArrowStyle) -> Self {
        self.arrow_style = Some(style);
        self
    }
}
