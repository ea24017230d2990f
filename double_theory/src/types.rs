//! Object and morphism type tokens

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Object type in a discrete double theory
///
/// Basic types are named generators of the theory. A tabulator type is
/// derived from a morphism type: its instances are morphisms of that type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum ObType {
    /// Named generating object type
    Basic(String),
    /// Tabulator of a morphism type
    Tabulator(Box<MorType>),
}

impl ObType {
    /// Creates a basic object type
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic(name.into())
    }

    /// Creates the tabulator of a morphism type
    pub fn tabulator(mor_type: MorType) -> Self {
        Self::Tabulator(Box::new(mor_type))
    }

    /// Name of a basic type, `None` for derived types
    pub fn as_basic(&self) -> Option<&str> {
        match self {
            Self::Basic(name) => Some(name.as_str()),
            Self::Tabulator(_) => None,
        }
    }
}

impl fmt::Display for ObType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(name) => write!(f, "{}", name),
            Self::Tabulator(m) => write!(f, "Tab({})", m),
        }
    }
}

/// Morphism type in a discrete double theory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum MorType {
    /// Named generating morphism type
    Basic(String),
    /// Hom type on an object type; source and target are both that type
    Hom(Box<ObType>),
}

impl MorType {
    /// Creates a basic morphism type
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic(name.into())
    }

    /// Creates the hom type on an object type
    pub fn hom(ob_type: ObType) -> Self {
        Self::Hom(Box::new(ob_type))
    }

    /// Name of a basic type, `None` for derived types
    pub fn as_basic(&self) -> Option<&str> {
        match self {
            Self::Basic(name) => Some(name.as_str()),
            Self::Hom(_) => None,
        }
    }
}

impl fmt::Display for MorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(name) => write!(f, "{}", name),
            Self::Hom(x) => write!(f, "Hom({})", x),
        }
    }
}

/// Either kind of type, used to key presentation metadata
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum TheoryType {
    ObType(ObType),
    MorType(MorType),
}

impl From<ObType> for TheoryType {
    fn from(x: ObType) -> Self {
        Self::ObType(x)
    }
}

impl From<MorType> for TheoryType {
    fn from(m: MorType) -> Self {
        Self::MorType(m)
    }
}

impl fmt::Display for TheoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObType(x) => write!(f, "{}", x),
            Self::MorType(m) => write!(f, "{}", m),
        }
    }
}
