//! Object and morphism declarations

use core_types::EntityId;
use double_theory::{MorType, ObType};
use serde::{Deserialize, Serialize};

/// Declaration of an object of a given type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDecl {
    pub id: EntityId,
    pub name: String,
    pub ob_type: ObType,
}

impl ObjectDecl {
    /// Creates a new object declaration with a fresh ID
    pub fn new(name: impl Into<String>, ob_type: ObType) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            ob_type,
        }
    }
}

/// Declaration of a morphism of a given type between two objects
///
/// Domain and codomain are optional so that a half-written morphism can
/// still be stored; validation reports the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphismDecl {
    pub id: EntityId,
    pub name: String,
    pub mor_type: MorType,
    #[serde(default)]
    pub dom: Option<EntityId>,
    #[serde(default)]
    pub cod: Option<EntityId>,
}

impl MorphismDecl {
    /// Creates a new morphism declaration with a fresh ID and no endpoints
    pub fn new(name: impl Into<String>, mor_type: MorType) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            mor_type,
            dom: None,
            cod: None,
        }
    }

    pub fn with_dom(mut self, dom: EntityId) -> Self {
        self.dom = Some(dom);
        self
    }

    pub fn with_cod(mut self, cod: EntityId) -> Self {
        self.cod = Some(cod);
        self
    }
}

/// A formal judgment in a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "kebab-case")]
pub enum ModelJudgment {
    Object(ObjectDecl),
    Morphism(MorphismDecl),
}

impl ModelJudgment {
    /// Returns the entity ID declared by this judgment
    pub fn id(&self) -> EntityId {
        match self {
            Self::Object(decl) => decl.id,
            Self::Morphism(decl) => decl.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Object(decl) => &decl.name,
            Self::Morphism(decl) => &decl.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            Self::Object(decl) => decl.name = name.into(),
            Self::Morphism(decl) => decl.name = name.into(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDecl> {
        match self {
            Self::Object(decl) => Some(decl),
            Self::Morphism(_) => None,
        }
    }

    pub fn as_morphism(&self) -> Option<&MorphismDecl> {
        match self {
            Self::Morphism(decl) => Some(decl),
            Self::Object(_) => None,
        }
    }

    /// Does this judgment reference `id` as domain or codomain?
    pub fn references(&self, id: EntityId) -> bool {
        match self {
            Self::Object(_) => false,
            Self::Morphism(decl) => decl.dom == Some(id) || decl.cod == Some(id),
        }
    }
}

impl From<ObjectDecl> for ModelJudgment {
    fn from(decl: ObjectDecl) -> Self {
        Self::Object(decl)
    }
}

impl From<MorphismDecl> for ModelJudgment {
    fn from(decl: MorphismDecl) -> Self {
        Self::Morphism(decl)
    }
}
