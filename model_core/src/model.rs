//! Structural model assembled from valid judgments

use core_types::EntityId;
use double_theory::{MorType, ObType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelObject {
    pub id: EntityId,
    pub name: String,
    pub ob_type: ObType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMorphism {
    pub id: EntityId,
    pub name: String,
    pub mor_type: MorType,
    pub dom: EntityId,
    pub cod: EntityId,
}

/// A model whose every judgment passed validation
///
/// Morphisms here always have both endpoints, and those endpoints are
/// objects of this model. Declaration order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedModel {
    objects: Vec<ModelObject>,
    morphisms: Vec<ModelMorphism>,
}

impl ValidatedModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_object(&mut self, object: ModelObject) {
        self.objects.push(object);
    }

    pub(crate) fn add_morphism(&mut self, morphism: ModelMorphism) {
        self.morphisms.push(morphism);
    }

    pub fn objects(&self) -> &[ModelObject] {
        &self.objects
    }

    pub fn morphisms(&self) -> &[ModelMorphism] {
        &self.morphisms
    }

    pub fn object(&self, id: EntityId) -> Option<&ModelObject> {
        self.objects.iter().find(|ob| ob.id == id)
    }

    pub fn morphism(&self, id: EntityId) -> Option<&ModelMorphism> {
        self.morphisms.iter().find(|mor| mor.id == id)
    }

    pub fn has_object(&self, id: EntityId) -> bool {
        self.object(id).is_some()
    }

    pub fn has_morphism(&self, id: EntityId) -> bool {
        self.morphism(id).is_some()
    }

    /// Object type of an object in the model
    pub fn ob_type(&self, id: EntityId) -> Option<&ObType> {
        self.object(id).map(|ob| &ob.ob_type)
    }

    /// Morphisms with the given domain and codomain
    pub fn morphisms_between(
        &self,
        dom: EntityId,
        cod: EntityId,
    ) -> impl Iterator<Item = &ModelMorphism> {
        self.morphisms
            .iter()
            .filter(move |mor| mor.dom == dom && mor.cod == cod)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn morphism_count(&self) -> usize {
        self.morphisms.len()
    }
}
