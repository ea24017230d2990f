//! Validation of judgments against a theory
//!
//! Every judgment is checked independently and every failing check is
//! reported. Validation never fails as a whole: the outcome is a
//! [`ValidationReport`] mapping entity IDs to their errors, plus the
//! validated model when there are none.

use crate::model::{ModelMorphism, ModelObject};
use crate::{ModelJudgment, MorphismDecl, NameIndex, ObjectDecl, ValidatedModel};
use core_types::EntityId;
use double_theory::{MorType, ObType, TheorySchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A problem with a single judgment
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum ValidationError {
    #[error("Domain is missing or not an object")]
    DomMissing,

    #[error("Codomain is missing or not an object")]
    CodMissing,

    #[error("Domain has type {actual}, expected {expected}")]
    DomType { expected: ObType, actual: ObType },

    #[error("Codomain has type {actual}, expected {expected}")]
    CodType { expected: ObType, actual: ObType },

    #[error("Object type {0} is not in the theory")]
    ObType(ObType),

    #[error("Morphism type {0} is not in the theory")]
    MorType(MorType),
}

/// A condition worth surfacing that does not invalidate the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum ValidationWarning {
    /// Several objects share a name; lookups resolve to the first
    AmbiguousName { name: String, ids: Vec<EntityId> },
}

/// Outcome of validating a list of judgments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Errors of each failing judgment; valid judgments have no entry
    pub errors: BTreeMap<EntityId, Vec<ValidationError>>,
    /// Present iff no judgment has errors
    pub model: Option<ValidatedModel>,
    pub warnings: Vec<ValidationWarning>,
    /// Copied from the theory
    pub only_free_models: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of one judgment, empty if it is valid or unknown
    pub fn errors_for(&self, id: EntityId) -> &[ValidationError] {
        self.errors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of errors across all judgments
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

/// Checks judgments against the type rules of a theory
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    warn_ambiguous_names: bool,
}

impl ValidationEngine {
    /// Creates a new validation engine
    pub fn new() -> Self {
        Self {
            warn_ambiguous_names: true,
        }
    }

    /// Enables or disables ambiguous name warnings
    pub fn with_ambiguity_warnings(mut self, enabled: bool) -> Self {
        self.warn_ambiguous_names = enabled;
        self
    }

    /// Validates judgments against a theory
    ///
    /// Domain and codomain are resolved by ID among the object judgments;
    /// the name index only contributes warnings.
    pub fn validate<Th: TheorySchema + ?Sized>(
        &self,
        theory: &Th,
        judgments: &[ModelJudgment],
        names: &NameIndex,
    ) -> ValidationReport {
        let mut objects: BTreeMap<EntityId, &ObjectDecl> = BTreeMap::new();
        for decl in judgments.iter().filter_map(ModelJudgment::as_object) {
            objects.entry(decl.id).or_insert(decl);
        }

        let mut errors: BTreeMap<EntityId, Vec<ValidationError>> = BTreeMap::new();
        let mut model = ValidatedModel::new();
        for judgment in judgments {
            let found = match judgment {
                ModelJudgment::Object(decl) => {
                    let found = check_object(theory, decl);
                    if found.is_empty() {
                        model.add_object(ModelObject {
                            id: decl.id,
                            name: decl.name.clone(),
                            ob_type: decl.ob_type.clone(),
                        });
                    }
                    found
                }
                ModelJudgment::Morphism(decl) => {
                    let found = check_morphism(theory, decl, &objects);
                    if let (true, Some(dom), Some(cod)) = (found.is_empty(), decl.dom, decl.cod) {
                        model.add_morphism(ModelMorphism {
                            id: decl.id,
                            name: decl.name.clone(),
                            mor_type: decl.mor_type.clone(),
                            dom,
                            cod,
                        });
                    }
                    found
                }
            };
            if !found.is_empty() {
                errors
                    .entry(judgment.id())
                    .or_insert_with(Vec::new)
                    .extend(found);
            }
        }

        let warnings = if self.warn_ambiguous_names {
            names
                .ambiguous_names()
                .into_iter()
                .map(|(name, ids)| ValidationWarning::AmbiguousName {
                    name: name.to_string(),
                    ids: ids.to_vec(),
                })
                .collect()
        } else {
            Vec::new()
        };

        tracing::trace!(
            judgments = judgments.len(),
            invalid = errors.len(),
            warnings = warnings.len(),
            "validated model"
        );

        let model = errors.is_empty().then_some(model);
        ValidationReport {
            errors,
            model,
            warnings,
            only_free_models: theory.only_free_models(),
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn check_object<Th: TheorySchema + ?Sized>(theory: &Th, decl: &ObjectDecl) -> Vec<ValidationError> {
    if theory.has_ob_type(&decl.ob_type) {
        Vec::new()
    } else {
        vec![ValidationError::ObType(decl.ob_type.clone())]
    }
}

fn check_morphism<Th: TheorySchema + ?Sized>(
    theory: &Th,
    decl: &MorphismDecl,
    objects: &BTreeMap<EntityId, &ObjectDecl>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let dom = decl.dom.and_then(|id| objects.get(&id));
    let cod = decl.cod.and_then(|id| objects.get(&id));

    if dom.is_none() {
        errors.push(ValidationError::DomMissing);
    }
    if cod.is_none() {
        errors.push(ValidationError::CodMissing);
    }

    if !theory.has_mor_type(&decl.mor_type) {
        // Source and target are undefined for unknown types
        errors.push(ValidationError::MorType(decl.mor_type.clone()));
        return errors;
    }

    if let (Some(ob), Some(expected)) = (dom, theory.src(&decl.mor_type)) {
        if ob.ob_type != expected {
            errors.push(ValidationError::DomType {
                expected,
                actual: ob.ob_type.clone(),
            });
        }
    }
    if let (Some(ob), Some(expected)) = (cod, theory.tgt(&decl.mor_type)) {
        if ob.ob_type != expected {
            errors.push(ValidationError::CodType {
                expected,
                actual: ob.ob_type.clone(),
            });
        }
    }
    errors
}
