//! Query surface used by the validation engine and the editor

use crate::{MorType, ObType, TheoryType, TypeMeta};
use alloc::vec::Vec;

/// Read-only view over an externally supplied theory
///
/// Implementations answer questions about kinds; they never see a model.
pub trait TheorySchema {
    /// Basic object types, in presentation order
    fn ob_types(&self) -> Vec<ObType>;

    /// Morphism types (basic generators and hom types), in presentation order
    fn mor_types(&self) -> Vec<MorType>;

    /// Is `x` an object type of this theory (basic or derived)?
    fn has_ob_type(&self, x: &ObType) -> bool;

    /// Is `m` a morphism type of this theory (basic or derived)?
    fn has_mor_type(&self, m: &MorType) -> bool;

    /// Source object type of a morphism type, `None` if `m` is unknown
    fn src(&self, m: &MorType) -> Option<ObType>;

    /// Target object type of a morphism type, `None` if `m` is unknown
    fn tgt(&self, m: &MorType) -> Option<ObType>;

    /// Display metadata attached to a type, if any
    fn metadata(&self, t: &TheoryType) -> Option<&TypeMeta>;

    /// Whether models of this theory must be free (no equations)
    fn only_free_models(&self) -> bool {
        false
    }
}
