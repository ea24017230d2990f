//! # Model Core
//!
//! Formal judgments of a model and the checks run over them.
//!
//! ## Philosophy
//!
//! - **Judgments are data**: Objects and morphisms are plain declarations;
//!   morphisms point at objects by [`EntityId`](core_types::EntityId), never by name
//! - **Errors are values**: Validation reports problems per entity and never fails
//! - **Rebuild, don't patch**: [`NameIndex`] and [`ValidationReport`] are
//!   recomputed from scratch after every change
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A theorem prover (no composition, no equations)
//! - A storage layer (judgments live in notebook cells)

pub mod indexed_map;
pub mod judgment;
pub mod model;
pub mod name_index;
pub mod validation;

pub use indexed_map::IndexedMap;
pub use judgment::{ModelJudgment, MorphismDecl, ObjectDecl};
pub use model::{ModelMorphism, ModelObject, ValidatedModel};
pub use name_index::{NameIndex, NameResolution};
pub use validation::{ValidationEngine, ValidationError, ValidationReport, ValidationWarning};
