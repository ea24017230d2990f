use core_types::EntityId;
use notebook_core::StructuralError;
use thiserror::Error;

/// Model editor error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No judgment with id {0}")]
    UnknownEntity(EntityId),

    #[error("Theory not found: {0}")]
    UnknownTheory(String),

    #[error("No active cell")]
    NoActiveCell,

    #[error("Cell {0} does not hold an object or morphism")]
    NotAJudgment(usize),

    #[error("{0} is not a morphism")]
    NotAMorphism(EntityId),

    #[error("Cell {index} is out of range for notebook of length {len}")]
    CellOutOfRange { index: usize, len: usize },

    #[error("Update changed the id of judgment {0}")]
    IdentityChanged(EntityId),
}
