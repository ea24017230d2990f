//! Structural errors

use core_types::{CellId, EntityId};
use std::fmt;
use thiserror::Error;

/// Kind of positional mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Insert,
    Replace,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Insert => write!(f, "insert"),
            Mutation::Replace => write!(f, "replace"),
            Mutation::Delete => write!(f, "delete"),
        }
    }
}

/// Rejected mutation of the cell sequence
///
/// These indicate a bug in the caller; the notebook is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Cannot {op} at position {pos} in notebook of length {len}")]
    PositionOutOfRange { pos: usize, len: usize, op: Mutation },

    #[error("Cell {0} already exists in the notebook")]
    DuplicateCellId(CellId),

    /// Formal content reuses an ID already declared in the notebook
    #[error("{0} is already declared in the notebook")]
    DuplicateEntityId(EntityId),
}
