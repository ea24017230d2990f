//! Renderer contract

use model_core::{ModelJudgment, ValidationError};
use notebook_core::Cell;

/// What a renderer needs to draw one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView<'a> {
    pub index: usize,
    pub cell: &'a Cell<ModelJudgment>,
    pub is_active: bool,
    /// Validation errors of the cell's judgment; empty for prose and stems
    pub errors: &'a [ValidationError],
}

/// Requests a rendered cell sends back to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    /// Focus the cell above
    ActivateAbove,
    /// Focus the cell below
    ActivateBelow,
    /// Delete the cell, focusing the one above
    DeleteBackward,
    /// Delete the cell, focusing the one that takes its place
    DeleteForward,
    /// The cell received focus
    HasFocused,
}
