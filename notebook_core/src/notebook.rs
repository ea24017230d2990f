//! Notebook: a named, ordered sequence of cells

use crate::{Cell, CellContent, Mutation, StructuralError};
use core_types::CellId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named sequence of cells with unique IDs
///
/// Mutations here are pure functions on the value; transactions and
/// notifications belong to [`DocumentHandle`](crate::DocumentHandle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook<T> {
    pub name: String,
    cells: Vec<Cell<T>>,
}

impl<T> Notebook<T> {
    /// Creates an empty notebook
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Creates a notebook from cells
    ///
    /// Fails on the first repeated cell ID.
    pub fn with_cells(
        name: impl Into<String>,
        cells: impl IntoIterator<Item = Cell<T>>,
    ) -> Result<Self, StructuralError> {
        let mut notebook = Self::new(name);
        for cell in cells {
            let pos = notebook.len();
            notebook.insert_cell(pos, cell)?;
        }
        Ok(notebook)
    }

    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    pub fn cell(&self, pos: usize) -> Option<&Cell<T>> {
        self.cells.get(pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current position of a cell
    pub fn position_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id == id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.position_of(id).is_some()
    }

    /// Formal contents in notebook order
    pub fn formal_content(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().filter_map(Cell::as_formal)
    }

    /// Whether every cell ID occurs once
    pub fn has_unique_ids(&self) -> bool {
        let ids: BTreeSet<CellId> = self.cells.iter().map(|cell| cell.id).collect();
        ids.len() == self.cells.len()
    }

    /// Inserts a cell at `pos`, which may equal the length
    pub fn insert_cell(&mut self, pos: usize, cell: Cell<T>) -> Result<(), StructuralError> {
        if pos > self.len() {
            return Err(self.out_of_range(pos, Mutation::Insert));
        }
        if self.contains(cell.id) {
            return Err(StructuralError::DuplicateCellId(cell.id));
        }
        self.cells.insert(pos, cell);
        Ok(())
    }

    /// Replaces the cell at `pos`, returning the old one
    ///
    /// The new cell may reuse the old cell's ID but no other.
    pub fn replace_cell(&mut self, pos: usize, cell: Cell<T>) -> Result<Cell<T>, StructuralError> {
        if pos >= self.len() {
            return Err(self.out_of_range(pos, Mutation::Replace));
        }
        if matches!(self.position_of(cell.id), Some(other) if other != pos) {
            return Err(StructuralError::DuplicateCellId(cell.id));
        }
        Ok(std::mem::replace(&mut self.cells[pos], cell))
    }

    /// Removes and returns the cell at `pos`
    pub fn remove_cell(&mut self, pos: usize) -> Result<Cell<T>, StructuralError> {
        if pos >= self.len() {
            return Err(self.out_of_range(pos, Mutation::Delete));
        }
        Ok(self.cells.remove(pos))
    }

    /// Edits the content of the cell at `pos` in place; its ID is kept
    pub fn modify_cell<R>(
        &mut self,
        pos: usize,
        f: impl FnOnce(&mut CellContent<T>) -> R,
    ) -> Result<R, StructuralError> {
        let len = self.len();
        match self.cells.get_mut(pos) {
            Some(cell) => Ok(f(&mut cell.content)),
            None => Err(StructuralError::PositionOutOfRange {
                pos,
                len,
                op: Mutation::Replace,
            }),
        }
    }

    fn out_of_range(&self, pos: usize, op: Mutation) -> StructuralError {
        StructuralError::PositionOutOfRange {
            pos,
            len: self.len(),
            op,
        }
    }
}

impl<T> Default for Notebook<T> {
    fn default() -> Self {
        Self::new(String::new())
    }
}
