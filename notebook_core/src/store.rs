//! Positional cell mutations over a document

use crate::{
    Cell, CellContent, DocumentHandle, Notebook, StructuralError, SubscriptionId,
    TransactionRecord,
};

/// Cell store backed by a transactional document
///
/// Each operation is one transaction: it either commits entirely or
/// leaves the notebook and its revision untouched.
#[derive(Debug)]
pub struct CellStore<T> {
    doc: DocumentHandle<Notebook<T>>,
}

impl<T: Clone> CellStore<T> {
    /// Creates a new store over a notebook
    pub fn new(notebook: Notebook<T>) -> Self {
        Self {
            doc: DocumentHandle::new(notebook),
        }
    }

    pub fn notebook(&self) -> &Notebook<T> {
        self.doc.current_state()
    }

    pub fn cells(&self) -> &[Cell<T>] {
        self.notebook().cells()
    }

    pub fn cell(&self, pos: usize) -> Option<&Cell<T>> {
        self.notebook().cell(pos)
    }

    pub fn len(&self) -> usize {
        self.notebook().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notebook().is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.doc.revision()
    }

    /// Inserts a cell; `pos` may equal the length to append
    pub fn insert_at(&mut self, pos: usize, cell: Cell<T>) -> Result<(), StructuralError> {
        self.doc
            .apply_transaction("insert", |nb| nb.insert_cell(pos, cell))
    }

    /// Replaces the cell at `pos`, returning the old one
    pub fn replace_at(&mut self, pos: usize, cell: Cell<T>) -> Result<Cell<T>, StructuralError> {
        self.doc
            .apply_transaction("replace", |nb| nb.replace_cell(pos, cell))
    }

    /// Deletes the cell at `pos`, returning it
    pub fn delete_at(&mut self, pos: usize) -> Result<Cell<T>, StructuralError> {
        self.doc.apply_transaction("delete", |nb| nb.remove_cell(pos))
    }

    /// Edits the content of the cell at `pos`, keeping its ID
    pub fn modify_at<R>(
        &mut self,
        pos: usize,
        f: impl FnOnce(&mut CellContent<T>) -> R,
    ) -> Result<R, StructuralError> {
        self.doc.apply_transaction("modify", |nb| nb.modify_cell(pos, f))
    }

    /// Runs several mutations as one transaction
    pub fn transact<R>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut Notebook<T>) -> Result<R, StructuralError>,
    ) -> Result<R, StructuralError> {
        self.doc.apply_transaction(label, f)
    }

    /// Adopts a notebook changed elsewhere
    pub fn apply_remote(&mut self, notebook: Notebook<T>) {
        self.doc.apply_remote(notebook);
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Notebook<T>, u64) + 'static,
    ) -> SubscriptionId {
        self.doc.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.doc.unsubscribe(id)
    }

    pub fn journal(&self) -> &[TransactionRecord] {
        self.doc.journal()
    }
}

impl<T: Clone> Default for CellStore<T> {
    fn default() -> Self {
        Self::new(Notebook::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mutation, TransactionState};

    fn store(n: usize) -> CellStore<usize> {
        CellStore::new(Notebook::with_cells("Test", (0..n).map(Cell::formal)).unwrap())
    }

    #[test]
    fn test_each_operation_is_one_revision() {
        let mut store = store(2);
        store.insert_at(2, Cell::formal(2)).unwrap();
        store.replace_at(0, Cell::stem()).unwrap();
        store.delete_at(1).unwrap();
        assert_eq!(store.revision(), 3);
        assert_eq!(store.len(), 2);
        assert!(store.cell(0).unwrap().is_stem());
    }

    #[test]
    fn test_out_of_range_is_rejected_without_clamping() {
        let mut store = store(2);
        assert_eq!(
            store.delete_at(2).unwrap_err(),
            StructuralError::PositionOutOfRange {
                pos: 2,
                len: 2,
                op: Mutation::Delete
            }
        );
        assert!(store.replace_at(5, Cell::stem()).is_err());
        assert!(store.insert_at(3, Cell::stem()).is_err());
        assert_eq!(store.revision(), 0);
        assert_eq!(store.len(), 2);
        assert!(store
            .journal()
            .iter()
            .all(|record| record.state == TransactionState::RolledBack));
    }

    #[test]
    fn test_transact_is_atomic() {
        let mut store = store(3);
        let result = store.transact("move", |nb| {
            let cell = nb.remove_cell(0)?;
            nb.insert_cell(7, cell)
        });
        assert!(result.is_err());
        assert_eq!(store.len(), 3);
        assert_eq!(store.cell(0).and_then(Cell::as_formal), Some(&0));

        store
            .transact("move", |nb| {
                let cell = nb.remove_cell(0)?;
                nb.insert_cell(2, cell)
            })
            .unwrap();
        assert_eq!(store.cell(2).and_then(Cell::as_formal), Some(&0));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_modify_keeps_identity() {
        let mut store = store(1);
        let id = store.cell(0).unwrap().id;
        let old = store
            .modify_at(0, |content| std::mem::replace(content, CellContent::Formal(9)))
            .unwrap();
        assert_eq!(old, CellContent::Formal(0));
        assert_eq!(store.cell(0).unwrap().id, id);
    }
}
