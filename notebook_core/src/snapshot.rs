//! Notebook snapshot for deterministic testing

use crate::{ActiveCursor, CellTag, Notebook};
use core_types::CellId;
use serde::{Deserialize, Serialize};

/// Structural state of a notebook and its cursor
///
/// Content is left out; two snapshots are equal when the same cells sit in
/// the same order with the same cell active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookSnapshot {
    pub name: String,
    pub cell_ids: Vec<CellId>,
    pub tags: Vec<CellTag>,
    pub active: Option<usize>,
    pub revision: u64,
}

impl NotebookSnapshot {
    /// Captures a notebook, its cursor and the document revision
    pub fn capture<T>(notebook: &Notebook<T>, cursor: &ActiveCursor, revision: u64) -> Self {
        Self {
            name: notebook.name.clone(),
            cell_ids: notebook.cells().iter().map(|cell| cell.id).collect(),
            tags: notebook.cells().iter().map(|cell| cell.tag()).collect(),
            active: cursor.active(),
            revision,
        }
    }

    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(b"\n");

        for (id, tag) in self.cell_ids.iter().zip(&self.tags) {
            hasher.update(id.as_uuid().as_bytes());
            hasher.update([*tag as u8]);
        }

        let active = self.active.map_or(-1, |i| i as i64);
        hasher.update(active.to_le_bytes());
        hasher.update(self.revision.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn sample() -> (Notebook<u8>, ActiveCursor) {
        let notebook =
            Notebook::with_cells("Sample", vec![Cell::formal(1), Cell::stem()]).unwrap();
        (notebook, ActiveCursor::at(1))
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let (notebook, cursor) = sample();
        let snapshot = NotebookSnapshot::capture(&notebook, &cursor, 3);
        assert_eq!(snapshot.hash(), snapshot.clone().hash());
        assert_eq!(snapshot.tags, vec![CellTag::Formal, CellTag::Stem]);
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let (notebook, mut cursor) = sample();
        let before = NotebookSnapshot::capture(&notebook, &cursor, 3);
        cursor.activate_above();
        let after = NotebookSnapshot::capture(&notebook, &cursor, 3);

        assert_ne!(before, after);
        assert_ne!(before.hash(), after.hash());
    }
}
