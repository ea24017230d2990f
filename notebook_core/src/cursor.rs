//! Active-cell cursor
//!
//! At most one cell is active. The cursor tracks it by index, so every
//! structural mutation must be reported here to keep the index pointing at
//! the same logical cell.

use serde::{Deserialize, Serialize};

/// Audit events kept per cursor; older ones are dropped
pub const MAX_AUDIT_EVENTS: usize = 256;

/// Which way a deletion was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteDirection {
    /// Delete at the start of a cell, moving focus up
    Backward,
    /// Delete at the end of a cell, keeping focus in place
    Forward,
}

/// Cursor event for audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorEvent {
    /// A cell became active with none active before
    Activated { index: usize, sequence: u64 },
    /// The active index changed
    Moved { from: usize, to: usize, sequence: u64 },
    /// No cell is active any more
    Cleared { from: usize, sequence: u64 },
}

/// Active-cell state machine
///
/// `None` is the unselected state; [`ActiveCursor::index`] exposes it as `-1`.
#[derive(Debug, Clone, Default)]
pub struct ActiveCursor {
    active: Option<usize>,
    audit_trail: Vec<CursorEvent>,
    next_sequence: u64,
}

impl ActiveCursor {
    /// Creates a new cursor with no active cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor with cell `index` active
    pub fn at(index: usize) -> Self {
        let mut cursor = Self::new();
        cursor.set(Some(index));
        cursor
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Active index, or `-1` when unselected
    pub fn index(&self) -> isize {
        self.active.map_or(-1, |i| i as isize)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn is_unselected(&self) -> bool {
        self.active.is_none()
    }

    /// Moves to the previous cell; stays on the first
    pub fn activate_above(&mut self) {
        if let Some(i) = self.active {
            self.set(Some(i.saturating_sub(1)));
        }
    }

    /// Moves to the next cell; stays on the last of `len`
    pub fn activate_below(&mut self, len: usize) {
        if let Some(i) = self.active {
            if i + 1 < len {
                self.set(Some(i + 1));
            }
        }
    }

    /// Forces cell `index` active
    pub fn has_focused(&mut self, index: usize) {
        self.set(Some(index));
    }

    /// Adjusts for a cell inserted at `pos`
    pub fn on_insert(&mut self, pos: usize) {
        if let Some(i) = self.active {
            if pos <= i {
                self.set(Some(i + 1));
            }
        }
    }

    /// Adjusts for the cell at `pos` being deleted, leaving `new_len` cells
    pub fn on_delete(&mut self, pos: usize, direction: DeleteDirection, new_len: usize) {
        let Some(i) = self.active else {
            return;
        };
        let next = if pos == i {
            match direction {
                DeleteDirection::Forward => Some(i),
                DeleteDirection::Backward => i.checked_sub(1),
            }
        } else if pos < i {
            Some(i - 1)
        } else {
            Some(i)
        };
        self.set(next.filter(|_| new_len > 0).map(|j| j.min(new_len - 1)));
    }

    /// Pulls the index back inside a notebook of `len` cells
    pub fn clamp(&mut self, len: usize) {
        if let Some(i) = self.active {
            if i >= len {
                self.set(len.checked_sub(1));
            }
        }
    }

    /// Deactivates the current cell
    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Returns the most recent audit events, oldest first
    pub fn audit_trail(&self) -> &[CursorEvent] {
        &self.audit_trail
    }

    fn set(&mut self, next: Option<usize>) {
        if next == self.active {
            return;
        }
        let sequence = self.next_sequence();
        let event = match (self.active, next) {
            (None, Some(index)) => CursorEvent::Activated { index, sequence },
            (Some(from), Some(to)) => CursorEvent::Moved { from, to, sequence },
            (Some(from), None) => CursorEvent::Cleared { from, sequence },
            (None, None) => return,
        };
        tracing::debug!(?event, "cursor changed");
        self.audit_trail.push(event);
        if self.audit_trail.len() > MAX_AUDIT_EVENTS {
            let excess = self.audit_trail.len() - MAX_AUDIT_EVENTS;
            self.audit_trail.drain(..excess);
        }
        self.active = next;
    }

    fn next_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}
