//! # Notebook Core
//!
//! Ordered cells, transactional mutation and the active-cell cursor.
//!
//! ## Philosophy
//!
//! - **Identity is not position**: Cells carry a [`CellId`](core_types::CellId);
//!   their index is only where they currently sit
//! - **All-or-nothing**: Every mutation runs in a transaction on a draft and
//!   observers only ever see the state before or after it
//! - **One active cell**: [`ActiveCursor`] is the single source of truth for
//!   which cell has focus, and moves in lockstep with mutations
//! - **Auditable**: Transactions and cursor moves are journaled
//!
//! ## Design
//!
//! The core provides:
//! - Cell / Notebook: Generic over the formal content type
//! - DocumentHandle: Transactions, remote updates, subscriptions
//! - CellStore: Positional insert/replace/delete over a document
//! - ActiveCursor: Focus state machine
//! - NotebookSnapshot: Deterministic state for tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A CRDT (merging remote edits is the document provider's job)
//! - A renderer (cells are data)

pub mod cell;
pub mod cursor;
pub mod document;
pub mod error;
pub mod notebook;
pub mod snapshot;
pub mod store;

pub use cell::{Cell, CellContent, CellTag, RichText};
pub use cursor::{ActiveCursor, CursorEvent, DeleteDirection, MAX_AUDIT_EVENTS};
pub use document::{
    ChangeOrigin, DocumentHandle, SubscriptionId, TransactionId, TransactionRecord,
    TransactionState, MAX_JOURNAL_RECORDS,
};
pub use error::{Mutation, StructuralError};
pub use notebook::Notebook;
pub use snapshot::NotebookSnapshot;
pub use store::CellStore;
