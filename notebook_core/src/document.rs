//! Transactional document handle
//!
//! Wraps a document value with the contract a replicated document provides:
//! read the current state, apply a mutation atomically, be told about
//! changes. Remote changes arrive whole through [`DocumentHandle::apply_remote`].

use core_types::new_uuid;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(new_uuid())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tx({})", self.0)
    }
}

/// Journal records kept per document; older ones are dropped
pub const MAX_JOURNAL_RECORDS: usize = 1024;

/// Final state of a journaled transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    /// Draft was committed
    Committed,
    /// Draft was discarded
    RolledBack,
}

/// Where a change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOrigin {
    Local,
    Remote,
}

/// Journal entry for one change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub label: String,
    pub origin: ChangeOrigin,
    pub state: TransactionState,
    /// Revision after the change
    pub revision: u64,
}

/// Handle returned by [`DocumentHandle::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S, u64)>;

/// Document with all-or-nothing mutation and change notification
///
/// ## Example
///
/// ```
/// use notebook_core::DocumentHandle;
///
/// let mut doc = DocumentHandle::new(vec![1, 2]);
/// let result: Result<(), &str> = doc.apply_transaction("push", |draft| {
///     draft.push(3);
///     Err("changed my mind")
/// });
/// assert!(result.is_err());
/// assert_eq!(doc.current_state(), &vec![1, 2]);
/// assert_eq!(doc.revision(), 0);
/// ```
pub struct DocumentHandle<S> {
    state: S,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_subscription: u64,
    journal: Vec<TransactionRecord>,
}

impl<S: Clone> DocumentHandle<S> {
    /// Creates a new document at revision zero
    pub fn new(state: S) -> Self {
        Self {
            state,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
            journal: Vec::new(),
        }
    }

    /// Committed state
    pub fn current_state(&self) -> &S {
        &self.state
    }

    /// Number of committed changes, local or remote
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Runs `mutate` on a draft copy of the state
    ///
    /// On `Ok` the draft becomes the committed state, the revision advances
    /// and subscribers are notified. On `Err` the draft is discarded and
    /// nothing observable changes apart from the journal.
    pub fn apply_transaction<R, E>(
        &mut self,
        label: &str,
        mutate: impl FnOnce(&mut S) -> Result<R, E>,
    ) -> Result<R, E> {
        let id = TransactionId::new();
        let mut draft = self.state.clone();
        match mutate(&mut draft) {
            Ok(value) => {
                self.state = draft;
                self.revision += 1;
                self.record(id, label, ChangeOrigin::Local, TransactionState::Committed);
                tracing::debug!(%id, label, revision = self.revision, "transaction committed");
                self.notify();
                Ok(value)
            }
            Err(err) => {
                self.record(id, label, ChangeOrigin::Local, TransactionState::RolledBack);
                tracing::debug!(%id, label, "transaction rolled back");
                Err(err)
            }
        }
    }

    /// Replaces the state with one received from elsewhere
    pub fn apply_remote(&mut self, state: S) {
        let id = TransactionId::new();
        self.state = state;
        self.revision += 1;
        self.record(id, "remote", ChangeOrigin::Remote, TransactionState::Committed);
        tracing::debug!(%id, revision = self.revision, "remote change applied");
        self.notify();
    }

    /// Registers a listener called with the new state and revision after
    /// every committed change
    pub fn subscribe(&mut self, listener: impl FnMut(&S, u64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Most recent journal records, oldest first
    ///
    /// At most [`MAX_JOURNAL_RECORDS`] are kept.
    pub fn journal(&self) -> &[TransactionRecord] {
        &self.journal
    }

    fn record(
        &mut self,
        id: TransactionId,
        label: &str,
        origin: ChangeOrigin,
        state: TransactionState,
    ) {
        self.journal.push(TransactionRecord {
            id,
            label: label.to_string(),
            origin,
            state,
            revision: self.revision,
        });
        if self.journal.len() > MAX_JOURNAL_RECORDS {
            let excess = self.journal.len() - MAX_JOURNAL_RECORDS;
            self.journal.drain(..excess);
        }
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, self.revision);
        }
    }
}

impl<S: Clone + Default> Default for DocumentHandle<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for DocumentHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
