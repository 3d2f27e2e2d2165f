//! Canonical in-memory action collection.
//!
//! [`ActionStore`] owns the seeded actions for the whole session. Actions are
//! never added or removed after construction; only their status changes, and
//! only through [`ActionStore::apply_status`] or [`ActionStore::restore_status`].

use std::collections::HashMap;

use super::history::HistoryEntry;
use crate::domain::{ActionStatus, AgentAction};

/// Ordered collection of actions with O(1) lookup by id.
///
/// Seed order is preserved; views impose their own ordering.
#[derive(Debug, Clone, Default)]
pub struct ActionStore {
    actions: Vec<AgentAction>,
    index: HashMap<String, usize>,
}

impl ActionStore {
    /// Builds a store from the seed list.
    ///
    /// Ids are trusted to be unique; if a duplicate slips through, lookups
    /// resolve to its first occurrence.
    #[must_use]
    pub fn new(actions: Vec<AgentAction>) -> Self {
        let mut index = HashMap::with_capacity(actions.len());
        for (position, action) in actions.iter().enumerate() {
            index.entry(action.id.clone()).or_insert(position);
        }

        tracing::debug!(action_count = actions.len(), "action store seeded");

        Self { actions, index }
    }

    /// All actions, in seed order.
    #[must_use]
    pub fn all(&self) -> &[AgentAction] {
        &self.actions
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AgentAction> {
        self.index.get(id).map(|&position| &self.actions[position])
    }

    #[must_use]
    pub fn status_of(&self, id: &str) -> Option<ActionStatus> {
        self.get(id).map(|action| action.status)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Overwrites the status of `id`, returning the pre-change snapshot.
    ///
    /// Any target status is accepted. Returns `None`, and leaves the store
    /// untouched, when the id is unknown or the status is already `status`.
    pub fn apply_status(&mut self, id: &str, status: ActionStatus) -> Option<HistoryEntry> {
        let position = *self.index.get(id)?;
        let action = &mut self.actions[position];

        if action.status == status {
            tracing::trace!(action_id = %id, status = %status, "status unchanged");
            return None;
        }

        let snapshot = action.clone();
        let previous_status = action.status;
        action.status = status;

        tracing::debug!(action_id = %id, from = %previous_status, to = %status, "status changed");

        Some(HistoryEntry {
            action: snapshot,
            previous_status,
        })
    }

    /// Sets the status of `id` without producing a change record.
    ///
    /// Used to replay undo. Returns `false` when the id is unknown.
    pub fn restore_status(&mut self, id: &str, status: ActionStatus) -> bool {
        let Some(&position) = self.index.get(id) else {
            tracing::debug!(action_id = %id, "restore skipped, unknown action");
            return false;
        };

        let action = &mut self.actions[position];
        tracing::debug!(action_id = %id, from = %action.status, to = %status, "status restored");
        action.status = status;
        true
    }
}
