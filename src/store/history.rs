//! Undo history for status changes.
//!
//! Every effective status change pushes a [`HistoryEntry`] holding an owned
//! snapshot of the action as it was *before* the change. Undo is global and
//! single-step: [`UndoHistory::pop_last`] hands back the most recent change
//! across all actions, so repeated undo walks the change log backwards. There
//! is no redo.

use crate::domain::{ActionStatus, AgentAction};

/// One recorded status change.
///
/// The snapshot is a deep copy owned by the history; later mutation of the
/// live action cannot alter it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The action as it was immediately before the change.
    pub action: AgentAction,
    /// Status to restore on undo.
    pub previous_status: ActionStatus,
}

impl HistoryEntry {
    #[must_use]
    pub fn action_id(&self) -> &str {
        &self.action.id
    }
}

/// LIFO stack of status changes.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: Vec<HistoryEntry>,
}

impl UndoHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a change record.
    pub fn record(&mut self, action: AgentAction, previous_status: ActionStatus) {
        tracing::trace!(
            action_id = %action.id,
            previous_status = %previous_status,
            depth = self.entries.len() + 1,
            "history entry recorded"
        );
        self.entries.push(HistoryEntry {
            action,
            previous_status,
        });
    }

    /// Removes and returns the most recent entry, `None` when empty.
    pub fn pop_last(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    /// Most recent entry without removing it.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActionType;

    fn action(id: &str) -> AgentAction {
        AgentAction::new(id, "desc", "entity", ActionType::Database, chrono::Utc::now())
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut history = UndoHistory::new();
        history.record(action("a1"), ActionStatus::Pending);
        history.record(action("a2"), ActionStatus::Pending);

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop_last().unwrap().action_id(), "a2");
        assert_eq!(history.pop_last().unwrap().action_id(), "a1");
        assert!(history.pop_last().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut history = UndoHistory::new();
        let mut live = action("a1");
        history.record(live.clone(), live.status);

        live.status = ActionStatus::Rejected;
        live.description.push_str(" (edited)");

        let entry = history.last().unwrap();
        assert_eq!(entry.action.status, ActionStatus::Pending);
        assert_eq!(entry.action.description, "desc");
    }
}
