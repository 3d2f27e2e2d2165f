//! Operator selection of action ids.
//!
//! The selection is independent of filtering: an id stays selected when its
//! action scrolls out of the current view. Ids leave the selection on
//! explicit toggle or clear, when their action is approved or rejected
//! individually, and all at once after a bulk decision.

use crate::store::ActionStore;

/// Default pending-selection size at which bulk decisions need confirmation.
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 10;

/// Selected action ids, kept in the order the operator selected them.
///
/// Bulk decisions process ids in this order, so undo after a bulk decision
/// first reverts the most recently selected action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Adds `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: &str) {
        if let Some(position) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(position);
        } else {
            self.ids.push(id.to_string());
        }
    }

    /// Select-all scoped to the visible ids.
    ///
    /// When the selection is as large as the visible list it is cleared;
    /// otherwise it is replaced by the visible ids. Only sizes are compared,
    /// so a same-size selection of ids outside the view also clears.
    ///
    /// ```
    /// use zapprove::review::SelectionSet;
    ///
    /// let visible = ["a1", "a2", "a3"];
    /// let mut selection = SelectionSet::new();
    /// selection.toggle("a9");
    ///
    /// selection.select_all(visible);
    /// assert_eq!(selection.len(), 3);
    /// assert!(!selection.contains("a9"));
    ///
    /// selection.select_all(visible);
    /// assert!(selection.is_empty());
    /// ```
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let visible: Vec<String> = visible_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();

        if self.ids.len() == visible.len() {
            tracing::debug!(count = visible.len(), "select-all cleared selection");
            self.ids.clear();
        } else {
            tracing::debug!(count = visible.len(), "select-all replaced selection");
            self.ids = visible;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops `id` from the selection, returning whether it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected ids whose action is currently pending, in selection order.
    #[must_use]
    pub fn pending_ids(&self, store: &ActionStore) -> Vec<String> {
        self.ids
            .iter()
            .filter(|id| store.status_of(id.as_str()).is_some_and(|status| status.is_pending()))
            .cloned()
            .collect()
    }

    /// Size of the intersection between the selection and pending actions.
    #[must_use]
    pub fn pending_count(&self, store: &ActionStore) -> usize {
        self.ids
            .iter()
            .filter(|id| store.status_of(id.as_str()).is_some_and(|status| status.is_pending()))
            .count()
    }

    /// Whether the selection is as large as a non-empty visible list.
    #[must_use]
    pub fn covers_all<S: AsRef<str>>(&self, visible_ids: &[S]) -> bool {
        !visible_ids.is_empty() && self.ids.len() == visible_ids.len()
    }
}

/// What a bulk approve/reject gesture should do for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkGate {
    /// No pending action is selected; bulk controls are disabled.
    Disabled,
    /// Execute immediately on the gesture.
    Immediate { pending: usize },
    /// Ask the operator to confirm first.
    Confirm { pending: usize },
}

impl BulkGate {
    /// Applies the confirmation policy: `pending >= threshold` needs a confirm step.
    ///
    /// ```
    /// use zapprove::review::BulkGate;
    ///
    /// assert_eq!(BulkGate::evaluate(0, 10), BulkGate::Disabled);
    /// assert_eq!(BulkGate::evaluate(9, 10), BulkGate::Immediate { pending: 9 });
    /// assert_eq!(BulkGate::evaluate(10, 10), BulkGate::Confirm { pending: 10 });
    /// ```
    #[must_use]
    pub const fn evaluate(pending: usize, threshold: usize) -> Self {
        if pending == 0 {
            Self::Disabled
        } else if pending >= threshold {
            Self::Confirm { pending }
        } else {
            Self::Immediate { pending }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionStatus, ActionType, AgentAction};

    fn store_with(statuses: &[(&str, ActionStatus)]) -> ActionStore {
        let now = chrono::Utc::now();
        ActionStore::new(
            statuses
                .iter()
                .map(|(id, status)| {
                    let mut action = AgentAction::new(*id, "d", "e", ActionType::Email, now);
                    action.status = *status;
                    action
                })
                .collect(),
        )
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = SelectionSet::new();
        selection.toggle("a1");
        selection.toggle("a2");
        assert!(selection.contains("a1"));
        selection.toggle("a1");
        assert!(!selection.contains("a1"));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["a2"]);
    }

    #[test]
    fn test_select_all_replaces_partial_selection() {
        let mut selection = SelectionSet::new();
        selection.toggle("a1");
        selection.select_all(["a1", "a2"]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["a1", "a2"]);
    }

    #[test]
    fn test_select_all_with_same_size_but_other_ids_clears() {
        let mut selection = SelectionSet::new();
        for id in ["x1", "x2", "x3"] {
            selection.toggle(id);
        }
        selection.select_all(["a1", "a2", "a3"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_on_empty_view() {
        let mut selection = SelectionSet::new();
        selection.toggle("a1");
        selection.select_all(Vec::<String>::new());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_remove_reports_membership() {
        let mut selection = SelectionSet::new();
        selection.toggle("a1");
        assert!(selection.remove("a1"));
        assert!(!selection.remove("a1"));
    }

    #[test]
    fn test_pending_intersection() {
        let store = store_with(&[
            ("a1", ActionStatus::Pending),
            ("a2", ActionStatus::Approved),
            ("a3", ActionStatus::Pending),
        ]);
        let mut selection = SelectionSet::new();
        for id in ["a3", "a2", "ghost", "a1"] {
            selection.toggle(id);
        }

        assert_eq!(selection.pending_count(&store), 2);
        assert_eq!(selection.pending_ids(&store), vec!["a3", "a1"]);
    }

    #[test]
    fn test_covers_all() {
        let mut selection = SelectionSet::new();
        assert!(!selection.covers_all::<&str>(&[]));
        selection.toggle("a1");
        assert!(selection.covers_all(&["a1"]));
        assert!(!selection.covers_all(&["a1", "a2"]));
        assert!(selection.covers_all(&["a2"]));
    }

    #[test]
    fn test_bulk_gate_threshold() {
        assert_eq!(BulkGate::evaluate(12, DEFAULT_CONFIRM_THRESHOLD), BulkGate::Confirm { pending: 12 });
        assert_eq!(BulkGate::evaluate(3, 3), BulkGate::Confirm { pending: 3 });
        assert_eq!(BulkGate::evaluate(2, 3), BulkGate::Immediate { pending: 2 });
    }
}
