//! Review operations over the action store.
//!
//! [`ReviewService`] is the single owner of the action collection, the undo
//! history, and the operator's selection. Every mutation goes through it, so
//! the three can never disagree. Notifications are pushed to a caller-supplied
//! [`NotificationSink`] and never awaited.

use crate::domain::{ActionStatus, AgentAction};
use crate::store::{ActionStore, HistoryEntry, UndoHistory};

use super::notification::{Notification, NotificationSink};
use super::projection::{project, project_decided, FilterCriteria, StatusCounts};
use super::selection::{BulkGate, SelectionSet};

/// Owns review state and implements approve, reject, undo, and bulk decisions.
#[derive(Debug, Clone, Default)]
pub struct ReviewService {
    store: ActionStore,
    history: UndoHistory,
    selection: SelectionSet,
}

impl ReviewService {
    /// Creates a service over the seed list with empty history and selection.
    #[must_use]
    pub fn new(actions: Vec<AgentAction>) -> Self {
        Self {
            store: ActionStore::new(actions),
            history: UndoHistory::new(),
            selection: SelectionSet::new(),
        }
    }

    /// All actions, in seed order.
    #[must_use]
    pub fn actions(&self) -> &[AgentAction] {
        self.store.all()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AgentAction> {
        self.store.get(id)
    }

    #[must_use]
    pub fn store(&self) -> &ActionStore {
        &self.store
    }

    #[must_use]
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Global status totals, independent of any filter.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.store.all())
    }

    /// Filtered and sorted view of all actions.
    #[must_use]
    pub fn view(&self, criteria: &FilterCriteria) -> Vec<&AgentAction> {
        project(self.store.all(), criteria)
    }

    /// Filtered and sorted view of decided actions only.
    #[must_use]
    pub fn decided_view(&self, criteria: &FilterCriteria) -> Vec<&AgentAction> {
        project_decided(self.store.all(), criteria)
    }

    /// Sets the status of `id`, recording the change for undo.
    ///
    /// The primitive is unrestricted: any status may be written. Returns
    /// `false` (and records nothing) if the id is unknown or the status is
    /// unchanged.
    pub fn set_status(&mut self, id: &str, status: ActionStatus) -> bool {
        match self.store.apply_status(id, status) {
            Some(entry) => {
                self.history.record(entry.action, entry.previous_status);
                true
            }
            None => false,
        }
    }

    /// Approves one action.
    ///
    /// Emits a success notification with undo affordance and drops the id from
    /// the selection. An unknown id is a no-op. Returns whether the status
    /// changed.
    pub fn approve(&mut self, id: &str, sink: &mut dyn NotificationSink) -> bool {
        self.decide(id, ActionStatus::Approved, sink)
    }

    /// Rejects one action. Mirror of [`ReviewService::approve`].
    pub fn reject(&mut self, id: &str, sink: &mut dyn NotificationSink) -> bool {
        self.decide(id, ActionStatus::Rejected, sink)
    }

    fn decide(&mut self, id: &str, status: ActionStatus, sink: &mut dyn NotificationSink) -> bool {
        let _span = tracing::debug_span!("decide", action_id = %id, status = %status).entered();

        if !self.store.contains(id) {
            tracing::debug!("decision ignored, unknown action");
            return false;
        }

        let changed = self.set_status(id, status);
        self.selection.remove(id);

        let notification = match status {
            ActionStatus::Rejected => Notification::rejected(id),
            _ => Notification::approved(id),
        };
        sink.notify(notification);

        changed
    }

    /// Reverts the most recent status change across all actions.
    ///
    /// The reversal itself is not recorded, so repeated undo walks further
    /// back. The selection is left alone. With empty history this does nothing
    /// and emits nothing.
    pub fn undo(&mut self, sink: &mut dyn NotificationSink) -> Option<HistoryEntry> {
        let entry = self.history.pop_last()?;

        let _span = tracing::debug_span!("undo",
            action_id = %entry.action_id(),
            restore_to = %entry.previous_status
        )
        .entered();

        self.store.restore_status(entry.action_id(), entry.previous_status);
        sink.notify(Notification::undone());

        Some(entry)
    }

    /// Approves every still-pending action among `ids`, in the given order.
    ///
    /// Non-pending and unknown ids are skipped. Emits one aggregate
    /// notification with the number approved (possibly zero) and clears the
    /// selection.
    pub fn bulk_approve<S: AsRef<str>>(&mut self, ids: &[S], sink: &mut dyn NotificationSink) -> usize {
        let count = self.bulk_decide(ids, ActionStatus::Approved);
        sink.notify(Notification::bulk_approved(count));
        count
    }

    /// Rejects every still-pending action among `ids`. Mirror of
    /// [`ReviewService::bulk_approve`].
    pub fn bulk_reject<S: AsRef<str>>(&mut self, ids: &[S], sink: &mut dyn NotificationSink) -> usize {
        let count = self.bulk_decide(ids, ActionStatus::Rejected);
        sink.notify(Notification::bulk_rejected(count));
        count
    }

    fn bulk_decide<S: AsRef<str>>(&mut self, ids: &[S], status: ActionStatus) -> usize {
        let _span = tracing::debug_span!("bulk_decide", status = %status, requested = ids.len()).entered();

        let mut count = 0;
        for id in ids {
            let id: &str = id.as_ref();
            let is_pending = self.store.status_of(id).is_some_and(ActionStatus::is_pending);
            if is_pending && self.set_status(id, status) {
                count += 1;
            }
        }

        self.selection.clear();
        tracing::debug!(count, "bulk decision applied");
        count
    }

    /// Bulk-approves the current selection.
    pub fn bulk_approve_selected(&mut self, sink: &mut dyn NotificationSink) -> usize {
        let ids = self.selection.pending_ids(&self.store);
        self.bulk_approve(&ids, sink)
    }

    /// Bulk-rejects the current selection.
    pub fn bulk_reject_selected(&mut self, sink: &mut dyn NotificationSink) -> usize {
        let ids = self.selection.pending_ids(&self.store);
        self.bulk_reject(&ids, sink)
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// Select-all scoped to `visible_ids`; see [`SelectionSet::select_all`].
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selection.select_all(visible_ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Number of selected actions that are still pending.
    #[must_use]
    pub fn pending_selected_count(&self) -> usize {
        self.selection.pending_count(&self.store)
    }

    /// What a bulk gesture should do for the current selection.
    #[must_use]
    pub fn bulk_gate(&self, confirm_threshold: usize) -> BulkGate {
        BulkGate::evaluate(self.pending_selected_count(), confirm_threshold)
    }
}
