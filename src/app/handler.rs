//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where operator intent turns into review
//! operations. It enforces the interaction rules that sit above the review
//! core:
//!
//! - Approve and reject apply only to a pending action
//! - While a dialog is open, only that dialog's events are accepted
//! - Bulk decisions at or above the threshold go through a confirmation dialog
//!
//! Notifications emitted by the review core are kept as the latest status line
//! and forwarded to the runtime as [`Action::Notify`].
//!
//! # Example
//!
//! ```rust
//! use zapprove::app::{handle_event, AppState, Event};
//! use zapprove::store::{EmbeddedSeed, SeedSource};
//! use zapprove::ui::Theme;
//!
//! let mut state = AppState::new(EmbeddedSeed.load()?, Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::ApproveFocused)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), zapprove::ReviewError>(())
//! ```

use super::modes::{Decision, InputMode, Modal, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::ActionStatus;
use crate::review::{BulkGate, Notification};

/// Operator intents, produced by the key map or by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down (wraps to top).
    KeyDown,
    /// Moves the cursor up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Approves the action in the details dialog, or the focused one.
    ApproveFocused,
    /// Rejects the action in the details dialog, or the focused one.
    RejectFocused,
    /// Opens the details dialog for the focused action.
    OpenDetails,

    /// Toggles selection of the focused action.
    ToggleSelection,
    /// Select-all scoped to the visible list (clears if already all selected).
    SelectAllVisible,
    ClearSelection,
    /// Bulk-approves the pending part of the selection.
    BulkApprove,
    /// Bulk-rejects the pending part of the selection.
    BulkReject,
    /// Reverts the latest status change.
    Undo,

    CycleStatusFilter,
    CycleTypeFilter,
    CycleSort,
    /// Switches between Review and History.
    ToggleHistory,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input (from navigating).
    FocusSearchBar,
    /// Focuses the filtered list (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Clears the search and returns to normal mode.
    Escape,

    /// Accepts the open confirmation dialog.
    Confirm,
    /// Closes the open dialog without acting.
    Cancel,
}

impl Event {
    /// Whether the event is handled while `modal` is open.
    fn allowed_in(self, modal: &Modal) -> bool {
        match modal {
            Modal::Details { .. } => {
                matches!(self, Self::ApproveFocused | Self::RejectFocused | Self::Undo | Self::Cancel)
            }
            Modal::ConfirmBulk { .. } => matches!(self, Self::Confirm | Self::Cancel),
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. `should_render` is `false` when the event
/// changed nothing visible.
///
/// # Errors
///
/// The review operations themselves are total; the `Result` keeps the
/// handler signature stable for the runtime.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if let Some(modal) = &state.modal {
        if !event.allowed_in(modal) {
            tracing::trace!(modal = ?modal, "event ignored while dialog is open");
            return Ok((false, vec![]));
        }
    }

    match event {
        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::ApproveFocused => Ok(decide_one(state, Decision::Approve)),
        Event::RejectFocused => Ok(decide_one(state, Decision::Reject)),
        Event::OpenDetails => {
            let Some(action_id) = state.focused_action().map(|a| a.id.clone()) else {
                tracing::debug!("no action focused");
                return Ok((false, vec![]));
            };
            tracing::debug!(action_id = %action_id, "opening details");
            state.modal = Some(Modal::Details { action_id });
            Ok((true, vec![]))
        }

        Event::ToggleSelection => {
            let Some(id) = state.focused_action().map(|a| a.id.clone()) else {
                return Ok((false, vec![]));
            };
            state.review.toggle_selection(&id);
            tracing::debug!(action_id = %id, selected = state.review.selection().len(), "selection toggled");
            Ok((true, vec![]))
        }
        Event::SelectAllVisible => {
            let visible = state.visible_ids();
            state.review.select_all(visible);
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            if state.review.selection().is_empty() {
                return Ok((false, vec![]));
            }
            state.review.clear_selection();
            Ok((true, vec![]))
        }
        Event::BulkApprove => Ok(request_bulk(state, Decision::Approve)),
        Event::BulkReject => Ok(request_bulk(state, Decision::Reject)),
        Event::Undo => {
            let mut sink = Vec::new();
            if state.review.undo(&mut sink).is_none() {
                tracing::debug!("undo with empty history");
                return Ok((false, vec![]));
            }
            state.clamp_cursor();
            Ok((true, publish(state, sink)))
        }

        Event::CycleStatusFilter => {
            state.cycle_status_filter();
            Ok((true, vec![]))
        }
        Event::CycleTypeFilter => {
            state.cycle_type_filter();
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            state.cycle_sort();
            Ok((true, vec![]))
        }
        Event::ToggleHistory => {
            state.toggle_view_mode();
            Ok((true, vec![]))
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.criteria.search_query.clear();
            state.clamp_cursor();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.criteria.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            let was_searching = matches!(state.input_mode, InputMode::Search(_))
                || !state.criteria.search_query.is_empty();
            if !was_searching {
                return Ok((false, vec![]));
            }
            tracing::debug!(query = %state.criteria.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.criteria.search_query.clear();
            state.clamp_cursor();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.criteria.search_query.push(*c);
            tracing::trace!(query = %state.criteria.search_query, "search query updated");
            state.cursor = 0;
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.criteria.search_query.pop();
            state.clamp_cursor();
            Ok((true, vec![]))
        }

        Event::Confirm => {
            let Some(Modal::ConfirmBulk { decision, .. }) = state.modal.take() else {
                return Ok((false, vec![]));
            };
            Ok((true, execute_bulk(state, decision)))
        }
        Event::Cancel => {
            let closed = state.modal.take();
            tracing::debug!(modal = ?closed, "dialog closed");
            Ok((closed.is_some(), vec![]))
        }
    }
}

/// Approves or rejects the dialog's action, or the focused one, if it is pending.
fn decide_one(state: &mut AppState, decision: Decision) -> (bool, Vec<Action>) {
    let target = match &state.modal {
        Some(Modal::Details { action_id }) => state.review.get(action_id),
        _ => state.focused_action(),
    };

    let to = match decision {
        Decision::Approve => ActionStatus::Approved,
        Decision::Reject => ActionStatus::Rejected,
    };

    let Some(id) = target
        .filter(|action| action.status.can_transition_to(to))
        .map(|action| action.id.clone())
    else {
        tracing::debug!(decision = ?decision, "no pending action to decide");
        return (false, vec![]);
    };

    let mut sink = Vec::new();
    match decision {
        Decision::Approve => state.review.approve(&id, &mut sink),
        Decision::Reject => state.review.reject(&id, &mut sink),
    };

    state.modal = None;
    state.clamp_cursor();
    (true, publish(state, sink))
}

/// Runs the bulk gate: disabled, immediate, or confirmation dialog.
fn request_bulk(state: &mut AppState, decision: Decision) -> (bool, Vec<Action>) {
    match state.review.bulk_gate(state.settings.confirm_threshold) {
        BulkGate::Disabled => {
            tracing::debug!(decision = ?decision, "bulk ignored, no pending selection");
            (false, vec![])
        }
        BulkGate::Immediate { pending } => {
            tracing::debug!(decision = ?decision, pending, "bulk executes immediately");
            (true, execute_bulk(state, decision))
        }
        BulkGate::Confirm { pending } => {
            tracing::debug!(decision = ?decision, pending, "bulk requires confirmation");
            state.modal = Some(Modal::ConfirmBulk { decision, pending });
            (true, vec![])
        }
    }
}

fn execute_bulk(state: &mut AppState, decision: Decision) -> Vec<Action> {
    let mut sink = Vec::new();
    let count = match decision {
        Decision::Approve => state.review.bulk_approve_selected(&mut sink),
        Decision::Reject => state.review.bulk_reject_selected(&mut sink),
    };
    tracing::debug!(decision = ?decision, count, "bulk decision executed");
    state.clamp_cursor();
    publish(state, sink)
}

/// Keeps the latest notification for the status line and forwards all of them.
fn publish(state: &mut AppState, notifications: Vec<Notification>) -> Vec<Action> {
    if let Some(latest) = notifications.last() {
        state.notification = Some(latest.clone());
    }
    notifications.into_iter().map(Action::Notify).collect()
}
