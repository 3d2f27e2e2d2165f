//! Key bindings.
//!
//! Translates a runtime-independent [`Key`] into an [`Event`] given the current
//! mode. The plugin shim converts Zellij key events into [`Key`] and feeds
//! them through [`map_key`].
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up` (or `Ctrl+n`/`Ctrl+p`): Move cursor
//! - `a` / `r`: Approve / reject focused action
//! - `Enter`: Open details
//! - `Space`: Toggle selection, `x`: select all visible, `c`: clear selection
//! - `A` / `R`: Bulk approve / reject selection
//! - `u`: Undo
//! - `f` / `t` / `o`: Cycle status filter / type filter / sort
//! - `h`: Toggle history view
//! - `/`: Search
//! - `q`: Close plugin
//!
//! Search mode, typing: characters edit the query, `Enter` browses results,
//! `Esc` exits. Search mode, navigating: normal keys plus `/` to edit the
//! query again and `Esc` to exit.
//!
//! Details dialog: `a`/`r` decide, `u` undo, `Esc`/`q`/`Enter` close.
//! Confirmation dialog: `y`/`Enter` confirm, `n`/`Esc`/`q` cancel.

use super::handler::Event;
use super::modes::{InputMode, Modal, SearchFocus};
use super::AppState;

/// A key press, independent of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Up,
    Down,
    Backspace,
}

/// Maps a key press to an event for the current state, if it is bound.
#[must_use]
pub fn map_key(state: &AppState, key: Key) -> Option<Event> {
    tracing::trace!(key = ?key, input_mode = ?state.input_mode, "mapping key");

    if let Some(modal) = &state.modal {
        return map_modal_key(modal, key);
    }

    match key {
        Key::Ctrl('n') | Key::Down => return Some(Event::KeyDown),
        Key::Ctrl('p') | Key::Up => return Some(Event::KeyUp),
        _ => {}
    }

    match state.input_mode {
        InputMode::Search(SearchFocus::Typing) => map_typing_key(key),
        InputMode::Search(SearchFocus::Navigating) => match key {
            Key::Char('/') => Some(Event::FocusSearchBar),
            Key::Esc => Some(Event::ExitSearch),
            Key::Char('q') => None,
            other => map_normal_key(other),
        },
        InputMode::Normal => map_normal_key(key),
    }
}

fn map_modal_key(modal: &Modal, key: Key) -> Option<Event> {
    match modal {
        Modal::Details { .. } => match key {
            Key::Char('a') => Some(Event::ApproveFocused),
            Key::Char('r') => Some(Event::RejectFocused),
            Key::Char('u') => Some(Event::Undo),
            Key::Esc | Key::Enter | Key::Char('q') => Some(Event::Cancel),
            _ => None,
        },
        Modal::ConfirmBulk { .. } => match key {
            Key::Char('y') | Key::Enter => Some(Event::Confirm),
            Key::Char('n') | Key::Esc | Key::Char('q') => Some(Event::Cancel),
            _ => None,
        },
    }
}

const fn map_typing_key(key: Key) -> Option<Event> {
    match key {
        Key::Esc => Some(Event::ExitSearch),
        Key::Enter => Some(Event::FocusResults),
        Key::Backspace => Some(Event::Backspace),
        Key::Char(c) => Some(Event::Char(c)),
        _ => None,
    }
}

const fn map_normal_key(key: Key) -> Option<Event> {
    Some(match key {
        Key::Char('j') => Event::KeyDown,
        Key::Char('k') => Event::KeyUp,
        Key::Char('a') => Event::ApproveFocused,
        Key::Char('r') => Event::RejectFocused,
        Key::Enter => Event::OpenDetails,
        Key::Char(' ') => Event::ToggleSelection,
        Key::Char('x') => Event::SelectAllVisible,
        Key::Char('c') => Event::ClearSelection,
        Key::Char('A') => Event::BulkApprove,
        Key::Char('R') => Event::BulkReject,
        Key::Char('u') => Event::Undo,
        Key::Char('f') => Event::CycleStatusFilter,
        Key::Char('t') => Event::CycleTypeFilter,
        Key::Char('o') => Event::CycleSort,
        Key::Char('h') => Event::ToggleHistory,
        Key::Char('/') => Event::SearchMode,
        Key::Char('q') => Event::CloseFocus,
        Key::Esc => Event::Escape,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::Decision;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(vec![], Theme::default())
    }

    #[test]
    fn test_normal_bindings() {
        let state = state();
        assert_eq!(map_key(&state, Key::Char('a')), Some(Event::ApproveFocused));
        assert_eq!(map_key(&state, Key::Char('R')), Some(Event::BulkReject));
        assert_eq!(map_key(&state, Key::Char(' ')), Some(Event::ToggleSelection));
        assert_eq!(map_key(&state, Key::Enter), Some(Event::OpenDetails));
        assert_eq!(map_key(&state, Key::Ctrl('n')), Some(Event::KeyDown));
        assert_eq!(map_key(&state, Key::Char('z')), None);
    }

    #[test]
    fn test_typing_captures_letters() {
        let mut state = state();
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        assert_eq!(map_key(&state, Key::Char('a')), Some(Event::Char('a')));
        assert_eq!(map_key(&state, Key::Char('q')), Some(Event::Char('q')));
        assert_eq!(map_key(&state, Key::Enter), Some(Event::FocusResults));
        assert_eq!(map_key(&state, Key::Down), Some(Event::KeyDown));
    }

    #[test]
    fn test_navigating_uses_review_keys() {
        let mut state = state();
        state.input_mode = InputMode::Search(SearchFocus::Navigating);
        assert_eq!(map_key(&state, Key::Char('r')), Some(Event::RejectFocused));
        assert_eq!(map_key(&state, Key::Char('/')), Some(Event::FocusSearchBar));
        assert_eq!(map_key(&state, Key::Esc), Some(Event::ExitSearch));
    }

    #[test]
    fn test_modal_bindings_replace_global_ones() {
        let mut state = state();
        state.modal = Some(Modal::ConfirmBulk { decision: Decision::Reject, pending: 11 });
        assert_eq!(map_key(&state, Key::Char('y')), Some(Event::Confirm));
        assert_eq!(map_key(&state, Key::Char('j')), None);
        assert_eq!(map_key(&state, Key::Down), None);

        state.modal = Some(Modal::Details { action_id: "a1".to_string() });
        assert_eq!(map_key(&state, Key::Char('a')), Some(Event::ApproveFocused));
        assert_eq!(map_key(&state, Key::Esc), Some(Event::Cancel));
        assert_eq!(map_key(&state, Key::Char(' ')), None);
    }
}
