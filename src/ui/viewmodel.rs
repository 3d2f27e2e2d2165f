//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every review
//! rule has already been applied by the time one is built.
//!
//! # Example
//!
//! ```rust
//! use zapprove::domain::ActionStatus;
//! use zapprove::review::StatusCounts;
//! use zapprove::ui::viewmodel::*;
//!
//! let vm = UIViewModel {
//!     display_items: vec![DisplayItem {
//!         id: "ACT-1001".to_string(),
//!         description: "Send invoice #4821 to Acme Corp".to_string(),
//!         entity: "Acme Corp".to_string(),
//!         type_label: "Email",
//!         status: ActionStatus::Pending,
//!         time_ago: "4m ago".to_string(),
//!         is_focused: true,
//!         is_checked: false,
//!         highlight_ranges: vec![(5, 12)],
//!     }],
//!     selected_index: 0,
//!     header: HeaderInfo {
//!         title: "Agent Actions".to_string(),
//!         counts: StatusCounts { pending: 1, approved: 0, rejected: 0 },
//!     },
//!     filters: FilterBarInfo {
//!         status_label: "Pending",
//!         type_label: "All Types",
//!         sort_label: "Newest first",
//!         visible: 1,
//!         selected: 0,
//!         all_selected: false,
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     empty_state: None,
//!     search_bar: None,
//!     modal: None,
//!     toast: None,
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

use crate::domain::ActionStatus;
use crate::review::{Severity, StatusCounts};

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the focused row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub filters: FilterBarInfo,

    pub footer: FooterInfo,

    /// Shown in place of the table when nothing matches.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Dialog drawn over the table.
    pub modal: Option<ModalView>,

    /// Latest notification.
    pub toast: Option<ToastInfo>,
}

/// One action row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub id: String,

    /// Description, truncated to the available width.
    pub description: String,

    pub entity: String,

    pub type_label: &'static str,

    pub status: ActionStatus,

    /// Relative creation time, e.g. "5m ago".
    pub time_ago: String,

    /// Whether the cursor is on this row.
    pub is_focused: bool,

    /// Whether the action is in the operator's selection.
    pub is_checked: bool,

    /// Search matches in `description` as `(start, end)` character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title line with global counts.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Totals over the whole collection, independent of filters.
    pub counts: StatusCounts,
}

/// Active criteria and selection summary.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub status_label: &'static str,
    pub type_label: &'static str,
    pub sort_label: &'static str,

    /// Number of actions passing the filters.
    pub visible: usize,

    /// Number of selected actions, visible or not.
    pub selected: usize,

    /// Selection equals the visible set and it is non-empty.
    pub all_selected: bool,
}

/// Keybinding hints.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when the filtered list is empty.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input box.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}

/// Dialog contents.
#[derive(Debug, Clone)]
pub enum ModalView {
    Details(DetailsView),
    Confirm(ConfirmView),
}

/// Everything known about one action.
#[derive(Debug, Clone)]
pub struct DetailsView {
    pub id: String,
    pub description: String,
    pub entity: String,
    pub type_label: &'static str,
    pub status: ActionStatus,

    /// Absolute creation time, UTC.
    pub timestamp: String,
    pub time_ago: String,

    /// Rounded percentage; `None` when absent or hidden by configuration.
    pub confidence: Option<u8>,
    pub source: Option<String>,
    pub details: Option<String>,
    pub related_entities: Vec<String>,

    /// Whether approve/reject are offered (action is pending).
    pub can_decide: bool,
}

/// Bulk confirmation prompt.
#[derive(Debug, Clone)]
pub struct ConfirmView {
    pub title: String,
    pub message: String,
}

/// Status line for the latest notification.
#[derive(Debug, Clone)]
pub struct ToastInfo {
    pub severity: Severity,
    pub message: String,
    pub description: Option<String>,

    /// Render the `u` undo hint.
    pub offers_undo: bool,
}
