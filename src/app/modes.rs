//! Input, view, and modal state types for the application.
//!
//! These enums decide which keybindings are active and what the screen shows.
//!
//! # State Machine
//!
//! Input modes:
//! - **Normal**: Navigation and review commands
//! - **Search**: Query editing (`Typing`) or browsing the filtered list (`Navigating`)
//!
//! View modes:
//! - **Review**: Every action, default filter from configuration
//! - **History**: Decided (approved or rejected) actions only
//!
//! A [`Modal`] overlays either view. While one is open only its own keys apply.
//!
//! # Example
//!
//! ```rust
//! use zapprove::app::modes::{Decision, InputMode, Modal, SearchFocus, ViewMode};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let view_mode = ViewMode::Review;
//! let modal = Modal::ConfirmBulk { decision: Decision::Approve, pending: 12 };
//! assert!(modal.is_confirmation());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    Typing,

    /// Keystrokes drive the filtered list; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Review commands: a/r decide, Space selects, A/R bulk, u undo, f/t/o filters.
    Normal,

    /// Search query is shown and applied; see [`SearchFocus`].
    Search(SearchFocus),
}

/// Which slice of the collection the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All actions, filtered by the criteria.
    Review,

    /// Decided actions only.
    History,
}

impl ViewMode {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Review => "Agent Actions",
            Self::History => "Action History",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Review => Self::History,
            Self::History => Self::Review,
        }
    }
}

/// Operator decision applied to one or many actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Infinitive verb for prompts, e.g. "approve".
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Dialog overlaying the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Full details of one action; `a`/`r` decide it if pending.
    Details { action_id: String },

    /// Confirmation for a bulk decision at or above the threshold.
    ConfirmBulk { decision: Decision, pending: usize },
}

impl Modal {
    #[must_use]
    pub const fn is_confirmation(&self) -> bool {
        matches!(self, Self::ConfirmBulk { .. })
    }
}
