//! Side effects requested by the event handler.
//!
//! The handler mutates [`AppState`](super::AppState) directly and returns the
//! effects it cannot perform itself. The plugin runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use zapprove::app::Action;
//! use zapprove::review::Notification;
//!
//! let actions = vec![
//!     Action::Notify(Notification::approved("ACT-1001")),
//!     Action::CloseFocus,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::review::Notification;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Delivers a notification to the runtime's sink.
    ///
    /// The state already shows the latest notification in its status line;
    /// the runtime forwards it to the log.
    Notify(Notification),
}
