//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the review core. Key presses
//! become [`Event`]s, the handler applies them to [`AppState`], and the
//! resulting [`Action`]s are executed by the runtime.
//!
//! # Architecture
//!
//! ```text
//! Key → map_key → Event → handle_event → ReviewService → Actions → Side Effects
//!                               │
//!                               └──→ AppState → compute_viewmodel → render
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and interaction rules
//! - [`keymap`]: Key bindings per mode
//! - [`modes`]: Input, view, and dialog state types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use zapprove::app::{handle_event, AppState, Event};
//! use zapprove::ui::Theme;
//!
//! let mut state = AppState::new(vec![], Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zapprove::ReviewError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keymap::{map_key, Key};
pub use modes::{Decision, InputMode, Modal, SearchFocus, ViewMode};
pub use state::{AppState, ReviewSettings};
