//! Domain layer for the zapprove plugin.
//!
//! Core types for agent actions and their review lifecycle, independent of
//! Zellij APIs, rendering, or where the actions come from.
//!
//! # Organization
//!
//! - [`action`]: `AgentAction`, its type, status, and metadata
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use zapprove::domain::{ActionStatus, ActionType, AgentAction, Result};
//!
//! fn propose() -> Result<AgentAction> {
//!     Ok(AgentAction::new(
//!         "a1",
//!         "Sync CRM contacts",
//!         "Salesforce",
//!         ActionType::Integration,
//!         chrono::Utc::now(),
//!     ))
//! }
//!
//! assert_eq!(propose()?.status, ActionStatus::Pending);
//! # Ok::<(), zapprove::ReviewError>(())
//! ```

pub mod action;
pub mod error;

pub use action::{ActionMetadata, ActionStatus, ActionType, AgentAction};
pub use error::{Result, ReviewError};
