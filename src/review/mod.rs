//! Review core: decisions, undo, selection, and filtered views.
//!
//! # Modules
//!
//! - `service`: [`ReviewService`], the owner of actions, history and selection
//! - `projection`: Pure filter/search/sort pipeline and status counts
//! - `selection`: Operator selection and the bulk confirmation gate
//! - `notification`: Notifications and the sinks that receive them

pub mod notification;
pub mod projection;
pub mod selection;
pub mod service;

pub use notification::{Notification, NotificationSink, Severity, TracingSink};
pub use projection::{
    project, project_decided, FilterCriteria, SortOrder, StatusCounts, StatusFilter, TypeFilter,
};
pub use selection::{BulkGate, SelectionSet, DEFAULT_CONFIRM_THRESHOLD};
pub use service::ReviewService;
