//! Fire-and-forget notifications emitted by review operations.
//!
//! The core never waits on or inspects what a sink does with a notification.
//! The undo affordance is a flag: a sink that renders it lets the operator
//! trigger the global undo, which reverses the latest change.

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    /// Headline, e.g. "Action approved".
    pub message: String,
    /// Optional second line.
    pub description: Option<String>,
    /// Whether the sink should offer an undo control.
    pub offers_undo: bool,
}

impl Notification {
    #[must_use]
    pub fn approved(id: &str) -> Self {
        Self {
            severity: Severity::Success,
            message: "Action approved".to_string(),
            description: Some(format!("Action {id} has been approved.")),
            offers_undo: true,
        }
    }

    #[must_use]
    pub fn rejected(id: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: "Action rejected".to_string(),
            description: Some(format!("Action {id} has been rejected.")),
            offers_undo: true,
        }
    }

    #[must_use]
    pub fn undone() -> Self {
        Self {
            severity: Severity::Info,
            message: "Action undone".to_string(),
            description: None,
            offers_undo: false,
        }
    }

    #[must_use]
    pub fn bulk_approved(count: usize) -> Self {
        Self {
            severity: Severity::Success,
            message: format!("{count} actions approved"),
            description: None,
            offers_undo: false,
        }
    }

    #[must_use]
    pub fn bulk_rejected(count: usize) -> Self {
        Self {
            severity: Severity::Error,
            message: format!("{count} actions rejected"),
            description: None,
            offers_undo: false,
        }
    }
}

/// One-way channel receiving notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in emission order.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: Notification) {
        tracing::info!(
            severity = ?notification.severity,
            message = %notification.message,
            description = ?notification.description,
            "notification"
        );
    }
}
