//! Agent action domain model.
//!
//! An [`AgentAction`] is an operation proposed by an external AI agent (send an
//! email, call an API, write to a database...) that waits for a human decision.
//! Identity, description, target and creation time never change; only the
//! [`ActionStatus`] moves through the review lifecycle:
//!
//! ```text
//!            approve              undo
//!   pending ─────────▶ approved ─────────▶ pending
//!      │
//!      │ reject               undo
//!      └─────────────▶ rejected ─────────▶ pending
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ReviewError;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Kind of external operation an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Email,
    ApiCall,
    Database,
    Notification,
    FileOperation,
    Integration,
}

impl ActionType {
    /// Every action type, in display order.
    pub const ALL: [Self; 6] = [
        Self::Email,
        Self::ApiCall,
        Self::Database,
        Self::Notification,
        Self::FileOperation,
        Self::Integration,
    ];

    /// Wire name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::ApiCall => "api_call",
            Self::Database => "database",
            Self::Notification => "notification",
            Self::FileOperation => "file_operation",
            Self::Integration => "integration",
        }
    }

    /// Short badge label shown in the list and details view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::ApiCall => "API Call",
            Self::Database => "Database",
            Self::Notification => "Notification",
            Self::FileOperation => "File Op",
            Self::Integration => "Integration",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Approved,
    Rejected,
}

impl ActionStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Wire name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Capitalized label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the review lifecycle allows moving from `self` to `to`.
    ///
    /// Approve and reject only leave `pending`; undo only returns to it.
    /// The store's raw status primitive does not consult this table, the
    /// interactive layer uses it to decide which controls are live.
    ///
    /// # Examples
    ///
    /// ```
    /// use zapprove::domain::ActionStatus;
    ///
    /// assert!(ActionStatus::Pending.can_transition_to(ActionStatus::Approved));
    /// assert!(ActionStatus::Rejected.can_transition_to(ActionStatus::Pending));
    /// assert!(!ActionStatus::Approved.can_transition_to(ActionStatus::Rejected));
    /// ```
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Pending)
                | (Self::Rejected, Self::Pending)
        )
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ReviewError::Config(format!("unknown action status: {other}"))),
        }
    }
}

/// Informational data attached by the agent. Never drives review logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    /// Agent confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Label of the agent or pipeline that proposed the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Free-form details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Names of other entities the action touches, in agent order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_entities: Vec<String>,
}

impl ActionMetadata {
    /// Confidence as a rounded percentage, clamped to `0..=100`.
    ///
    /// ```
    /// use zapprove::domain::ActionMetadata;
    ///
    /// let meta = ActionMetadata { confidence: Some(0.876), ..Default::default() };
    /// assert_eq!(meta.confidence_percent(), Some(88));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> Option<u8> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

/// An action proposed by an agent and awaiting (or having received) a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    /// Unique identifier, stable for the action's lifetime.
    pub id: String,
    /// Human-readable summary.
    pub description: String,
    /// Name of the resource or system the action targets.
    pub entity: String,
    pub action_type: ActionType,
    /// Creation instant, used for ordering.
    pub timestamp: DateTime<Utc>,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActionMetadata>,
}

impl AgentAction {
    /// Creates a pending action without metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use zapprove::domain::{ActionType, AgentAction};
    ///
    /// let action = AgentAction::new(
    ///     "a1",
    ///     "Send invoice to Acme",
    ///     "Acme Corp",
    ///     ActionType::Email,
    ///     chrono::Utc::now(),
    /// );
    /// assert!(action.is_pending());
    /// assert!(action.metadata.is_none());
    /// ```
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        entity: impl Into<String>,
        action_type: ActionType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            entity: entity.into(),
            action_type,
            timestamp,
            status: ActionStatus::Pending,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: ActionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Case-insensitive substring match against description, entity, or id.
    ///
    /// `lowered_query` must already be lowercase. Checks stop at the first hit.
    #[must_use]
    pub fn matches_query(&self, lowered_query: &str) -> bool {
        self.description.to_lowercase().contains(lowered_query)
            || self.entity.to_lowercase().contains(lowered_query)
            || self.id.to_lowercase().contains(lowered_query)
    }

    /// Returns how long ago the action was created, relative to now.
    ///
    /// See [`AgentAction::time_ago_at`] for the format.
    #[must_use]
    pub fn time_ago(&self) -> String {
        self.time_ago_at(Utc::now())
    }

    /// Returns how long before `now` the action was created.
    ///
    /// - Less than 1 minute (or in the future): "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use zapprove::domain::{ActionType, AgentAction};
    ///
    /// let now = Utc::now();
    /// let action = AgentAction::new("a1", "d", "e", ActionType::Email, now - Duration::minutes(5));
    /// assert_eq!(action.time_ago_at(now), "5m ago");
    /// ```
    #[must_use]
    pub fn time_ago_at(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.timestamp).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(ts: DateTime<Utc>) -> AgentAction {
        AgentAction::new("ACT-042", "Send Invoice to Acme", "Acme Corp", ActionType::Email, ts)
    }

    #[test]
    fn test_transition_table() {
        use ActionStatus::{Approved, Pending, Rejected};

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Pending));
        assert!(Rejected.can_transition_to(Pending));

        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        for status in ActionStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Approved".parse::<ActionStatus>().unwrap(), ActionStatus::Approved);
        assert_eq!(" pending ".parse::<ActionStatus>().unwrap(), ActionStatus::Pending);
        assert!("done".parse::<ActionStatus>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ActionType::FileOperation).unwrap();
        assert_eq!(json, "\"file_operation\"");
        let status: ActionStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, ActionStatus::Rejected);
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let action = sample(Utc::now());
        assert!(action.matches_query("invoice"));
        assert!(action.matches_query("acme corp"));
        assert!(action.matches_query("act-042"));
        assert!(!action.matches_query("database"));
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(sample(now - Duration::seconds(10)).time_ago_at(now), "just now");
        assert_eq!(sample(now + Duration::minutes(3)).time_ago_at(now), "just now");
        assert_eq!(sample(now - Duration::minutes(59)).time_ago_at(now), "59m ago");
        assert_eq!(sample(now - Duration::hours(3)).time_ago_at(now), "3h ago");
        assert_eq!(sample(now - Duration::days(2)).time_ago_at(now), "2d ago");
    }

    #[test]
    fn test_confidence_percent_clamps() {
        let high = ActionMetadata { confidence: Some(1.7), ..Default::default() };
        let low = ActionMetadata { confidence: Some(-0.2), ..Default::default() };
        let none = ActionMetadata::default();
        assert_eq!(high.confidence_percent(), Some(100));
        assert_eq!(low.confidence_percent(), Some(0));
        assert_eq!(none.confidence_percent(), None);
    }
}
