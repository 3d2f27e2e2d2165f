//! Seed data sources for the action store.
//!
//! The plugin does not talk to a live agent backend. Actions are loaded once at
//! startup from a [`SeedSource`] and then live only in memory.
//!
//! # Seed Format
//!
//! A JSON array of records. Each record carries either an absolute RFC 3339
//! `timestamp` or a `minutes_ago` offset resolved against the load time, so a
//! bundled demo list keeps meaningful relative times.
//!
//! ```json
//! [
//!   {
//!     "id": "ACT-1001",
//!     "description": "Send invoice #4821 to Acme Corp",
//!     "entity": "Acme Corp",
//!     "action_type": "email",
//!     "minutes_ago": 4,
//!     "metadata": { "confidence": 0.94, "source": "billing-agent" }
//!   },
//!   {
//!     "id": "ACT-1002",
//!     "description": "Drop stale sessions table rows",
//!     "entity": "Postgres",
//!     "action_type": "database",
//!     "timestamp": "2025-01-12T09:30:00Z",
//!     "status": "approved"
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ReviewError};
use crate::domain::{ActionMetadata, ActionStatus, ActionType, AgentAction};

/// Bundled demo actions used when no seed file is configured.
const EMBEDDED_SEED: &str = include_str!("../../seed/actions.json");

/// Supplies the initial ordered action list.
///
/// # Implementations
///
/// - [`EmbeddedSeed`]: Demo list compiled into the plugin (default)
/// - [`JsonFileSeed`]: JSON file on the host filesystem
pub trait SeedSource {
    /// Loads the seed list.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or parsed, or if two
    /// records share an id.
    fn load(&self) -> Result<Vec<AgentAction>>;
}

/// On-disk representation of a seeded action.
///
/// Separate from [`AgentAction`] so the file format can express relative
/// timestamps and omit the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub id: String,
    pub description: String,
    pub entity: String,
    pub action_type: ActionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_ago: Option<i64>,

    #[serde(default = "default_status")]
    pub status: ActionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActionMetadata>,
}

const fn default_status() -> ActionStatus {
    ActionStatus::Pending
}

impl SeedRecord {
    /// Resolves the record into an action, anchoring relative times at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Seed`] when neither `timestamp` nor
    /// `minutes_ago` is present, or when `minutes_ago` lands outside the
    /// representable time range.
    pub fn into_action(self, now: DateTime<Utc>) -> Result<AgentAction> {
        let timestamp = match (self.timestamp, self.minutes_ago) {
            (Some(ts), _) => ts,
            (None, Some(minutes)) => Duration::try_minutes(minutes)
                .and_then(|ago| now.checked_sub_signed(ago))
                .ok_or_else(|| {
                    ReviewError::Seed(format!(
                        "action {} minutes_ago out of range: {minutes}",
                        self.id
                    ))
                })?,
            (None, None) => {
                return Err(ReviewError::Seed(format!(
                    "action {} has neither timestamp nor minutes_ago",
                    self.id
                )))
            }
        };

        Ok(AgentAction {
            id: self.id,
            description: self.description,
            entity: self.entity,
            action_type: self.action_type,
            timestamp,
            status: self.status,
            metadata: self.metadata,
        })
    }
}

/// Parses a JSON seed document into actions.
///
/// # Errors
///
/// Returns [`ReviewError::Seed`] for invalid JSON, unresolvable timestamps,
/// or duplicate ids.
pub fn parse_seed(json: &str, now: DateTime<Utc>) -> Result<Vec<AgentAction>> {
    let records: Vec<SeedRecord> = serde_json::from_str(json)
        .map_err(|e| ReviewError::Seed(format!("failed to parse seed JSON: {e}")))?;

    let actions = records
        .into_iter()
        .map(|record| record.into_action(now))
        .collect::<Result<Vec<_>>>()?;

    ensure_unique_ids(&actions)?;

    tracing::debug!(action_count = actions.len(), "seed parsed");
    Ok(actions)
}

fn ensure_unique_ids(actions: &[AgentAction]) -> Result<()> {
    let mut seen = HashSet::with_capacity(actions.len());
    for action in actions {
        if !seen.insert(action.id.as_str()) {
            return Err(ReviewError::Seed(format!("duplicate action id: {}", action.id)));
        }
    }
    Ok(())
}

/// Demo action list compiled into the plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSeed;

impl SeedSource for EmbeddedSeed {
    fn load(&self) -> Result<Vec<AgentAction>> {
        let _span = tracing::debug_span!("embedded_seed_load").entered();
        parse_seed(EMBEDDED_SEED, Utc::now())
    }
}

/// Seed list read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for JsonFileSeed {
    fn load(&self) -> Result<Vec<AgentAction>> {
        let _span = tracing::debug_span!("json_file_seed_load", path = ?self.path).entered();

        let contents = std::fs::read_to_string(&self.path)?;
        parse_seed(&contents, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_loads() {
        let actions = EmbeddedSeed.load().unwrap();
        assert!(actions.len() >= 12);
        assert!(actions.iter().all(AgentAction::is_pending));
        for action_type in ActionType::ALL {
            assert!(
                actions.iter().any(|a| a.action_type == action_type),
                "embedded seed lacks {action_type}"
            );
        }
    }

    #[test]
    fn test_minutes_ago_resolves_against_now() {
        let now = Utc::now();
        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"email","minutes_ago":30}]"#;
        let actions = parse_seed(json, now).unwrap();
        assert_eq!(actions[0].timestamp, now - Duration::minutes(30));
        assert_eq!(actions[0].status, ActionStatus::Pending);
    }

    #[test]
    fn test_absolute_timestamp_wins() {
        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"api_call",
            "timestamp":"2025-01-12T09:30:00Z","minutes_ago":5,"status":"approved"}]"#;
        let actions = parse_seed(json, Utc::now()).unwrap();
        assert_eq!(actions[0].timestamp.to_rfc3339(), "2025-01-12T09:30:00+00:00");
        assert_eq!(actions[0].status, ActionStatus::Approved);
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"email"}]"#;
        let err = parse_seed(json, Utc::now()).unwrap_err();
        assert!(matches!(err, ReviewError::Seed(_)));
    }

    #[test]
    fn test_out_of_range_minutes_ago_is_rejected() {
        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"email","minutes_ago":9223372036854775807}]"#;
        let err = parse_seed(json, Utc::now()).unwrap_err();
        assert!(matches!(err, ReviewError::Seed(_)));
        assert!(err.to_string().contains("out of range"));

        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"email","minutes_ago":-9223372036854775808}]"#;
        assert!(parse_seed(json, Utc::now()).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"a1","description":"d","entity":"e","action_type":"email","minutes_ago":1},
            {"id":"a1","description":"d","entity":"e","action_type":"email","minutes_ago":2}
        ]"#;
        let err = parse_seed(json, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("duplicate action id: a1"));
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let json = r#"[{"id":"a1","description":"d","entity":"e","action_type":"fax","minutes_ago":1}]"#;
        assert!(parse_seed(json, Utc::now()).is_err());
    }
}
