//! Filtered, searched, and sorted views over the action collection.
//!
//! The projection is a pure function of `(actions, criteria)`: it borrows the
//! collection, never mutates it, and is recomputed on demand rather than
//! cached, so it cannot drift from the store.
//!
//! # Pipeline
//!
//! Applied in this fixed order:
//!
//! 1. **Status**: keep all, or only one status
//! 2. **Type**: keep all, or only one action type
//! 3. **Search**: case-insensitive substring over description, entity, id
//! 4. **Sort**: newest first, oldest first, or by entity name
//!
//! Status counts are computed separately over the *whole* collection and do
//! not depend on the criteria.

use std::cmp::Ordering;

use crate::domain::{ActionStatus, ActionType, AgentAction};

/// Status part of the filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ActionStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: ActionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Next filter in the cycle `all → pending → approved → rejected → all`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(ActionStatus::Pending),
            Self::Only(ActionStatus::Pending) => Self::Only(ActionStatus::Approved),
            Self::Only(ActionStatus::Approved) => Self::Only(ActionStatus::Rejected),
            Self::Only(ActionStatus::Rejected) => Self::All,
        }
    }

    /// Next filter among decided statuses only: `all → approved → rejected → all`.
    #[must_use]
    pub const fn next_decided(self) -> Self {
        match self {
            Self::All | Self::Only(ActionStatus::Pending) => Self::Only(ActionStatus::Approved),
            Self::Only(ActionStatus::Approved) => Self::Only(ActionStatus::Rejected),
            Self::Only(ActionStatus::Rejected) => Self::All,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Status",
            Self::Only(status) => status.label(),
        }
    }
}

/// Action-type part of the filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ActionType),
}

impl TypeFilter {
    #[must_use]
    pub fn matches(self, action_type: ActionType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == action_type,
        }
    }

    /// Next filter: `all`, then each type in [`ActionType::ALL`] order, then `all`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(ActionType::ALL[0]),
            Self::Only(current) => ActionType::ALL
                .iter()
                .position(|t| *t == current)
                .and_then(|i| ActionType::ALL.get(i + 1))
                .map_or(Self::All, |t| Self::Only(*t)),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Types",
            Self::Only(action_type) => action_type.label(),
        }
    }
}

/// Ordering of the projected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Ascending by entity name.
    Entity,
}

impl SortOrder {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Entity,
            Self::Entity => Self::Newest,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::Entity => "By entity",
        }
    }

    fn compare(self, a: &AgentAction, b: &AgentAction) -> Ordering {
        match self {
            Self::Newest => b.timestamp.cmp(&a.timestamp),
            Self::Oldest => a.timestamp.cmp(&b.timestamp),
            Self::Entity => compare_entities(&a.entity, &b.entity),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = crate::domain::ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "entity" => Ok(Self::Entity),
            other => Err(crate::domain::ReviewError::Config(format!(
                "unknown sort order: {other}"
            ))),
        }
    }
}

/// Human-oriented entity ordering.
///
/// Case-insensitive first so `acme` sorts next to `Acme`, then by the raw
/// string so the order stays total.
fn compare_entities(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Criteria the consuming view owns and passes to [`project`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub action_type: TypeFilter,
    pub sort_by: SortOrder,
    pub search_query: String,
}

impl FilterCriteria {
    /// Whether any filter narrows the list (sort order does not count).
    #[must_use]
    pub fn is_narrowing(&self) -> bool {
        self.status != StatusFilter::All
            || self.action_type != TypeFilter::All
            || !self.search_query.is_empty()
    }
}

/// Global per-status totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Counts statuses over the full, unfiltered collection.
    #[must_use]
    pub fn tally(actions: &[AgentAction]) -> Self {
        actions.iter().fold(Self::default(), |mut counts, action| {
            match action.status {
                ActionStatus::Pending => counts.pending += 1,
                ActionStatus::Approved => counts.approved += 1,
                ActionStatus::Rejected => counts.rejected += 1,
            }
            counts
        })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

/// Computes the visible, ordered subset of `actions` for `criteria`.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use zapprove::domain::{ActionType, AgentAction};
/// use zapprove::review::{project, FilterCriteria};
///
/// let now = Utc::now();
/// let actions = vec![
///     AgentAction::new("a1", "Send invoice", "Acme", ActionType::Email, now - Duration::minutes(5)),
///     AgentAction::new("a2", "Sync database", "Postgres", ActionType::Database, now),
/// ];
///
/// let visible = project(&actions, &FilterCriteria::default());
/// let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
/// assert_eq!(ids, vec!["a2", "a1"]);
/// ```
#[must_use]
pub fn project<'a>(actions: &'a [AgentAction], criteria: &FilterCriteria) -> Vec<&'a AgentAction> {
    run_pipeline(actions.iter(), criteria)
}

/// Like [`project`], restricted to decided (approved or rejected) actions.
#[must_use]
pub fn project_decided<'a>(
    actions: &'a [AgentAction],
    criteria: &FilterCriteria,
) -> Vec<&'a AgentAction> {
    run_pipeline(actions.iter().filter(|a| !a.is_pending()), criteria)
}

fn run_pipeline<'a, I>(actions: I, criteria: &FilterCriteria) -> Vec<&'a AgentAction>
where
    I: Iterator<Item = &'a AgentAction>,
{
    let _span = tracing::debug_span!("project",
        status = ?criteria.status,
        action_type = ?criteria.action_type,
        sort_by = ?criteria.sort_by,
        query_len = criteria.search_query.len()
    )
    .entered();

    let query = criteria.search_query.to_lowercase();

    let mut visible: Vec<&AgentAction> = actions
        .filter(|a| criteria.status.matches(a.status))
        .filter(|a| criteria.action_type.matches(a.action_type))
        .filter(|a| query.is_empty() || a.matches_query(&query))
        .collect();

    // `sort_by` is stable: equal keys keep collection order.
    visible.sort_by(|a, b| criteria.sort_by.compare(a, b));

    tracing::trace!(visible_count = visible.len(), "projection computed");
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn fixture() -> Vec<AgentAction> {
        let now = Utc::now();
        let mut approved = AgentAction::new("a3", "Notify oncall", "slack", ActionType::Notification, now - Duration::minutes(1));
        approved.status = ActionStatus::Approved;
        vec![
            AgentAction::new("a1", "Send invoice to Acme", "Acme", ActionType::Email, now - Duration::minutes(30)),
            AgentAction::new("a2", "Sync database", "Postgres", ActionType::Database, now - Duration::minutes(10)),
            approved,
            AgentAction::new("a4", "Email renewal", "acme", ActionType::Email, now - Duration::minutes(30)),
        ]
    }

    fn ids(actions: &[&AgentAction]) -> Vec<String> {
        actions.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_status_filter() {
        let actions = fixture();
        let criteria = FilterCriteria {
            status: StatusFilter::Only(ActionStatus::Approved),
            ..Default::default()
        };
        assert_eq!(ids(&project(&actions, &criteria)), vec!["a3"]);
    }

    #[test]
    fn test_type_filter() {
        let actions = fixture();
        let criteria = FilterCriteria {
            action_type: TypeFilter::Only(ActionType::Email),
            sort_by: SortOrder::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&project(&actions, &criteria)), vec!["a1", "a4"]);
    }

    #[test]
    fn test_search_matches_id_entity_description() {
        let actions = fixture();
        let by = |q: &str| {
            let criteria = FilterCriteria { search_query: q.to_string(), ..Default::default() };
            ids(&project(&actions, &criteria))
        };
        assert_eq!(by("INVOICE"), vec!["a1"]);
        assert_eq!(by("postgres"), vec!["a2"]);
        assert_eq!(by("a3"), vec!["a3"]);
        assert!(by("nothing-matches").is_empty());
    }

    #[test]
    fn test_sort_newest_oldest_and_ties_are_stable() {
        let actions = fixture();
        let newest = FilterCriteria::default();
        assert_eq!(ids(&project(&actions, &newest)), vec!["a3", "a2", "a1", "a4"]);

        let oldest = FilterCriteria { sort_by: SortOrder::Oldest, ..Default::default() };
        assert_eq!(ids(&project(&actions, &oldest)), vec!["a1", "a4", "a2", "a3"]);
    }

    #[test]
    fn test_sort_by_entity_is_case_insensitive() {
        let actions = fixture();
        let criteria = FilterCriteria { sort_by: SortOrder::Entity, ..Default::default() };
        assert_eq!(ids(&project(&actions, &criteria)), vec!["a1", "a4", "a2", "a3"]);
    }

    #[test]
    fn test_project_decided_excludes_pending() {
        let actions = fixture();
        assert_eq!(ids(&project_decided(&actions, &FilterCriteria::default())), vec!["a3"]);
    }

    #[test]
    fn test_counts_ignore_criteria() {
        let actions = fixture();
        let counts = StatusCounts::tally(&actions);
        assert_eq!(counts, StatusCounts { pending: 3, approved: 1, rejected: 0 });
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_filter_cycles() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Only(ActionStatus::Pending));
        assert_eq!(StatusFilter::Only(ActionStatus::Rejected).next(), StatusFilter::All);
        assert_eq!(StatusFilter::All.next_decided(), StatusFilter::Only(ActionStatus::Approved));

        let mut filter = TypeFilter::All;
        for _ in 0..ActionType::ALL.len() {
            filter = filter.next();
            assert_ne!(filter, TypeFilter::All);
        }
        assert_eq!(filter.next(), TypeFilter::All);

        assert_eq!(SortOrder::Entity.next(), SortOrder::Newest);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("Entity".parse::<SortOrder>().unwrap(), SortOrder::Entity);
        assert!("alphabetical".parse::<SortOrder>().is_err());
    }
}
