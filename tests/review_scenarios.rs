//! End-to-end review behavior through the public API.

use chrono::{DateTime, Duration, Utc};
use zapprove::app::{Modal, ReviewSettings};
use zapprove::review::{
    project, BulkGate, FilterCriteria, Notification, ReviewService, Severity, SortOrder,
    StatusCounts, StatusFilter, TypeFilter,
};
use zapprove::{
    handle_event, map_key, ActionStatus, ActionType, AgentAction, AppState, Event, Key, Theme,
};

fn action(id: &str, description: &str, entity: &str, ts: DateTime<Utc>) -> AgentAction {
    AgentAction::new(id, description, entity, ActionType::Email, ts)
}

/// `n` pending actions `a1..an`, each one minute newer than the last.
fn pending_actions(n: usize) -> Vec<AgentAction> {
    let base = Utc::now() - Duration::hours(1);
    (1..=n)
        .map(|i| {
            action(
                &format!("a{i}"),
                &format!("Action number {i}"),
                &format!("Entity {i}"),
                base + Duration::minutes(i as i64),
            )
        })
        .collect()
}

fn statuses(service: &ReviewService) -> Vec<(String, ActionStatus)> {
    service
        .actions()
        .iter()
        .map(|a| (a.id.clone(), a.status))
        .collect()
}

fn ids(actions: &[&AgentAction]) -> Vec<String> {
    actions.iter().map(|a| a.id.clone()).collect()
}

fn press(state: &mut AppState, keys: &[Key]) -> Vec<zapprove::Action> {
    let mut emitted = Vec::new();
    for key in keys {
        if let Some(event) = map_key(state, *key) {
            let (_, actions) = handle_event(state, &event).unwrap();
            emitted.extend(actions);
        }
    }
    emitted
}

#[test]
fn scenario_newest_first() {
    let now = Utc::now();
    let actions = vec![
        action("a1", "first", "Acme", now - Duration::minutes(10)),
        action("a2", "second", "Acme", now - Duration::minutes(1)),
    ];
    let criteria = FilterCriteria {
        sort_by: SortOrder::Newest,
        ..FilterCriteria::default()
    };

    assert_eq!(ids(&project(&actions, &criteria)), vec!["a2", "a1"]);
}

#[test]
fn scenario_approve_then_undo() {
    let mut service = ReviewService::new(pending_actions(2));
    let mut sink: Vec<Notification> = Vec::new();

    assert!(service.approve("a1", &mut sink));
    assert_eq!(service.get("a1").unwrap().status, ActionStatus::Approved);
    assert_eq!(service.history().len(), 1);
    let entry = service.history().last().unwrap();
    assert_eq!(entry.action_id(), "a1");
    assert_eq!(entry.previous_status, ActionStatus::Pending);
    assert_eq!(
        service.counts(),
        StatusCounts { pending: 1, approved: 1, rejected: 0 }
    );

    let undone = service.undo(&mut sink).unwrap();
    assert_eq!(undone.action_id(), "a1");
    assert_eq!(service.get("a1").unwrap().status, ActionStatus::Pending);
    assert!(service.history().is_empty());
    assert_eq!(
        service.counts(),
        StatusCounts { pending: 2, approved: 0, rejected: 0 }
    );

    let severities: Vec<Severity> = sink.iter().map(|n| n.severity).collect();
    assert_eq!(severities, vec![Severity::Success, Severity::Info]);
    assert!(sink[0].offers_undo);
}

#[test]
fn scenario_bulk_of_twelve_requires_confirmation() {
    let mut state = AppState::new(pending_actions(12), Theme::default());

    handle_event(&mut state, &Event::SelectAllVisible).unwrap();
    assert_eq!(state.review.pending_selected_count(), 12);
    assert_eq!(
        state.review.bulk_gate(state.settings.confirm_threshold),
        BulkGate::Confirm { pending: 12 }
    );

    handle_event(&mut state, &Event::BulkApprove).unwrap();
    assert_eq!(
        state.modal,
        Some(Modal::ConfirmBulk { decision: zapprove::app::Decision::Approve, pending: 12 })
    );
    assert_eq!(state.review.counts().pending, 12);

    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(state.review.counts().approved, 12);
    assert!(state.review.selection().is_empty());
    assert_eq!(state.notification, Some(Notification::bulk_approved(12)));
    assert!(state.modal.is_none());
}

#[test]
fn scenario_search_is_case_insensitive() {
    let now = Utc::now();
    let actions = vec![
        action("a1", "Send invoice to Acme", "Acme", now),
        action("a2", "Sync database", "Postgres", now),
    ];
    let criteria = FilterCriteria {
        status: StatusFilter::All,
        search_query: "INVOICE".to_string(),
        ..FilterCriteria::default()
    };

    assert_eq!(ids(&project(&actions, &criteria)), vec!["a1"]);
}

#[test]
fn scenario_select_all_is_scoped_to_filter() {
    let mut service = ReviewService::new(pending_actions(10));
    let mut sink = Vec::new();
    for id in ["a1", "a2", "a3", "a4", "a5", "a6", "a7"] {
        service.approve(id, &mut sink);
    }

    let criteria = FilterCriteria {
        status: StatusFilter::Only(ActionStatus::Pending),
        ..FilterCriteria::default()
    };
    let visible = ids(&service.view(&criteria));
    assert_eq!(visible.len(), 3);

    service.select_all(&visible);
    let mut selected: Vec<&str> = service.selection().iter().collect();
    selected.sort_unstable();
    assert_eq!(selected, vec!["a10", "a8", "a9"]);
}

#[test]
fn property_undo_walks_back_every_change() {
    let mut service = ReviewService::new(pending_actions(5));
    let original = statuses(&service);
    let mut sink = Vec::new();

    service.approve("a1", &mut sink);
    service.reject("a2", &mut sink);
    service.bulk_approve(&["a3", "a4", "a1"], &mut sink);
    service.set_status("a1", ActionStatus::Rejected);
    let changes = service.history().len();
    assert_eq!(changes, 5);

    let before_last = {
        let mut replay = ReviewService::new(pending_actions(5));
        let mut sink = Vec::new();
        replay.approve("a1", &mut sink);
        replay.reject("a2", &mut sink);
        replay.bulk_approve(&["a3", "a4", "a1"], &mut sink);
        statuses(&replay)
    };
    service.undo(&mut sink);
    assert_eq!(statuses(&service), before_last);

    for _ in 1..changes {
        assert!(service.undo(&mut sink).is_some());
    }
    assert_eq!(statuses(&service), original);
    for (_, status) in statuses(&service) {
        assert!(ActionStatus::ALL.contains(&status));
    }
}

#[test]
fn property_undo_on_empty_history_changes_nothing() {
    let mut service = ReviewService::new(pending_actions(3));
    let before = statuses(&service);
    let mut sink = Vec::new();

    assert!(service.undo(&mut sink).is_none());

    assert_eq!(statuses(&service), before);
    assert!(service.history().is_empty());
    assert!(sink.is_empty());
}

#[test]
fn property_counts_ignore_criteria() {
    let mut state = AppState::new(pending_actions(6), Theme::default());
    let mut sink = Vec::new();
    state.review.approve("a2", &mut sink);
    state.review.reject("a5", &mut sink);
    let counts = state.review.counts();

    for event in [
        Event::CycleStatusFilter,
        Event::CycleTypeFilter,
        Event::CycleSort,
        Event::ToggleHistory,
    ] {
        handle_event(&mut state, &event).unwrap();
        assert_eq!(state.review.counts(), counts);
        assert_eq!(state.compute_viewmodel(30, 140).header.counts, counts);
    }
}

#[test]
fn property_projection_is_pure() {
    let actions = pending_actions(8);
    let snapshot = actions.clone();
    let criteria = FilterCriteria {
        status: StatusFilter::All,
        action_type: TypeFilter::Only(ActionType::Email),
        sort_by: SortOrder::Entity,
        search_query: "entity".to_string(),
    };

    let first = ids(&project(&actions, &criteria));
    let second = ids(&project(&actions, &criteria));

    assert_eq!(first, second);
    assert_eq!(actions, snapshot);
}

#[test]
fn property_select_all_toggles() {
    let mut service = ReviewService::new(pending_actions(4));
    let visible = vec!["a1", "a3"];

    service.toggle_selection("a1");
    service.select_all(&visible);
    assert_eq!(service.selection().len(), 2);
    assert!(service.selection().contains("a3"));

    service.select_all(&visible);
    assert!(service.selection().is_empty());
}

#[test]
fn property_bulk_only_touches_pending() {
    let mut service = ReviewService::new(pending_actions(4));
    let mut sink = Vec::new();
    service.reject("a2", &mut sink);
    sink.clear();

    let changed = service.bulk_approve(&["a1", "a2", "a3", "missing"], &mut sink);

    assert_eq!(changed, 2);
    assert_eq!(service.get("a1").unwrap().status, ActionStatus::Approved);
    assert_eq!(service.get("a2").unwrap().status, ActionStatus::Rejected);
    assert_eq!(service.get("a3").unwrap().status, ActionStatus::Approved);
    assert_eq!(service.get("a4").unwrap().status, ActionStatus::Pending);
    assert_eq!(sink, vec![Notification::bulk_approved(2)]);
}

#[test]
fn bulk_with_no_pending_reports_zero() {
    let mut service = ReviewService::new(pending_actions(2));
    let mut sink = Vec::new();
    service.approve("a1", &mut sink);
    service.toggle_selection("a1");
    sink.clear();

    assert_eq!(service.bulk_reject_selected(&mut sink), 0);
    assert_eq!(sink, vec![Notification::bulk_rejected(0)]);
    assert!(service.selection().is_empty());
}

#[test]
fn keyboard_review_session() {
    let settings = ReviewSettings {
        confirm_threshold: 3,
        ..ReviewSettings::default()
    };
    let mut state = AppState::with_settings(pending_actions(5), Theme::default(), settings);

    // Newest first: a5 is focused. Approve it, reject the next.
    press(&mut state, &[Key::Char('a')]);
    assert_eq!(state.review.get("a5").unwrap().status, ActionStatus::Approved);
    press(&mut state, &[Key::Char('r')]);
    assert_eq!(state.review.get("a4").unwrap().status, ActionStatus::Rejected);

    // The pending filter hides decided actions.
    assert_eq!(ids(&state.visible()), vec!["a3", "a2", "a1"]);

    // Undo restores a4 and it reappears.
    press(&mut state, &[Key::Char('u')]);
    assert_eq!(state.review.get("a4").unwrap().status, ActionStatus::Pending);
    assert_eq!(state.visible().len(), 4);

    // Four pending selected with threshold 3: confirm dialog, then cancel.
    press(&mut state, &[Key::Char('x'), Key::Char('R')]);
    assert!(matches!(state.modal, Some(Modal::ConfirmBulk { pending: 4, .. })));
    press(&mut state, &[Key::Char('a')]);
    assert_eq!(state.review.counts().pending, 4);
    press(&mut state, &[Key::Esc]);
    assert!(state.modal.is_none());
    assert_eq!(state.review.selection().len(), 4);

    // Confirm this time.
    let emitted = press(&mut state, &[Key::Char('R'), Key::Char('y')]);
    assert_eq!(emitted.len(), 1);
    assert_eq!(state.review.counts().rejected, 4);
    assert!(state.visible().is_empty());

    // History view lists every decided action.
    press(&mut state, &[Key::Char('h')]);
    assert_eq!(state.visible().len(), 5);
}

#[test]
fn details_dialog_decides_the_opened_action() {
    let mut state = AppState::new(pending_actions(3), Theme::default());

    press(&mut state, &[Key::Down, Key::Enter]);
    assert_eq!(
        state.modal,
        Some(Modal::Details { action_id: "a2".to_string() })
    );

    // Navigation keys are inert while the dialog is open.
    press(&mut state, &[Key::Char('j'), Key::Char('x')]);
    assert_eq!(state.cursor, 1);
    assert!(state.review.selection().is_empty());

    press(&mut state, &[Key::Char('r')]);
    assert_eq!(state.review.get("a2").unwrap().status, ActionStatus::Rejected);
    assert!(state.modal.is_none());
}

#[test]
fn search_narrows_and_escape_restores() {
    let mut state = AppState::new(pending_actions(12), Theme::default());

    press(&mut state, &[Key::Char('/'), Key::Char('1'), Key::Char('1')]);
    assert_eq!(ids(&state.visible()), vec!["a11"]);

    press(&mut state, &[Key::Esc]);
    assert_eq!(state.visible().len(), 12);
    assert!(state.criteria.search_query.is_empty());
}
