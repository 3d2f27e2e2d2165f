//! Application state management and view model computation.
//!
//! [`AppState`] is the single top-level container for the session. It owns
//! the [`ReviewService`] (actions, undo history, selection) together with the
//! transient UI state around it: filter criteria, cursor, modes, the open
//! dialog, and the latest notification.
//!
//! # Architecture
//!
//! Nothing derived is stored. The visible list is recomputed from the service
//! and the criteria whenever it is needed, so it can never go stale after an
//! approve, reject, or undo.
//!
//! # Example
//!
//! ```rust
//! use zapprove::app::AppState;
//! use zapprove::store::{EmbeddedSeed, SeedSource};
//! use zapprove::ui::Theme;
//!
//! let actions = EmbeddedSeed.load()?;
//! let mut state = AppState::new(actions, Theme::default());
//! state.move_cursor_down();
//! let viewmodel = state.compute_viewmodel(24, 120);
//! assert!(!viewmodel.display_items.is_empty());
//! # Ok::<(), zapprove::ReviewError>(())
//! ```

use super::modes::{Decision, InputMode, Modal, SearchFocus, ViewMode};
use crate::domain::{ActionStatus, AgentAction};
use crate::review::{
    FilterCriteria, Notification, ReviewService, SortOrder, StatusFilter,
    DEFAULT_CONFIRM_THRESHOLD,
};
use crate::ui::components::LEADING_COLUMNS_WIDTH;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ConfirmView, DetailsView, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo,
    ModalView, SearchBarInfo, ToastInfo, UIViewModel,
};

/// Rows used by chrome in normal mode: blank, header, filter bar, border,
/// column headers, border, status line, footer.
const NORMAL_CHROME_ROWS: usize = 8;

/// Normal chrome plus the three-line search box.
const SEARCH_CHROME_ROWS: usize = 11;

/// Operator preferences that shape review behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSettings {
    /// Pending-selected count at which bulk decisions ask for confirmation.
    pub confirm_threshold: usize,

    /// Whether the details dialog shows the agent's confidence.
    pub show_confidence: bool,

    /// Status filter applied when the Review view opens.
    pub default_status: StatusFilter,

    /// Sort order at startup.
    pub default_sort: SortOrder,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
            show_confidence: true,
            default_status: StatusFilter::Only(ActionStatus::Pending),
            default_sort: SortOrder::Newest,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Actions, undo history, and selection.
    pub review: ReviewService,

    /// Filter, search, and sort criteria for the list.
    pub criteria: FilterCriteria,

    /// Zero-based cursor within the visible list.
    ///
    /// Clamped after every change that can shrink the list; wraps during
    /// navigation.
    pub cursor: usize,

    pub input_mode: InputMode,

    pub view_mode: ViewMode,

    /// Open dialog, if any.
    pub modal: Option<Modal>,

    /// Most recent notification, shown in the status line.
    pub notification: Option<Notification>,

    pub settings: ReviewSettings,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates state over the seeded actions with default settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zapprove::app::AppState;
    /// use zapprove::ui::Theme;
    ///
    /// let state = AppState::new(vec![], Theme::default());
    /// assert_eq!(state.cursor, 0);
    /// assert!(state.focused_action().is_none());
    /// ```
    #[must_use]
    pub fn new(actions: Vec<AgentAction>, theme: Theme) -> Self {
        Self::with_settings(actions, theme, ReviewSettings::default())
    }

    /// Creates state with explicit settings; the initial criteria follow them.
    #[must_use]
    pub fn with_settings(actions: Vec<AgentAction>, theme: Theme, settings: ReviewSettings) -> Self {
        Self {
            review: ReviewService::new(actions),
            criteria: FilterCriteria {
                status: settings.default_status,
                sort_by: settings.default_sort,
                ..FilterCriteria::default()
            },
            cursor: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Review,
            modal: None,
            notification: None,
            settings,
            theme,
        }
    }

    /// Actions passing the current view and criteria, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&AgentAction> {
        match self.view_mode {
            ViewMode::Review => self.review.view(&self.criteria),
            ViewMode::History => self.review.decided_view(&self.criteria),
        }
    }

    /// Ids of [`AppState::visible`], in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.visible().into_iter().map(|a| a.id.clone()).collect()
    }

    /// Action under the cursor.
    #[must_use]
    pub fn focused_action(&self) -> Option<&AgentAction> {
        self.visible().get(self.cursor).copied()
    }

    /// Moves the cursor down, wrapping to the top. No-op on an empty list.
    pub fn move_cursor_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom. No-op on an empty list.
    pub fn move_cursor_up(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside the visible list.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Advances the status filter. History cycles through decided statuses only.
    pub fn cycle_status_filter(&mut self) {
        self.criteria.status = match self.view_mode {
            ViewMode::Review => self.criteria.status.next(),
            ViewMode::History => self.criteria.status.next_decided(),
        };
        tracing::debug!(status = ?self.criteria.status, "status filter changed");
        self.clamp_cursor();
    }

    pub fn cycle_type_filter(&mut self) {
        self.criteria.action_type = self.criteria.action_type.next();
        tracing::debug!(action_type = ?self.criteria.action_type, "type filter changed");
        self.clamp_cursor();
    }

    pub fn cycle_sort(&mut self) {
        self.criteria.sort_by = self.criteria.sort_by.next();
        tracing::debug!(sort_by = ?self.criteria.sort_by, "sort order changed");
    }

    /// Switches between Review and History.
    ///
    /// History opens on all decided actions; Review reopens on the configured
    /// default status. Type, search, and sort carry over.
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
        self.criteria.status = match self.view_mode {
            ViewMode::Review => self.settings.default_status,
            ViewMode::History => StatusFilter::All,
        };
        self.cursor = 0;
        tracing::debug!(view_mode = ?self.view_mode, "view mode changed");
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract chrome rows (more in search mode)
    /// 2. Center the window on the cursor
    /// 3. Shift the window back when it would run past the end
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let visible = self.visible();

        let mut viewmodel = UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: self.compute_header(),
            filters: self.compute_filter_bar(&visible),
            footer: self.compute_footer(),
            empty_state: None,
            search_bar: self.compute_search_bar(),
            modal: self.compute_modal(),
            toast: self.compute_toast(),
        };

        if visible.is_empty() {
            viewmodel.empty_state = Some(self.compute_empty_state());
            return viewmodel;
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());

        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let description_width = cols.saturating_sub(LEADING_COLUMNS_WIDTH + 1);

        viewmodel.display_items = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, action)| {
                self.compute_display_item(action, visible_start + offset, description_width)
            })
            .collect();
        viewmodel.selected_index = self.cursor.saturating_sub(visible_start);

        viewmodel
    }

    fn compute_display_item(
        &self,
        action: &AgentAction,
        absolute_idx: usize,
        description_width: usize,
    ) -> DisplayItem {
        const ENTITY_WIDTH: usize = 16;
        const ID_WIDTH: usize = 10;

        let description = truncate(&action.description, description_width);
        let highlight_ranges = match_ranges(&description, &self.criteria.search_query);

        DisplayItem {
            id: truncate(&action.id, ID_WIDTH),
            description,
            entity: truncate(&action.entity, ENTITY_WIDTH),
            type_label: action.action_type.label(),
            status: action.status,
            time_ago: action.time_ago(),
            is_focused: absolute_idx == self.cursor,
            is_checked: self.review.selection().contains(&action.id),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: self.view_mode.title().to_string(),
            counts: self.review.counts(),
        }
    }

    fn compute_filter_bar(&self, visible: &[&AgentAction]) -> FilterBarInfo {
        let visible_ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
        let selection = self.review.selection();

        FilterBarInfo {
            status_label: self.criteria.status.label(),
            type_label: self.criteria.action_type.label(),
            sort_label: self.criteria.sort_by.label(),
            visible: visible.len(),
            selected: selection.len(),
            all_selected: selection.covers_all(&visible_ids),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.modal, self.input_mode, self.view_mode) {
            (Some(Modal::ConfirmBulk { .. }), _, _) => "y/Enter: confirm  n/Esc: cancel",
            (Some(Modal::Details { action_id }), _, _) => {
                if self.review.get(action_id).is_some_and(AgentAction::is_pending) {
                    "a: approve  r: reject  Esc: close"
                } else {
                    "u: undo  Esc: close"
                }
            }
            (None, InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: exit search  Enter: browse results  Up/Down: navigate  Type to filter"
            }
            (None, InputMode::Search(SearchFocus::Navigating), _) => {
                "ESC: exit search  /: edit query  j/k: navigate  a/r: decide  Space: select  Enter: details"
            }
            (None, InputMode::Normal, ViewMode::Review) => {
                "j/k: move  a/r: decide  Enter: details  Space: select  x: all  A/R: bulk  u: undo  f/t/o: filter  /: search  h: history  q: quit"
            }
            (None, InputMode::Normal, ViewMode::History) => {
                "j/k: move  Enter: details  u: undo  f/t/o: filter  /: search  h: review  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.criteria.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let subtitle = if self.criteria.is_narrowing() {
            "Try adjusting your filters or search query (f/t: filters, Esc: clear search)"
        } else if self.view_mode == ViewMode::History {
            "Approved and rejected actions will appear here"
        } else {
            "No agent actions have been proposed"
        };

        EmptyState {
            message: "No actions found".to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_modal(&self) -> Option<ModalView> {
        match self.modal.as_ref()? {
            Modal::Details { action_id } => {
                let action = self.review.get(action_id)?;
                let metadata = action.metadata.as_ref();

                Some(ModalView::Details(DetailsView {
                    id: action.id.clone(),
                    description: action.description.clone(),
                    entity: action.entity.clone(),
                    type_label: action.action_type.label(),
                    status: action.status,
                    timestamp: action.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
                    time_ago: action.time_ago(),
                    confidence: metadata
                        .filter(|_| self.settings.show_confidence)
                        .and_then(|m| m.confidence_percent()),
                    source: metadata.and_then(|m| m.source.clone()),
                    details: metadata.and_then(|m| m.details.clone()),
                    related_entities: metadata
                        .map(|m| m.related_entities.clone())
                        .unwrap_or_default(),
                    can_decide: action.is_pending(),
                }))
            }
            Modal::ConfirmBulk { decision, pending } => {
                let (title, verb) = match decision {
                    Decision::Approve => ("Approve selected actions?", decision.verb()),
                    Decision::Reject => ("Reject selected actions?", decision.verb()),
                };
                Some(ModalView::Confirm(ConfirmView {
                    title: title.to_string(),
                    message: format!("This will {verb} {pending} pending actions."),
                }))
            }
        }
    }

    fn compute_toast(&self) -> Option<ToastInfo> {
        self.notification.as_ref().map(|n| ToastInfo {
            severity: n.severity,
            message: n.message.clone(),
            description: n.description.clone(),
            offers_undo: n.offers_undo && !self.review.history().is_empty(),
        })
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(SEARCH_CHROME_ROWS),
        }
    }
}

/// Case-insensitive occurrences of `query` in `text` as `(start, end)` char indices.
///
/// Matches do not overlap; an empty query yields no ranges.
fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    let same = |a: char, b: char| a.to_lowercase().eq(b.to_lowercase());

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        let hit = needle
            .iter()
            .enumerate()
            .all(|(offset, &n)| same(haystack[start + offset], n));

        if hit {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }

    ranges
}
