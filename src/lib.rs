//! zapprove: A Zellij plugin for reviewing actions proposed by AI agents.
//!
//! An operator works through a queue of agent-generated actions (emails,
//! database writes, API calls, ...) and decides each one:
//! - Approve or reject a single action, with undo of the latest decision
//! - Bulk approve or reject a selection, with confirmation above a threshold
//! - Filter by status and type, search by text, and sort the list
//! - Inspect an action's metadata in a details dialog
//! - Browse the decided actions in a history view

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Key mapping, event handling                      │
//! │  - Dialogs and view models                          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────────────────┐
//! │ UI Layer      │   │ Review Layer (review/)          │
//! │ (ui/)         │   │ - Approve / reject / undo       │
//! │ - Rendering   │   │ - Filter, search, sort          │
//! │ - Theming     │   │ - Selection and bulk gating     │
//! │ - Components  │   │ - Notifications                 │
//! └───────────────┘   └─────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Store & Domain Layers                              │
//! │  - Action store and undo history (store/)           │
//! │  - Seed sources (store/seed)                        │
//! │  - Action model and errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (`AgentAction`, errors)
//! - [`infrastructure`]: Sandbox path utilities
//! - [`observability`]: OpenTelemetry tracing
//! - [`review`]: Review operations and list projection
//! - [`store`]: In-memory action store, undo history, seed sources
//! - [`ui`]: Terminal rendering with theme support
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zapprove.wasm" {
//!         seed_file "~/agents/queue.json"
//!         confirm_threshold "10"
//!         default_status "pending"
//!         default_sort "newest"
//!         show_confidence "true"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zapprove::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let pending_before = state.review.counts().pending;
//!
//! let (needs_render, actions) = handle_event(&mut state, &Event::ApproveFocused)?;
//! assert!(needs_render);
//! assert_eq!(actions.len(), 1);
//! assert_eq!(state.review.counts().pending, pending_before - 1);
//!
//! handle_event(&mut state, &Event::Undo)?;
//! assert_eq!(state.review.counts().pending, pending_before);
//! # Ok::<(), zapprove::ReviewError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod review;
pub mod store;
pub mod ui;

pub use app::{handle_event, map_key, Action, AppState, Event, InputMode, Key, SearchFocus, ViewMode};
pub use domain::{ActionStatus, ActionType, AgentAction, Result, ReviewError};
pub use ui::Theme;

use std::collections::BTreeMap;

use app::ReviewSettings;
use review::{SortOrder, StatusFilter, DEFAULT_CONFIRM_THRESHOLD};
use store::{EmbeddedSeed, JsonFileSeed, SeedSource};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional. Malformed values are logged and replaced by their
/// default so a typo never keeps the plugin from loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON seed list on the host. The embedded demo list is used when unset
    /// or unreadable.
    pub seed_file: Option<String>,

    /// Pending-selected count at which bulk decisions ask for confirmation.
    /// Always at least 1. Default: 10
    pub confirm_threshold: usize,

    /// Status filter applied when the Review view opens. Default: pending
    pub default_status: StatusFilter,

    /// Initial sort order. Default: newest
    pub default_sort: SortOrder,

    /// Show the agent's confidence in the details dialog. Default: true
    pub show_confidence: bool,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = ReviewSettings::default();
        Self {
            seed_file: None,
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
            default_status: settings.default_status,
            default_sort: settings.default_sort,
            show_confidence: settings.show_confidence,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `confirm_threshold`: positive integer (0 and garbage fall back to 10)
    /// - `default_status`: `all`, `pending`, `approved`, or `rejected`
    /// - `default_sort`: `newest`, `oldest`, or `entity`
    /// - `show_confidence`: `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`
    /// - `seed_file`, `theme`, `theme_file`, `trace_level`: taken verbatim,
    ///   blank values ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zapprove::review::{SortOrder, StatusFilter};
    /// use zapprove::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("confirm_threshold".to_string(), "3".to_string());
    /// map.insert("default_status".to_string(), "all".to_string());
    /// map.insert("default_sort".to_string(), "entity".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.confirm_threshold, 3);
    /// assert_eq!(config.default_status, StatusFilter::All);
    /// assert_eq!(config.default_sort, SortOrder::Entity);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let confirm_threshold = config
            .get("confirm_threshold")
            .and_then(|raw| match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Some(n),
                _ => {
                    tracing::warn!(value = %raw, "invalid confirm_threshold, using default");
                    None
                }
            })
            .unwrap_or(defaults.confirm_threshold);

        let default_status = config
            .get("default_status")
            .and_then(|raw| {
                parse_status_filter(raw)
                    .map_err(|e| tracing::warn!(error = %e, "invalid default_status, using default"))
                    .ok()
            })
            .unwrap_or(defaults.default_status);

        let default_sort = config
            .get("default_sort")
            .and_then(|raw| {
                raw.parse::<SortOrder>()
                    .map_err(|e| tracing::warn!(error = %e, "invalid default_sort, using default"))
                    .ok()
            })
            .unwrap_or(defaults.default_sort);

        let show_confidence = config
            .get("show_confidence")
            .and_then(|raw| {
                let parsed = parse_bool(raw);
                if parsed.is_none() {
                    tracing::warn!(value = %raw, "invalid show_confidence, using default");
                }
                parsed
            })
            .unwrap_or(defaults.show_confidence);

        Self {
            seed_file: non_blank(config, "seed_file"),
            confirm_threshold,
            default_status,
            default_sort,
            show_confidence,
            theme_name: non_blank(config, "theme"),
            theme_file: non_blank(config, "theme_file"),
            trace_level: non_blank(config, "trace_level"),
        }
    }

    /// Review settings derived from this configuration.
    #[must_use]
    pub const fn review_settings(&self) -> ReviewSettings {
        ReviewSettings {
            confirm_threshold: self.confirm_threshold,
            show_confidence: self.show_confidence,
            default_status: self.default_status,
            default_sort: self.default_sort,
        }
    }
}

fn non_blank(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_status_filter(raw: &str) -> Result<StatusFilter> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    raw.parse::<ActionStatus>().map(StatusFilter::Only)
}

/// Initializes the plugin state from configuration.
///
/// Loads the theme (file, then name, then default) and the seed list. A seed
/// file that cannot be read or parsed is logged and replaced by the embedded
/// demo list.
///
/// # Example
///
/// ```rust
/// use zapprove::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(!state.review.actions().is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let theme = load_theme(config);
    let actions = load_actions(config);

    tracing::debug!(action_count = actions.len(), "zapprove initialized");
    AppState::with_settings(actions, theme, config.review_settings())
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

fn load_actions(config: &Config) -> Vec<AgentAction> {
    if let Some(seed_file) = &config.seed_file {
        let path = infrastructure::expand_tilde(seed_file);
        match JsonFileSeed::new(&path).load() {
            Ok(actions) => return actions,
            Err(e) => {
                tracing::warn!(seed_file = %path, error = %e, "failed to load seed file, using embedded seed");
            }
        }
    }

    EmbeddedSeed.load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "embedded seed is invalid, starting empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.confirm_threshold, 10);
        assert_eq!(config.default_status, StatusFilter::Only(ActionStatus::Pending));
        assert_eq!(config.default_sort, SortOrder::Newest);
        assert!(config.show_confidence);
    }

    #[test]
    fn test_parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("seed_file", "~/queue.json"),
            ("confirm_threshold", "4"),
            ("default_status", "Rejected"),
            ("default_sort", "oldest"),
            ("show_confidence", "off"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "/tmp/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.seed_file.as_deref(), Some("~/queue.json"));
        assert_eq!(config.confirm_threshold, 4);
        assert_eq!(config.default_status, StatusFilter::Only(ActionStatus::Rejected));
        assert_eq!(config.default_sort, SortOrder::Oldest);
        assert!(!config.show_confidence);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/tmp/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("confirm_threshold", "0"),
            ("default_status", "maybe"),
            ("default_sort", "random"),
            ("show_confidence", "sometimes"),
            ("seed_file", "   "),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_zellij(&map(&[("confirm_threshold", "lots")]));
        assert_eq!(config.confirm_threshold, 10);
    }

    #[test]
    fn test_review_settings_follow_config() {
        let config = Config {
            confirm_threshold: 2,
            default_status: StatusFilter::All,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.settings.confirm_threshold, 2);
        assert_eq!(state.criteria.status, StatusFilter::All);
    }

    #[test]
    fn test_initialize_reads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"q1","description":"Refund order 88","entity":"Stripe","action_type":"api_call","minutes_ago":3}}]"#
        )
        .unwrap();

        let config = Config {
            seed_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.review.actions().len(), 1);
        assert_eq!(state.review.actions()[0].id, "q1");
    }

    #[test]
    fn test_initialize_falls_back_to_embedded_seed() {
        let config = Config {
            seed_file: Some("/nonexistent/zapprove/seed.json".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(
            state.review.actions().len(),
            EmbeddedSeed.load().unwrap().len()
        );
    }

    #[test]
    fn test_out_of_range_seed_file_falls_back_to_embedded_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"q1","description":"d","entity":"e","action_type":"email","minutes_ago":9223372036854775807}}]"#
        )
        .unwrap();

        let config = Config {
            seed_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(
            state.review.actions().len(),
            EmbeddedSeed.load().unwrap().len()
        );
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized-neon".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
