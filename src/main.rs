//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zapprove library and the Zellij plugin
//! system: parses configuration, converts Zellij key events into library
//! [`Key`]s, and executes the [`Action`]s the handler returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, seed `AppState`
//! 2. **Subscribe**: Register for `Key` events
//! 3. **Update**: Map keys to events, delegate to `handle_event`
//! 4. **Render**: Call the library render function
//!
//! Keybindings are documented in [`zapprove::app::keymap`].

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zapprove::review::{NotificationSink, TracingSink};
use zapprove::{handle_event, map_key, Action, Config, Key};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zapprove::AppState,

    /// Receives notifications after they are shown in the status line.
    sink: TracingSink,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zapprove::AppState::new(Vec::new(), zapprove::Theme::default()),
            sink: TracingSink,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing, and seeds the action list.
    ///
    /// Seed and theme files live under `/host`, which plugins can read
    /// without extra permissions, so none are requested.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zapprove::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");

        self.app = zapprove::initialize(&config);

        subscribe(&[EventType::Key]);
        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let zellij_tile::prelude::Event::Key(key) = event else {
            return false;
        };

        let _span = tracing::debug_span!("plugin_update", bare_key = ?key.bare_key).entered();

        let Some(our_event) = to_key(&key).and_then(|k| map_key(&self.app, k)) else {
            tracing::trace!("unbound key");
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zapprove::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin pane");
                hide_self();
            }
            Action::Notify(notification) => self.sink.notify(notification),
        }
    }
}

/// Converts a Zellij key press into a library [`Key`].
fn to_key(key: &KeyWithModifier) -> Option<Key> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char(c) => Some(Key::Ctrl(c)),
            _ => None,
        };
    }

    Some(match key.bare_key {
        BareKey::Char(c) => Key::Char(c),
        BareKey::Enter => Key::Enter,
        BareKey::Esc => Key::Esc,
        BareKey::Up => Key::Up,
        BareKey::Down => Key::Down,
        BareKey::Backspace => Key::Backspace,
        _ => return None,
    })
}
