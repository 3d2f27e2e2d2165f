//! Top-level rendering coordinator.
//!
//! Computes the view model from state, then delegates to the components:
//! normal or search layout first, then any open dialog on top.
//!
//! # Example
//!
//! ```rust,no_run
//! use zapprove::app::AppState;
//! use zapprove::ui::{render, Theme};
//!
//! let state = AppState::new(vec![], Theme::default());
//! render(&state, 24, 120); // Prints ANSI output to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a precomputed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(search) = &vm.search_bar {
        components::render_search_mode(vm, search, theme, cols, rows);
    } else {
        components::render_normal_mode(vm, theme, cols, rows);
    }

    if let Some(modal) = &vm.modal {
        components::render_modal(modal, theme, cols, rows);
    }
}
