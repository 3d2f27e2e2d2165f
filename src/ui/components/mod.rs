//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns the
//! next free row.
//!
//! # Components
//!
//! - `header`: Title and global status counts
//! - `filters`: Active criteria and selection summary
//! - `search`: Search input box
//! - `table`: Action list
//! - `empty`: Message shown in place of an empty list
//! - `toast`: Latest notification
//! - `footer`: Keybinding hints
//! - `modal`: Details and confirmation dialogs
//!
//! # Layout Modes
//!
//! - [`render_normal_mode`]: Header, filters, table, status line, footer
//! - [`render_search_mode`]: Same with the search box above the table
//!
//! An open dialog is drawn last, over the table.

mod empty;
mod filters;
mod footer;
mod header;
mod modal;
mod search;
mod table;
mod toast;

pub use modal::render_modal;
pub use table::LEADING_COLUMNS_WIDTH;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, UIViewModel};

use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use toast::render_toast;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the normal mode layout (no search bar).
///
/// ```text
/// [blank line]
/// [Header]
/// [Filter bar]
/// [Border]
/// [Table Headers]
/// [Table Rows or empty state]
/// [Border]
/// [Status line]
/// [Footer]
/// ```
pub fn render_normal_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_table_headers(current_row, theme);
    render_body(current_row, vm, theme, cols);
    render_bottom(vm, theme, cols, rows);
}

/// Renders the search mode layout: normal layout with the search box above
/// the table headers.
pub fn render_search_mode(
    vm: &UIViewModel,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_search_bar(current_row, search, theme, cols);
    current_row = render_table_headers(current_row, theme);
    render_body(current_row, vm, theme, cols);
    render_bottom(vm, theme, cols, rows);
}

fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_filter_bar(current_row, &vm.filters, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

fn render_body(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize) {
    if let Some(empty) = &vm.empty_state {
        render_empty_state(row, empty, theme, cols);
    } else {
        render_table_rows(row, &vm.display_items, theme, cols);
    }
}

fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows;
    let toast_row = rows.saturating_sub(1);
    let border_row = rows.saturating_sub(2);

    render_border(border_row, &theme.colors.border, cols);
    render_toast(toast_row, vm.toast.as_ref(), theme, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
