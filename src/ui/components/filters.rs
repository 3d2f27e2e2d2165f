//! Filter bar component renderer.
//!
//! One line summarizing the active criteria and the selection.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the filter bar at `row` and returns the next row.
///
/// ```text
///  Status: Pending  Type: All Types  Sort: Newest first        12 shown  3 selected
/// ```
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let criteria = format!(
        " Status: {}  Type: {}  Sort: {}",
        filters.status_label, filters.type_label, filters.sort_label
    );

    let selection = if filters.all_selected {
        format!("{} shown  all selected ", filters.visible)
    } else {
        format!("{} shown  {} selected ", filters.visible, filters.selected)
    };

    let gap = cols.saturating_sub(char_len(&criteria) + char_len(&selection));

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{criteria}");
    print!("{}", " ".repeat(gap));
    if filters.selected > 0 {
        print!("{}", Theme::fg(&theme.colors.checked_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{selection}");
    print!("{}", Theme::reset());
    row + 1
}
