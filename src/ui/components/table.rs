//! Table component renderer.
//!
//! One row per action: selection mark, id, type badge, status badge, age,
//! entity, and the description filling the remaining width.

use crate::ui::helpers::{self, char_len, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const CHECK_WIDTH: usize = 4;
const ID_WIDTH: usize = 11;
const TYPE_WIDTH: usize = 13;
const STATUS_WIDTH: usize = 10;
const AGE_WIDTH: usize = 10;
const ENTITY_WIDTH: usize = 17;

/// Width of every column before DESCRIPTION.
pub const LEADING_COLUMNS_WIDTH: usize =
    CHECK_WIDTH + ID_WIDTH + TYPE_WIDTH + STATUS_WIDTH + AGE_WIDTH + ENTITY_WIDTH;

/// Renders the column headers at `row` and returns the next row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(
        "{}{}{}{}{}{}DESCRIPTION",
        pad("", CHECK_WIDTH),
        pad("ID", ID_WIDTH),
        pad("TYPE", TYPE_WIDTH),
        pad("STATUS", STATUS_WIDTH),
        pad("AGE", AGE_WIDTH),
        pad("ENTITY", ENTITY_WIDTH),
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`; returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one action row.
///
/// # Styling Precedence
///
/// 1. Focus background over the whole row
/// 2. Status color on the status badge, checked color on the mark
/// 3. Search match highlights in the description (not on the focused row)
///
/// The row is padded to the full width so the focus background is continuous.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = || {
        if item.is_focused {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };
    let accent = |color: &str| {
        if item.is_focused {
            String::new()
        } else {
            Theme::fg(color)
        }
    };

    print!("{}", base());

    let mark = if item.is_checked { "[x] " } else { "[ ] " };
    print!("{}{mark}{}", accent(&theme.colors.checked_fg), base());

    print!("{}", pad(&item.id, ID_WIDTH));
    print!("{}", pad(item.type_label, TYPE_WIDTH));
    print!(
        "{}{}{}",
        accent(theme.colors.status(item.status)),
        pad(item.status.label(), STATUS_WIDTH),
        base()
    );
    print!("{}{}{}", accent(&theme.colors.text_dim), pad(&item.time_ago, AGE_WIDTH), base());
    print!("{}", pad(&item.entity, ENTITY_WIDTH));

    helpers::render_highlighted_text(
        &item.description,
        &item.highlight_ranges,
        theme,
        item.is_focused,
    );

    let line_len = LEADING_COLUMNS_WIDTH + char_len(&item.description);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
