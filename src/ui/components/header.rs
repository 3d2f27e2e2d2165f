//! Header component renderer.
//!
//! Title plus the global status counts, centered and bold.

use crate::domain::ActionStatus;
use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next row.
///
/// # Layout
///
/// ```text
/// [padding] Agent Actions   12 pending  3 approved  1 rejected [padding]
/// ```
///
/// Each count is drawn in its status color.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let segments = [
        (ActionStatus::Pending, header.counts.pending),
        (ActionStatus::Approved, header.counts.approved),
        (ActionStatus::Rejected, header.counts.rejected),
    ]
    .map(|(status, count)| (status, format!("{count} {status}")));

    let counts_len: usize = segments.iter().map(|(_, text)| char_len(text) + 2).sum();
    let line_len = char_len(&header.title) + 1 + counts_len;
    let padding = cols.saturating_sub(line_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{} ", header.title);

    for (status, text) in &segments {
        print!("  {}{text}", Theme::fg(theme.colors.status(*status)));
    }

    print!("{}", " ".repeat(cols.saturating_sub(padding + line_len)));
    print!("{}", Theme::reset());
    row + 1
}
