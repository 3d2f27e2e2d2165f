//! Status line showing the latest notification.

use crate::review::Severity;
use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Renders the status line at `row` (blank when there is no notification).
///
/// ```text
///  ✓ Action approved · Action ACT-1001 has been approved.   u: undo
/// ```
pub fn render_toast(row: usize, toast: Option<&ToastInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(toast) = toast else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let icon = match toast.severity {
        Severity::Success => '✓',
        Severity::Error => '✗',
        Severity::Info => 'i',
    };

    let mut text = format!(" {icon} {}", toast.message);
    if let Some(description) = &toast.description {
        text.push_str(" · ");
        text.push_str(description);
    }

    let hint = if toast.offers_undo { "u: undo " } else { "" };
    let text = truncate(&text, cols.saturating_sub(char_len(hint)));
    let gap = cols.saturating_sub(char_len(&text) + char_len(hint));

    print!("{}", Theme::fg(theme.colors.severity(toast.severity)));
    print!("{text}");
    print!("{}", " ".repeat(gap));
    print!("{}{}{hint}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    print!("{}", Theme::reset());
    row + 1
}
