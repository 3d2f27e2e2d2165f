//! Dialog component renderer.
//!
//! Draws a framed box centered over the table. The box is sized to its
//! content and clipped to the pane.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmView, DetailsView, ModalView};

/// Widest the dialog grows, frame included.
const MAX_MODAL_WIDTH: usize = 76;

/// One line inside the frame, with an optional accent color.
struct ModalLine {
    text: String,
    color: Option<String>,
    bold: bool,
}

impl ModalLine {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None, bold: false }
    }

    fn colored(text: impl Into<String>, color: &str) -> Self {
        Self { text: text.into(), color: Some(color.to_string()), bold: false }
    }

    fn title(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None, bold: true }
    }
}

/// Renders `modal` centered in a `cols` x `rows` pane.
pub fn render_modal(modal: &ModalView, theme: &Theme, cols: usize, rows: usize) {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    let inner_width = width.saturating_sub(4);

    let lines = match modal {
        ModalView::Details(details) => details_lines(details, theme, inner_width),
        ModalView::Confirm(confirm) => confirm_lines(confirm, theme),
    };

    let height = (lines.len() + 2).min(rows);
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.modal_border);

    position_cursor(top, left);
    print!("{border}╭{}╮{}", "─".repeat(width.saturating_sub(2)), Theme::reset());

    for (offset, line) in lines.iter().take(height.saturating_sub(2)).enumerate() {
        let text = truncate(&line.text, inner_width);
        let fill = inner_width.saturating_sub(char_len(&text));

        position_cursor(top + 1 + offset, left);
        print!("{border}│{} ", Theme::reset());
        if line.bold {
            print!("{}", Theme::bold());
        }
        match &line.color {
            Some(color) => print!("{}", Theme::fg(color)),
            None => print!("{}", Theme::fg(&theme.colors.text_normal)),
        }
        print!("{text}{}", " ".repeat(fill));
        print!("{} {border}│{}", Theme::reset(), Theme::reset());
    }

    position_cursor(top + height.saturating_sub(1), left);
    print!("{border}╰{}╯{}", "─".repeat(width.saturating_sub(2)), Theme::reset());
}

fn details_lines(details: &DetailsView, theme: &Theme, inner_width: usize) -> Vec<ModalLine> {
    let mut lines = vec![
        ModalLine::title(format!("{}  {}", details.id, details.type_label)),
        ModalLine::plain(""),
    ];

    lines.extend(wrap(&details.description, inner_width).into_iter().map(ModalLine::plain));
    lines.push(ModalLine::plain(""));

    lines.push(ModalLine::plain(format!("Entity:     {}", details.entity)));
    lines.push(ModalLine::colored(
        format!("Status:     {}", details.status.label()),
        theme.colors.status(details.status),
    ));
    lines.push(ModalLine::plain(format!(
        "Created:    {} ({})",
        details.timestamp, details.time_ago
    )));

    if let Some(confidence) = details.confidence {
        lines.push(ModalLine::plain(format!("Confidence: {confidence}%")));
    }
    if let Some(source) = &details.source {
        lines.push(ModalLine::plain(format!("Source:     {source}")));
    }
    if !details.related_entities.is_empty() {
        lines.push(ModalLine::plain(format!(
            "Related:    {}",
            details.related_entities.join(", ")
        )));
    }
    if let Some(text) = &details.details {
        lines.push(ModalLine::plain(""));
        lines.extend(wrap(text, inner_width).into_iter().map(ModalLine::plain));
    }

    lines.push(ModalLine::plain(""));
    let hint = if details.can_decide {
        "a: approve   r: reject   Esc: close"
    } else {
        "u: undo   Esc: close"
    };
    lines.push(ModalLine::colored(hint, &theme.colors.text_dim));
    lines
}

fn confirm_lines(confirm: &ConfirmView, theme: &Theme) -> Vec<ModalLine> {
    vec![
        ModalLine::title(confirm.title.clone()),
        ModalLine::plain(""),
        ModalLine::plain(confirm.message.clone()),
        ModalLine::plain(""),
        ModalLine::colored("y/Enter: confirm   n/Esc: cancel", &theme.colors.text_dim),
    ]
}

/// Greedy word wrap to `width` characters; overlong words are truncated.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&truncate(word, width));
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
