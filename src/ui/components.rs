use crate::models::TaskRow;
use crate::ui::theme::ThemeTokens;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BUSY_MARKER: &str = " ⟳";
const CHECKBOX_WIDTH: usize = 4; // "[x] "

/// Helper function to calculate centered popup position
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

/// Builds the lines for one task: checkbox, wrapped title, and the busy marker
/// on the last line while a toggle or delete is in flight.
pub fn task_text(row: &TaskRow, tokens: &ThemeTokens, width: usize) -> Text<'static> {
    let (checkbox, check_color) = if row.completed {
        ("[x] ", tokens.tasks_done)
    } else {
        ("[ ] ", tokens.tasks_open)
    };

    let mut title_style = Style::default();
    if row.completed {
        title_style = title_style
            .fg(tokens.tasks_done)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if row.busy {
        title_style = title_style.add_modifier(Modifier::DIM);
    }

    let marker_width = if row.busy {
        UnicodeWidthStr::width(BUSY_MARKER)
    } else {
        0
    };
    let title_width = width
        .saturating_sub(CHECKBOX_WIDTH + marker_width)
        .max(1);
    let wrapped = textwrap::wrap(&row.title, title_width);

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(wrapped.len().max(1));
    for (i, part) in wrapped.iter().enumerate() {
        let lead = if i == 0 {
            Span::styled(checkbox, Style::default().fg(check_color))
        } else {
            Span::raw(" ".repeat(CHECKBOX_WIDTH))
        };
        lines.push(Line::from(vec![
            lead,
            Span::styled(part.to_string(), title_style),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            checkbox,
            Style::default().fg(check_color),
        )));
    }

    if row.busy
        && let Some(last) = lines.last_mut()
    {
        last.spans.push(Span::styled(
            BUSY_MARKER,
            Style::default()
                .fg(tokens.tasks_busy)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Text::from(lines)
}
