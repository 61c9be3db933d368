use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub mod color_parser;
pub mod components;
pub mod popups;
pub mod theme;

use components::{task_text, truncate};
use popups::{render_delete_popup, render_help_popup};
use theme::ThemeTokens;

pub fn ui(f: &mut Frame, app: &mut App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    render_task_list(f, app, chunks[0], &tokens);
    render_status_bar(f, app, chunks[1], &tokens);

    if app.show_help_popup {
        render_help_popup(f, app);
    }
    if app.delete_target.is_some() {
        render_delete_popup(f, app);
    }
}

fn render_task_list(f: &mut Frame, app: &mut App, area: Rect, tokens: &ThemeTokens) {
    let rows = app.visible_rows();
    let title_text = format!(
        "TODOS ({}: {}) · {}",
        app.filter.label(),
        rows.len(),
        app.config.remote.base_url
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.ui_border_focus))
        .title(Line::from(Span::styled(
            truncate(&title_text, area.width.saturating_sub(4) as usize),
            Style::default()
                .fg(tokens.ui_border_focus)
                .add_modifier(Modifier::BOLD),
        )));

    let inner = block.inner(area);
    if rows.is_empty() {
        let message = if app.is_loading && !app.has_loaded {
            "Loading…"
        } else if app.list.is_empty() {
            "No todos yet."
        } else {
            "Nothing matches this filter."
        };
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(tokens.ui_muted))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let width = inner.width.max(1) as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(task_text(row, tokens, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("")
        .highlight_style(
            Style::default()
                .bg(tokens.ui_selection_bg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut app.tasks_state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect, tokens: &ThemeTokens) {
    let (active, done) = app.list.counts();
    let mut left = format!(
        " {active} items left · {done} done · Filter: {}",
        app.filter.label()
    );
    if app.is_loading {
        left.push_str(" · Loading…");
    }
    let left_line = Line::from(Span::styled(left, Style::default().fg(tokens.ui_muted)));

    let status_message = if let Some(kind) = app.errors.current() {
        Some((kind.message().to_string(), tokens.ui_error))
    } else {
        app.toast_message
            .as_deref()
            .filter(|toast| !toast.is_empty())
            .map(|toast| (toast.to_string(), tokens.ui_toast))
    };

    let Some((message, color)) = status_message else {
        f.render_widget(Paragraph::new(left_line), area);
        return;
    };

    let min_left_width = 10u16;
    let max_right = area.width.saturating_sub(min_left_width);
    let right_width = (UnicodeWidthStr::width(message.as_str()) as u16 + 1).min(max_right);
    if right_width == 0 {
        f.render_widget(Paragraph::new(left_line), area);
        return;
    }

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    f.render_widget(Paragraph::new(left_line), status_chunks[0]);
    let right = Paragraph::new(Line::from(Span::styled(
        truncate(&message, right_width as usize),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Right);
    f.render_widget(right, status_chunks[1]);
}
