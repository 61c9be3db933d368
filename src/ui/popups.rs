use crate::app::App;
use crate::ui::components::centered_rect;
use crate::ui::theme::ThemeTokens;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_help_popup(f: &mut Frame, app: &App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.ui_border_default));
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(2)
        .split(area);

    let key_style = Style::default()
        .fg(tokens.ui_border_focus)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = help_entries(app)
        .into_iter()
        .map(|(keys, label)| {
            Line::from(vec![
                Span::styled(format!("{keys:<18}"), key_style),
                Span::raw(label),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner[0]);
    f.render_widget(
        Paragraph::new("Esc / ?: close").style(Style::default().fg(tokens.ui_muted)),
        inner[1],
    );
}

pub fn render_delete_popup(f: &mut Frame, app: &App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let title = app
        .delete_target
        .and_then(|id| app.list.tasks().iter().find(|task| task.id == id))
        .map(|task| task.title.as_str())
        .unwrap_or("<task>");

    let block = Block::default()
        .title(" Delete this todo? ")
        .borders(Borders::ALL)
        .style(Style::default().fg(tokens.ui_error));
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let text_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .margin(2)
        .split(area);

    let body = Paragraph::new(format!("Delete \"{title}\"? (y)es / (n)o"))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .wrap(Wrap { trim: true });

    let kb = &app.config.keybindings.popup;
    let help_text = Paragraph::new(format!(
        "{}: delete  {}: cancel",
        fmt_keys(&kb.confirm),
        fmt_keys(&kb.cancel)
    ))
    .style(Style::default().fg(tokens.ui_muted));

    f.render_widget(body, text_area[0]);
    f.render_widget(help_text, text_area[1]);
}

fn help_entries(app: &App) -> Vec<(String, &'static str)> {
    let kb = &app.config.keybindings;
    vec![
        (fmt_keys(&kb.tasks.up), "Move up"),
        (fmt_keys(&kb.tasks.down), "Move down"),
        (fmt_keys(&kb.tasks.top), "First task"),
        (fmt_keys(&kb.tasks.bottom), "Last task"),
        (fmt_keys(&kb.tasks.toggle), "Toggle completed"),
        (fmt_keys(&kb.tasks.delete), "Delete task"),
        (fmt_keys(&kb.global.filter), "Cycle filter (All / Active / Completed)"),
        (fmt_keys(&kb.global.refresh), "Reload from server"),
        (fmt_keys(&kb.global.help), "Toggle this help"),
        (fmt_keys(&kb.global.quit), "Quit"),
    ]
}

fn fmt_keys(keys: &[String]) -> String {
    if keys.is_empty() {
        return "-".to_string();
    }
    keys.join(" / ")
}
