use crate::config::Theme;
use crate::ui::color_parser::parse_color;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ThemeTokens {
    pub ui_border_default: Color,
    pub ui_border_focus: Color,
    pub ui_selection_bg: Color,
    pub ui_muted: Color,
    pub tasks_done: Color,
    pub tasks_open: Color,
    pub tasks_busy: Color,
    pub ui_toast: Color,
    pub ui_error: Color,
}

impl ThemeTokens {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            ui_border_default: parse_color(&theme.border_default),
            ui_border_focus: parse_color(&theme.border_focus),
            ui_selection_bg: parse_color(&theme.text_highlight),
            ui_muted: parse_color(&theme.muted),
            tasks_done: parse_color(&theme.todo_done),
            tasks_open: parse_color(&theme.todo_open),
            tasks_busy: parse_color(&theme.busy),
            ui_toast: parse_color(&theme.toast),
            ui_error: parse_color(&theme.error),
        }
    }
}
