use crate::{actions, app::App, config::key_match};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_popup_events(app: &mut App, key: KeyEvent) -> bool {
    if app.delete_target.is_some() {
        handle_delete_popup(app, key);
        return true;
    }
    if app.show_help_popup {
        if key.code == KeyCode::Esc || key_match(&key, &app.config.keybindings.global.help) {
            app.show_help_popup = false;
        }
        return true;
    }
    false
}

fn handle_delete_popup(app: &mut App, key: KeyEvent) {
    if key_match(&key, &app.config.keybindings.popup.confirm) {
        actions::confirm_delete(app);
    } else if key_match(&key, &app.config.keybindings.popup.cancel) {
        app.delete_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::make_test_app;
    use crate::models::{Task, TaskId};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn delete_popup_swallows_other_keys() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);
        app.delete_target = Some(TaskId(1));

        assert!(handle_popup_events(&mut app, press(KeyCode::Char(' '))));
        assert!(!app.list.is_busy(TaskId(1)));
        assert_eq!(app.delete_target, Some(TaskId(1)));
    }

    #[test]
    fn delete_popup_cancel_keeps_task() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);
        app.delete_target = Some(TaskId(1));

        handle_popup_events(&mut app, press(KeyCode::Esc));

        assert_eq!(app.delete_target, None);
        assert_eq!(app.list.loading_id(), None);
    }

    #[test]
    fn delete_popup_confirm_starts_delete() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);
        app.delete_target = Some(TaskId(1));

        handle_popup_events(&mut app, press(KeyCode::Char('y')));

        assert_eq!(app.list.loading_id(), Some(TaskId(1)));
    }

    #[test]
    fn help_closes_on_escape() {
        let mut app = make_test_app(Vec::new());
        app.show_help_popup = true;
        assert!(handle_popup_events(&mut app, press(KeyCode::Esc)));
        assert!(!app.show_help_popup);
        assert!(!handle_popup_events(&mut app, press(KeyCode::Esc)));
    }
}
