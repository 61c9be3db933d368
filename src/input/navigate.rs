use crate::{actions, app::App, config::key_match};
use crossterm::event::KeyEvent;

/// Bottom is checked before top because a plain "g" binding also matches shift+g.
pub fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    let kb = &app.config.keybindings;
    if key_match(&key, &kb.global.quit) {
        app.quit();
    } else if key_match(&key, &kb.global.help) {
        app.show_help_popup = true;
    } else if key_match(&key, &kb.global.refresh) {
        actions::refresh(app);
    } else if key_match(&key, &kb.global.filter) {
        actions::cycle_filter(app);
    } else if key_match(&key, &kb.tasks.up) {
        app.tasks_up();
    } else if key_match(&key, &kb.tasks.down) {
        app.tasks_down();
    } else if key_match(&key, &kb.tasks.bottom) {
        app.tasks_bottom();
    } else if key_match(&key, &kb.tasks.top) {
        app.tasks_top();
    } else if key_match(&key, &kb.tasks.toggle) {
        actions::toggle_selected(app);
    } else if key_match(&key, &kb.tasks.delete) {
        actions::request_delete_selected(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::make_test_app;
    use crate::models::{Task, TaskId};
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn space_toggles_selected_task() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);
        handle_normal_mode(&mut app, press(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(app.list.is_busy(TaskId(1)));
    }

    #[test]
    fn shift_g_jumps_to_bottom() {
        let mut app = make_test_app(vec![Task::new(1, "a", false), Task::new(2, "b", false)]);
        handle_normal_mode(&mut app, press(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(app.selected_task_id(), Some(TaskId(2)));
        handle_normal_mode(&mut app, press(KeyCode::Char('g'), KeyModifiers::NONE));
        assert_eq!(app.selected_task_id(), Some(TaskId(1)));
    }

    #[test]
    fn q_quits() {
        let mut app = make_test_app(Vec::new());
        handle_normal_mode(&mut app, press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
