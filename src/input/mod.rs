pub(crate) mod navigate;
pub(crate) mod popups;

use crate::app::App;
use crossterm::event::{self, Event, KeyEventKind};

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Mouse(mouse_event) => match mouse_event.kind {
            event::MouseEventKind::ScrollUp => app.tasks_up(),
            event::MouseEventKind::ScrollDown => app.tasks_down(),
            _ => {}
        },
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if popups::handle_popup_events(app, key) {
                return;
            }
            navigate::handle_normal_mode(app, key);
        }
        _ => {}
    }
}
