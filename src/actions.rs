use crate::{app::App, controller::ToggleError, models::TaskId};
use tracing::{debug, info};

pub fn refresh(app: &mut App) {
    if app.is_loading {
        app.refresh_queued = true;
        return;
    }
    info!("refreshing task list");
    app.is_loading = true;
    app.dispatcher.load();
}

pub fn toggle_selected(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        app.toast("No task selected.");
        return;
    };
    toggle_task(app, id);
}

pub fn toggle_task(app: &mut App, id: TaskId) {
    if app.list.loading_id() == Some(id) {
        app.toast("Task is being deleted.");
        return;
    }

    match app.list.toggle(id) {
        Ok(request) => app.dispatcher.patch(request),
        Err(ToggleError::InFlight(_)) => app.toast("Update already in progress."),
        Err(err @ ToggleError::UnknownTask(_)) => debug!(error = %err, "toggle ignored"),
    }
}

pub fn request_delete_selected(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        app.toast("No task selected.");
        return;
    };
    if app.config.ui.confirm_delete {
        app.delete_target = Some(id);
    } else {
        delete_task(app, id);
    }
}

pub fn confirm_delete(app: &mut App) {
    if let Some(id) = app.delete_target.take() {
        delete_task(app, id);
    }
}

pub fn delete_task(app: &mut App, id: TaskId) {
    if app.list.loading_id().is_some() {
        app.toast("Delete already in progress.");
        return;
    }
    info!(task = %id, "deleting task");
    app.list.set_loading(Some(id));
    app.list.request_delete(id);
}

pub fn cycle_filter(app: &mut App) {
    app.filter = app.filter.next();
    app.clamp_selection();
    app.toast(format!("Filter: {}", app.filter.label()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::make_test_app;
    use crate::models::{Task, TaskFilter};

    #[test]
    fn toggle_marks_selected_task_busy_and_dispatches() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);

        toggle_selected(&mut app);

        assert!(app.list.is_busy(TaskId(1)));
        assert_eq!(app.list.displayed_completed(TaskId(1)), Some(true));
        assert_eq!(app.dispatcher.in_flight(), 1);
    }

    #[test]
    fn double_toggle_is_rejected_with_toast() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);

        toggle_selected(&mut app);
        toggle_selected(&mut app);

        assert_eq!(app.dispatcher.in_flight(), 1);
        assert_eq!(app.list.displayed_completed(TaskId(1)), Some(true));
        assert_eq!(app.toast_message.as_deref(), Some("Update already in progress."));
    }

    #[test]
    fn toggle_is_refused_while_task_is_deleting() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);
        app.list.set_loading(Some(TaskId(1)));

        toggle_selected(&mut app);

        assert_eq!(app.dispatcher.in_flight(), 0);
        assert_eq!(app.list.displayed_completed(TaskId(1)), Some(false));
    }

    #[test]
    fn delete_with_confirmation_waits_for_confirm() {
        let mut app = make_test_app(vec![Task::new(1, "Buy milk", false)]);

        request_delete_selected(&mut app);
        assert_eq!(app.delete_target, Some(TaskId(1)));
        assert_eq!(app.list.loading_id(), None);

        confirm_delete(&mut app);
        assert_eq!(app.delete_target, None);
        assert_eq!(app.list.loading_id(), Some(TaskId(1)));
        assert!(app.list.is_busy(TaskId(1)));
        assert_eq!(app.dispatcher.in_flight(), 1);
    }

    #[test]
    fn only_one_delete_at_a_time() {
        let mut app = make_test_app(vec![Task::new(1, "a", false), Task::new(2, "b", false)]);
        app.config.ui.confirm_delete = false;

        delete_task(&mut app, TaskId(1));
        delete_task(&mut app, TaskId(2));

        assert_eq!(app.list.loading_id(), Some(TaskId(1)));
        assert_eq!(app.dispatcher.in_flight(), 1);
    }

    #[test]
    fn refresh_while_loading_is_queued() {
        let mut app = make_test_app(Vec::new());

        refresh(&mut app);
        refresh(&mut app);

        assert!(app.is_loading);
        assert!(app.refresh_queued);
        assert_eq!(app.dispatcher.in_flight(), 1);
    }

    #[test]
    fn cycle_filter_updates_selection() {
        let mut app = make_test_app(vec![Task::new(1, "a", true)]);
        cycle_filter(&mut app);
        assert_eq!(app.filter, TaskFilter::Active);
        assert_eq!(app.tasks_state.selected(), None);
    }
}
