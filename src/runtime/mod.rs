use crate::{
    actions,
    app::App,
    controller::Resolution,
    errors::ErrorKind,
    service::ServiceEvent,
};
use chrono::{Duration, Local};
use tracing::{info, warn};

pub fn tick(app: &mut App) {
    for event in app.dispatcher.poll() {
        handle_service_event(app, event);
    }

    handle_error_display(app);
    handle_periodic_refresh(app);

    if let Some(expiry) = app.toast_expiry
        && Local::now() >= expiry
    {
        app.toast_expiry = None;
        app.toast_message = None;
    }
}

pub fn handle_service_event(app: &mut App, event: ServiceEvent) {
    match event {
        ServiceEvent::Loaded(result) => {
            app.is_loading = false;
            app.last_refresh = Some(Local::now());
            match result {
                Ok(tasks) => {
                    info!(count = tasks.len(), "task list loaded");
                    app.has_loaded = true;
                    app.list.replace(tasks);
                    app.clamp_selection();
                }
                Err(err) => {
                    warn!(error = %err, "loading tasks failed");
                    app.errors.report(ErrorKind::Load);
                }
            }
            if app.refresh_queued {
                app.refresh_queued = false;
                actions::refresh(app);
            }
        }
        ServiceEvent::Patched { request, result } => {
            let succeeded = result.is_ok();
            let resolution = app.list.resolve_patch(&request, result);
            app.clamp_selection();
            if succeeded
                && resolution != Resolution::Stale
                && app.config.remote.refresh_after_update
            {
                actions::refresh(app);
            }
        }
        ServiceEvent::Deleted { id, result } => match result {
            Ok(()) => {
                info!(task = %id, "task deleted");
                app.list.remove(id);
                app.clamp_selection();
            }
            Err(err) => {
                warn!(task = %id, error = %err, "deleting task failed");
                if app.list.loading_id() == Some(id) {
                    app.list.set_loading(None);
                }
                app.errors.report(ErrorKind::Delete);
            }
        },
    }
}

/// Gives each newly reported error a display window, then clears the channel.
fn handle_error_display(app: &mut App) {
    let current = app.errors.current();
    let generation = app.errors.generation();
    if current != app.error_shown || generation != app.error_generation {
        app.error_shown = current;
        app.error_generation = generation;
        app.error_expiry = current.map(|_| {
            Local::now() + Duration::seconds(app.config.ui.error_seconds.max(1) as i64)
        });
    }

    if let Some(expiry) = app.error_expiry
        && Local::now() >= expiry
    {
        app.errors.clear();
        app.error_shown = None;
        app.error_expiry = None;
    }
}

fn handle_periodic_refresh(app: &mut App) {
    let every = app.config.remote.refresh_seconds;
    if every == 0 || app.is_loading {
        return;
    }
    let due = match app.last_refresh {
        Some(last) => Local::now() >= last + Duration::seconds(every as i64),
        None => true,
    };
    if due {
        actions::refresh(app);
    }
}
