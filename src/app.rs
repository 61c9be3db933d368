use crate::config::Config;
use crate::errors::{ErrorChannel, ErrorKind};
use crate::list::TaskList;
use crate::models::{TaskFilter, TaskId, TaskRow};
use crate::service::{Dispatcher, TaskService};
use chrono::{DateTime, Duration, Local};
use ratatui::widgets::ListState;
use std::sync::Arc;

pub struct App {
    pub config: Config,
    pub list: TaskList,
    pub errors: ErrorChannel,
    pub dispatcher: Dispatcher,
    pub filter: TaskFilter,
    pub tasks_state: ListState,

    // List fetch state
    pub is_loading: bool,
    pub has_loaded: bool,
    pub refresh_queued: bool,
    pub last_refresh: Option<DateTime<Local>>,

    // Error currently on screen and when it goes away
    pub error_shown: Option<ErrorKind>,
    pub error_generation: u64,
    pub error_expiry: Option<DateTime<Local>>,

    pub toast_message: Option<String>,
    pub toast_expiry: Option<DateTime<Local>>,

    pub show_help_popup: bool,
    pub delete_target: Option<TaskId>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, service: Arc<dyn TaskService>) -> App {
        let errors = ErrorChannel::new();
        let dispatcher = Dispatcher::new(service);
        let deletes = dispatcher.handle();
        let list = TaskList::new(Box::new(move |id| deletes.delete(id)), errors.clone());

        App {
            config,
            list,
            errors,
            dispatcher,
            filter: TaskFilter::All,
            tasks_state: ListState::default(),
            is_loading: false,
            has_loaded: false,
            refresh_queued: false,
            last_refresh: None,
            error_shown: None,
            error_generation: 0,
            error_expiry: None,
            toast_message: None,
            toast_expiry: None,
            show_help_popup: false,
            delete_target: None,
            should_quit: false,
        }
    }

    pub fn visible_rows(&self) -> Vec<TaskRow> {
        self.list.rows(self.filter)
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let i = self.tasks_state.selected()?;
        self.visible_rows().get(i).map(|row| row.id)
    }

    /// Keeps the selection on a visible row after the list or filter changed.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.tasks_state.select(None);
            return;
        }
        let i = self.tasks_state.selected().unwrap_or(0).min(len - 1);
        self.tasks_state.select(Some(i));
    }

    pub fn tasks_up(&mut self) {
        if self.visible_rows().is_empty() {
            return;
        }
        let i = match self.tasks_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.tasks_state.select(Some(i));
    }

    pub fn tasks_down(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.tasks_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.tasks_state.select(Some(i));
    }

    pub fn tasks_top(&mut self) {
        if !self.visible_rows().is_empty() {
            self.tasks_state.select(Some(0));
        }
    }

    pub fn tasks_bottom(&mut self) {
        let len = self.visible_rows().len();
        if len > 0 {
            self.tasks_state.select(Some(len - 1));
        }
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_expiry = Some(Local::now() + Duration::seconds(2));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
