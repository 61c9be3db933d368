//! Ordered task collection with one [`ItemController`] per task id.

use crate::controller::{ItemController, Resolution, ToggleError};
use crate::errors::ErrorChannel;
use crate::models::{PatchRequest, RequestId, Task, TaskFilter, TaskId, TaskRow};
use crate::service::ServiceError;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub type DeleteHandler = Box<dyn FnMut(TaskId)>;

pub struct TaskList {
    tasks: Vec<Task>,
    controllers: HashMap<TaskId, ItemController>,
    loading_id: Option<TaskId>,
    next_request: u64,
    on_delete: DeleteHandler,
    errors: ErrorChannel,
}

impl TaskList {
    pub fn new(on_delete: DeleteHandler, errors: ErrorChannel) -> Self {
        Self {
            tasks: Vec::new(),
            controllers: HashMap::new(),
            loading_id: None,
            next_request: 1,
            on_delete,
            errors,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[cfg(test)]
    pub fn controller(&self, id: TaskId) -> Option<&ItemController> {
        self.controllers.get(&id)
    }

    /// Swaps in a freshly fetched list.
    ///
    /// Controllers survive for ids still present, so in-flight toggles keep
    /// their optimistic value; idle ones adopt the new confirmed value.
    pub fn replace(&mut self, incoming: Vec<Task>) {
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(incoming.len());
        for task in incoming {
            if seen.insert(task.id) {
                tasks.push(task);
            } else {
                warn!(task = %task.id, "dropping duplicate task id from refresh");
            }
        }

        self.controllers.retain(|id, _| seen.contains(id));

        for task in &tasks {
            match self.controllers.get_mut(&task.id) {
                Some(controller) => {
                    if controller.displayed_completed() != task.completed
                        && !controller.sync_from_source(task.completed)
                    {
                        debug!(task = %task.id, "refresh skipped for task with update in flight");
                    }
                }
                None => {
                    self.controllers
                        .insert(task.id, ItemController::new(task, self.errors.clone()));
                }
            }
        }

        if let Some(loading) = self.loading_id
            && !seen.contains(&loading)
        {
            self.loading_id = None;
        }

        self.tasks = tasks;
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<PatchRequest, ToggleError> {
        let request = RequestId(self.next_request);
        let controller = self
            .controllers
            .get_mut(&id)
            .ok_or(ToggleError::UnknownTask(id))?;
        let patch = controller.toggle(request)?;
        self.next_request += 1;
        Ok(patch)
    }

    /// Routes a patch response to its controller. Responses for tasks that
    /// have since left the list are dropped.
    pub fn resolve_patch(
        &mut self,
        request: &PatchRequest,
        result: Result<Task, ServiceError>,
    ) -> Resolution {
        let Some(controller) = self.controllers.get_mut(&request.task_id) else {
            debug!(task = %request.task_id, "ignoring response for removed task");
            return Resolution::Stale;
        };

        let resolution = controller.resolve(request.request, result.as_ref());
        if let (Resolution::Confirmed | Resolution::Corrected, Ok(confirmed)) =
            (resolution, &result)
            && let Some(task) = self.tasks.iter_mut().find(|task| task.id == confirmed.id)
        {
            task.completed = confirmed.completed;
        }
        resolution
    }

    pub fn loading_id(&self) -> Option<TaskId> {
        self.loading_id
    }

    pub fn set_loading(&mut self, id: Option<TaskId>) {
        self.loading_id = id;
    }

    pub fn request_delete(&mut self, id: TaskId) {
        (self.on_delete)(id);
    }

    pub fn remove(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id != id);
        self.controllers.remove(&id);
        if self.loading_id == Some(id) {
            self.loading_id = None;
        }
    }

    pub fn is_busy(&self, id: TaskId) -> bool {
        self.loading_id == Some(id)
            || self
                .controllers
                .get(&id)
                .is_some_and(ItemController::is_updating)
    }

    pub fn displayed_completed(&self, id: TaskId) -> Option<bool> {
        self.controllers
            .get(&id)
            .map(ItemController::displayed_completed)
    }

    pub fn rows(&self, filter: TaskFilter) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .filter_map(|task| {
                let completed = self.displayed_completed(task.id).unwrap_or(task.completed);
                filter.accepts(completed).then(|| TaskRow {
                    id: task.id,
                    title: task.title.clone(),
                    completed,
                    busy: self.is_busy(task.id),
                })
            })
            .collect()
    }

    /// `(active, completed)` over displayed values.
    pub fn counts(&self) -> (usize, usize) {
        let done = self
            .tasks
            .iter()
            .filter(|task| self.displayed_completed(task.id).unwrap_or(task.completed))
            .count();
        (self.tasks.len() - done, done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_list(tasks: Vec<Task>) -> (TaskList, ErrorChannel, Rc<RefCell<Vec<TaskId>>>) {
        let errors = ErrorChannel::new();
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let sink = deleted.clone();
        let mut list = TaskList::new(
            Box::new(move |id| sink.borrow_mut().push(id)),
            errors.clone(),
        );
        list.replace(tasks);
        (list, errors, deleted)
    }

    fn failure() -> ServiceError {
        ServiceError::Request("network down".to_string())
    }

    #[test]
    fn buy_milk_toggle_succeeds() {
        let (mut list, errors, _) = make_list(vec![Task::new(1, "Buy milk", false)]);

        let patch = list.toggle(TaskId(1)).unwrap();
        assert_eq!(list.displayed_completed(TaskId(1)), Some(true));
        assert!(list.controller(TaskId(1)).unwrap().is_updating());

        list.resolve_patch(&patch, Ok(Task::new(1, "Buy milk", true)));

        assert!(!list.controller(TaskId(1)).unwrap().is_updating());
        assert_eq!(list.displayed_completed(TaskId(1)), Some(true));
        assert!(list.tasks()[0].completed);
        assert_eq!(errors.current(), None);
    }

    #[test]
    fn buy_milk_toggle_fails() {
        let (mut list, errors, _) = make_list(vec![Task::new(1, "Buy milk", false)]);

        let patch = list.toggle(TaskId(1)).unwrap();
        list.resolve_patch(&patch, Err(failure()));

        assert_eq!(list.displayed_completed(TaskId(1)), Some(false));
        assert!(!list.is_busy(TaskId(1)));
        assert!(!list.tasks()[0].completed);
        assert_eq!(errors.current(), Some(ErrorKind::Update));
    }

    #[test]
    fn failed_toggle_adopts_value_refreshed_while_in_flight() {
        let (mut list, _, _) = make_list(vec![Task::new(1, "Buy milk", false)]);
        let patch = list.toggle(TaskId(1)).unwrap();

        list.replace(vec![Task::new(1, "Buy milk", true)]);
        list.resolve_patch(&patch, Err(failure()));
        assert_eq!(list.displayed_completed(TaskId(1)), Some(false));

        list.replace(vec![Task::new(1, "Buy milk", true)]);
        assert_eq!(list.displayed_completed(TaskId(1)), Some(true));
        assert!(!list.is_busy(TaskId(1)));
    }

    #[test]
    fn overlay_shows_for_deleting_task_even_when_idle() {
        let (mut list, _, _) = make_list(vec![Task::new(5, "Pay rent", false)]);
        list.set_loading(Some(TaskId(5)));
        assert!(!list.controller(TaskId(5)).unwrap().is_updating());
        assert!(list.is_busy(TaskId(5)));
    }

    #[test]
    fn overlay_shows_for_updating_task_regardless_of_loading_id() {
        let (mut list, _, _) = make_list(vec![
            Task::new(5, "Pay rent", false),
            Task::new(6, "Call mom", false),
        ]);
        list.toggle(TaskId(5)).unwrap();

        list.set_loading(Some(TaskId(6)));
        assert!(list.is_busy(TaskId(5)));
        list.set_loading(None);
        assert!(list.is_busy(TaskId(5)));
        assert!(!list.is_busy(TaskId(6)));
    }

    #[test]
    fn refresh_does_not_clobber_in_flight_toggle() {
        let (mut list, _, _) = make_list(vec![
            Task::new(1, "Buy milk", false),
            Task::new(2, "Walk dog", false),
        ]);
        list.toggle(TaskId(1)).unwrap();

        list.replace(vec![Task::new(1, "Buy milk", false), Task::new(2, "Walk dog", true)]);

        assert_eq!(list.displayed_completed(TaskId(1)), Some(true));
        assert!(list.is_busy(TaskId(1)));
        assert_eq!(list.displayed_completed(TaskId(2)), Some(true));
    }

    #[test]
    fn controller_identity_survives_refresh() {
        let (mut list, _, _) = make_list(vec![Task::new(1, "Buy milk", false)]);
        let patch = list.toggle(TaskId(1)).unwrap();

        list.replace(vec![Task::new(3, "New", false), Task::new(1, "Buy milk", false)]);
        list.resolve_patch(&patch, Ok(Task::new(1, "Buy milk", true)));

        assert_eq!(list.displayed_completed(TaskId(1)), Some(true));
        assert!(!list.is_busy(TaskId(1)));
    }

    #[test]
    fn response_for_removed_task_is_ignored() {
        let (mut list, errors, _) = make_list(vec![Task::new(1, "Buy milk", false)]);
        let patch = list.toggle(TaskId(1)).unwrap();

        list.replace(Vec::new());
        let resolution = list.resolve_patch(&patch, Err(failure()));

        assert_eq!(resolution, Resolution::Stale);
        assert!(list.controller(TaskId(1)).is_none());
        assert_eq!(errors.current(), None);
    }

    #[test]
    fn response_for_recreated_task_does_not_apply() {
        let (mut list, _, _) = make_list(vec![Task::new(1, "Buy milk", false)]);
        let patch = list.toggle(TaskId(1)).unwrap();

        list.remove(TaskId(1));
        list.replace(vec![Task::new(1, "Buy milk", false)]);
        let resolution = list.resolve_patch(&patch, Ok(Task::new(1, "Buy milk", true)));

        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(list.displayed_completed(TaskId(1)), Some(false));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let (list, _, _) = make_list(vec![
            Task::new(1, "First", false),
            Task::new(1, "Second", true),
            Task::new(2, "Other", false),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].title, "First");
        assert_eq!(list.displayed_completed(TaskId(1)), Some(false));
    }

    #[test]
    fn delete_is_delegated_to_callback() {
        let (mut list, _, deleted) = make_list(vec![Task::new(4, "Trash", false)]);
        list.request_delete(TaskId(4));
        assert_eq!(deleted.borrow().as_slice(), &[TaskId(4)]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_clears_loading_id() {
        let (mut list, _, _) = make_list(vec![Task::new(4, "Trash", false)]);
        list.set_loading(Some(TaskId(4)));
        list.remove(TaskId(4));
        assert_eq!(list.loading_id(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_unknown_task_is_an_error() {
        let (mut list, _, _) = make_list(Vec::new());
        assert_eq!(
            list.toggle(TaskId(9)).unwrap_err(),
            ToggleError::UnknownTask(TaskId(9))
        );
    }

    #[test]
    fn one_failure_does_not_touch_other_items() {
        let (mut list, _, _) = make_list(vec![
            Task::new(1, "Buy milk", false),
            Task::new(2, "Walk dog", false),
        ]);
        let first = list.toggle(TaskId(1)).unwrap();
        let second = list.toggle(TaskId(2)).unwrap();
        assert_ne!(first.request, second.request);

        list.resolve_patch(&first, Err(failure()));

        assert_eq!(list.displayed_completed(TaskId(1)), Some(false));
        assert_eq!(list.displayed_completed(TaskId(2)), Some(true));
        assert!(list.is_busy(TaskId(2)));
    }

    #[test]
    fn rows_follow_displayed_value_and_filter() {
        let (mut list, _, _) = make_list(vec![
            Task::new(1, "Buy milk", false),
            Task::new(2, "Walk dog", true),
        ]);
        list.toggle(TaskId(1)).unwrap();

        let rows = list.rows(TaskFilter::Completed);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].busy);
        assert!(rows[0].completed);

        assert!(list.rows(TaskFilter::Active).is_empty());
        assert_eq!(list.counts(), (0, 2));
    }
}
