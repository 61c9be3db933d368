use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do item as the remote service reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

#[cfg(test)]
impl Task {
    pub fn new(id: u64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: TaskId(id),
            title: title.into(),
            completed,
        }
    }
}

/// Body of a completion patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub completed: bool,
}

/// Monotonic token tying a service response to the toggle that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchRequest {
    pub request: RequestId,
    pub task_id: TaskId,
    pub completed: bool,
}

impl PatchRequest {
    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            completed: self.completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn next(self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Active,
            TaskFilter::Active => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Active => "Active",
            TaskFilter::Completed => "Completed",
        }
    }

    pub fn accepts(self, completed: bool) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !completed,
            TaskFilter::Completed => completed,
        }
    }
}

/// One drawable line of the task list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub busy: bool,
}
