//! Remote task service boundary.
//!
//! The UI never calls a [`TaskService`] directly; every call goes through the
//! [`Dispatcher`] so it runs off the UI thread and comes back as a
//! [`ServiceEvent`].

mod http;
mod worker;

pub use http::HttpTaskService;
pub use worker::{Dispatcher, ServiceEvent};

use crate::models::{Task, TaskId, TaskPatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("service answered for task {returned} when task {requested} was patched")]
    Mismatch { requested: TaskId, returned: TaskId },
}

/// Source of truth for tasks. Implementations block; callers run them on
/// worker threads.
pub trait TaskService: Send + Sync {
    fn list(&self) -> Result<Vec<Task>, ServiceError>;

    /// Returns the authoritative task after the patch was applied.
    fn patch(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ServiceError>;

    fn delete(&self, id: TaskId) -> Result<(), ServiceError>;
}
