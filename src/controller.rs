//! Optimistic completion toggle for a single task.
//!
//! A toggle flips the displayed value right away and yields a
//! [`PatchRequest`] for the caller to send. The matching response either
//! confirms it (the service value wins if it differs) or rolls back to the
//! value shown before the toggle. Responses carrying any other request id are
//! ignored.

use crate::errors::{ErrorChannel, ErrorKind};
use crate::models::{PatchRequest, RequestId, Task, TaskId};
use crate::service::ServiceError;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToggleError {
    #[error("task {0} already has an update in flight")]
    InFlight(TaskId),
    #[error("task {0} is not in the list")]
    UnknownTask(TaskId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemState {
    Idle,
    Updating {
        request: RequestId,
        optimistic: bool,
        snapshot: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Confirmed,
    Corrected,
    RolledBack,
    Stale,
}

#[derive(Debug)]
pub struct ItemController {
    task_id: TaskId,
    displayed_completed: bool,
    state: ItemState,
    errors: ErrorChannel,
}

impl ItemController {
    pub fn new(task: &Task, errors: ErrorChannel) -> Self {
        Self {
            task_id: task.id,
            displayed_completed: task.completed,
            state: ItemState::Idle,
            errors,
        }
    }

    pub fn displayed_completed(&self) -> bool {
        self.displayed_completed
    }

    pub fn is_updating(&self) -> bool {
        matches!(self.state, ItemState::Updating { .. })
    }

    #[cfg(test)]
    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Applies the flip locally and returns the patch to send.
    pub fn toggle(&mut self, request: RequestId) -> Result<PatchRequest, ToggleError> {
        if self.is_updating() {
            return Err(ToggleError::InFlight(self.task_id));
        }

        let snapshot = self.displayed_completed;
        let optimistic = !snapshot;
        self.displayed_completed = optimistic;
        self.state = ItemState::Updating {
            request,
            optimistic,
            snapshot,
        };

        Ok(PatchRequest {
            request,
            task_id: self.task_id,
            completed: optimistic,
        })
    }

    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<&Task, &ServiceError>,
    ) -> Resolution {
        let (optimistic, snapshot) = match self.state {
            ItemState::Updating {
                request: pending,
                optimistic,
                snapshot,
            } if pending == request => (optimistic, snapshot),
            _ => {
                debug!(task = %self.task_id, ?request, "ignoring response for superseded request");
                return Resolution::Stale;
            }
        };

        let resolution = match outcome {
            Ok(task) if task.completed != optimistic => {
                debug!(task = %self.task_id, completed = task.completed, "service corrected toggle");
                self.displayed_completed = task.completed;
                Resolution::Corrected
            }
            Ok(_) => Resolution::Confirmed,
            Err(err) => {
                warn!(task = %self.task_id, error = %err, "toggle failed, rolling back");
                self.displayed_completed = snapshot;
                self.errors.report(ErrorKind::Update);
                Resolution::RolledBack
            }
        };

        self.state = ItemState::Idle;
        resolution
    }

    /// Adopts a confirmed value from a list refresh. Ignored while a toggle is
    /// outstanding.
    pub fn sync_from_source(&mut self, confirmed_completed: bool) -> bool {
        if self.is_updating() {
            return false;
        }
        self.displayed_completed = confirmed_completed;
        true
    }
}
