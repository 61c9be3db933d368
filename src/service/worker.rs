use super::{ServiceError, TaskService};
use crate::models::{PatchRequest, Task, TaskId};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::debug;

/// Result of one background service call, delivered back to the UI thread.
#[derive(Debug)]
pub enum ServiceEvent {
    Loaded(Result<Vec<Task>, ServiceError>),
    Patched {
        request: PatchRequest,
        result: Result<Task, ServiceError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), ServiceError>,
    },
}

/// Cloneable sending side of the dispatcher, handed to callbacks that need to
/// start service calls themselves.
#[derive(Clone)]
pub struct DispatchHandle {
    service: Arc<dyn TaskService>,
    sender: Sender<ServiceEvent>,
    in_flight: Rc<Cell<usize>>,
}

impl DispatchHandle {
    pub fn load(&self) {
        debug!("dispatch list");
        self.spawn(|service| ServiceEvent::Loaded(service.list()));
    }

    pub fn patch(&self, request: PatchRequest) {
        debug!(task = %request.task_id, completed = request.completed, "dispatch patch");
        self.spawn(move |service| ServiceEvent::Patched {
            request,
            result: service.patch(request.task_id, &request.patch()),
        });
    }

    pub fn delete(&self, id: TaskId) {
        debug!(task = %id, "dispatch delete");
        self.spawn(move |service| ServiceEvent::Deleted {
            id,
            result: service.delete(id),
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn TaskService) -> ServiceEvent + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        self.in_flight.set(self.in_flight.get() + 1);
        thread::spawn(move || {
            let event = job(service.as_ref());
            let _ = sender.send(event);
        });
    }
}

/// Runs blocking service calls on worker threads. Results are only observed
/// through [`Dispatcher::poll`], which the UI loop calls every tick.
pub struct Dispatcher {
    handle: DispatchHandle,
    receiver: Receiver<ServiceEvent>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            handle: DispatchHandle {
                service,
                sender,
                in_flight: Rc::new(Cell::new(0)),
            },
            receiver,
        }
    }

    pub fn handle(&self) -> DispatchHandle {
        self.handle.clone()
    }

    pub fn load(&self) {
        self.handle.load();
    }

    pub fn patch(&self, request: PatchRequest) {
        self.handle.patch(request);
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.handle.in_flight.get()
    }

    /// Drains every finished call without blocking.
    pub fn poll(&self) -> Vec<ServiceEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.finish_one();
                    events.push(event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Blocks until every outstanding call has reported back.
    #[cfg(test)]
    pub fn wait_all(&self) -> Vec<ServiceEvent> {
        let mut events = Vec::new();
        while self.in_flight() > 0 {
            match self
                .receiver
                .recv_timeout(std::time::Duration::from_secs(5))
            {
                Ok(event) => {
                    self.finish_one();
                    events.push(event);
                }
                Err(_) => break,
            }
        }
        events
    }

    fn finish_one(&self) {
        let in_flight = &self.handle.in_flight;
        in_flight.set(in_flight.get().saturating_sub(1));
    }
}
