//! Process-wide error slot.
//!
//! Controllers and actions report *that* something failed; the status line
//! shows the message and the runtime clears it after a while.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Delete,
    Update,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Load => "Unable to load todos",
            ErrorKind::Delete => "Unable to delete a todo",
            ErrorKind::Update => "Unable to update a todo",
        }
    }
}

/// Shared handle to the single active error. Cloning shares the slot.
///
/// Lives on the UI thread only; last write wins.
#[derive(Clone, Debug, Default)]
pub struct ErrorChannel {
    slot: Rc<RefCell<Option<ErrorKind>>>,
    generation: Rc<Cell<u64>>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, kind: Option<ErrorKind>) {
        if kind.is_some() {
            self.generation.set(self.generation.get() + 1);
        }
        *self.slot.borrow_mut() = kind;
    }

    pub fn report(&self, kind: ErrorKind) {
        self.set(Some(kind));
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn current(&self) -> Option<ErrorKind> {
        *self.slot.borrow()
    }

    /// Bumped on every report, so a repeat of the same kind is still news.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}
