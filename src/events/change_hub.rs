//! # Change Hub
//!
//! Listener registry for `update` events using the observer pattern.
//! Remote providers expose it as their event surface and the mirror
//! collection uses it for local change notification.

use crate::models::ChangeSet;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Type alias for change handlers to reduce complexity
pub type ChangeHandler = Arc<dyn Fn(&ChangeSet) + Send + Sync>;

/// Handle returned by `on_update`, used to deregister that one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event surface of anything that emits `update` change sets
pub trait ChangeEmitter: Send + Sync {
    /// Register a handler for `update` events
    fn on_update(&self, handler: ChangeHandler) -> ListenerId;

    /// Deregister one handler
    fn off(&self, id: ListenerId);

    /// Deregister every handler
    fn off_all(&self);
}

/// Simple in-memory change emitter
pub struct ChangeHub {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(ListenerId, ChangeHandler)>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a change set to every handler registered at call time.
    ///
    /// Handlers run after the registry lock is released, so a handler may
    /// register or deregister listeners on this hub.
    pub fn emit(&self, change_set: &ChangeSet) {
        let handlers: Vec<ChangeHandler> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(change_set);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter for ChangeHub {
    fn on_update(&self, handler: ChangeHandler) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((id, handler));
        id
    }

    fn off(&self, id: ListenerId) {
        self.handlers.lock().retain(|(listener, _)| *listener != id);
    }

    fn off_all(&self) {
        self.handlers.lock().clear();
    }
}
