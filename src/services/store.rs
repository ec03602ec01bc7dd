//! # Foreign Store
//!
//! An externally owned reactive store that some mediators materialize
//! their items from. Listeners see the current state when they subscribe
//! and every state change afterwards.

use crate::models::ModelRef;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot of a store's state
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub items: Vec<ModelRef>,
}

/// Type alias for store listeners to reduce complexity
pub type StoreListener = Arc<dyn Fn(&StoreState) + Send + Sync>;

pub trait ForeignStore: Send + Sync {
    /// Write freshly read models into the store
    fn put(&self, models: &[ModelRef]);

    /// Subscribe to the state stream. The listener is called with the
    /// current state before this returns.
    fn subscribe(&self, listener: StoreListener) -> StoreSubscription;
}

/// Live subscription to a store. Dropping it unsubscribes.
///
/// Unsubscribing only flips a flag; stores skip inactive listeners and
/// prune them on their next emission, so it is safe to unsubscribe from
/// inside a listener.
#[derive(Debug)]
pub struct StoreSubscription {
    active: Arc<AtomicBool>,
}

impl StoreSubscription {
    /// Create a subscription and the flag a store checks before each delivery
    pub fn pair() -> (Self, Arc<AtomicBool>) {
        let active = Arc::new(AtomicBool::new(true));
        (
            Self {
                active: Arc::clone(&active),
            },
            active,
        )
    }

    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// In-memory store keeping items unique by id
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    listeners: Mutex<Vec<(Arc<AtomicBool>, StoreListener)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StoreState {
        self.state.lock().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|(active, _)| active.load(Ordering::SeqCst))
            .count()
    }

    fn emit(&self) {
        let state = self.state();
        let listeners: Vec<(Arc<AtomicBool>, StoreListener)> = {
            let mut listeners = self.listeners.lock();
            listeners.retain(|(active, _)| active.load(Ordering::SeqCst));
            listeners.clone()
        };
        for (active, listener) in listeners {
            if active.load(Ordering::SeqCst) {
                listener(&state);
            }
        }
    }
}

impl ForeignStore for MemoryStore {
    fn put(&self, models: &[ModelRef]) {
        {
            let mut state = self.state.lock();
            for model in models {
                match state.items.iter().position(|m| m.same_identity(model)) {
                    Some(index) => state.items[index] = Arc::clone(model),
                    None => state.items.push(Arc::clone(model)),
                }
            }
        }
        self.emit();
    }

    fn subscribe(&self, listener: StoreListener) -> StoreSubscription {
        let (subscription, active) = StoreSubscription::pair();
        self.listeners
            .lock()
            .push((Arc::clone(&active), Arc::clone(&listener)));
        let state = self.state();
        listener(&state);
        subscription
    }
}
