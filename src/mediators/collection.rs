//! # View-Level Data
//!
//! Ordered, id-unique mirror of what a reconciling mediator has shown.
//! Insertions and removals announce themselves through the collection's
//! own change hub; the mediator listens there to patch the view.

use crate::events::{ChangeEmitter, ChangeHandler, ChangeHub, ListenerId};
use crate::models::{ChangeSet, ItemId, ModelRef};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Default)]
struct MirrorState {
    models: Vec<ModelRef>,
    ids: HashSet<ItemId>,
}

#[derive(Default)]
pub struct ViewLevelData {
    state: Mutex<MirrorState>,
    hub: ChangeHub,
}

impl ViewLevelData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models(&self) -> Vec<ModelRef> {
        self.state.lock().models.clone()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.state
            .lock()
            .models
            .iter()
            .map(|model| model.id().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.state.lock().ids.contains(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<ModelRef> {
        self.state
            .lock()
            .models
            .iter()
            .find(|model| model.id() == id)
            .cloned()
    }

    /// Models not present yet, keeping only the first of any repeated id
    pub fn unseen(&self, models: &[ModelRef]) -> Vec<ModelRef> {
        let state = self.state.lock();
        let mut seen = HashSet::new();
        models
            .iter()
            .filter(|model| !state.ids.contains(model.id()) && seen.insert(model.id().clone()))
            .cloned()
            .collect()
    }

    /// Insert one model and announce it as `added`.
    ///
    /// `at` is clamped to the current length; `None` appends. Returns false
    /// without announcing anything when the id is already present.
    pub fn insert(&self, model: ModelRef, at: Option<usize>) -> bool {
        {
            let mut state = self.state.lock();
            if !state.ids.insert(model.id().clone()) {
                return false;
            }
            let index = at.map_or(state.models.len(), |i| i.min(state.models.len()));
            state.models.insert(index, Arc::clone(&model));
        }
        self.hub.emit(&ChangeSet::added(vec![model]));
        true
    }

    /// Remove models by id and announce the ones that were present
    pub fn remove(&self, models: &[ModelRef]) -> Vec<ModelRef> {
        let removed: Vec<ModelRef> = {
            let mut state = self.state.lock();
            let doomed: HashSet<ItemId> = models
                .iter()
                .map(|model| model.id().clone())
                .filter(|id| state.ids.contains(id))
                .collect();
            if doomed.is_empty() {
                return Vec::new();
            }
            let (removed, kept): (Vec<ModelRef>, Vec<ModelRef>) = state
                .models
                .drain(..)
                .partition(|model| doomed.contains(model.id()));
            state.models = kept;
            for id in &doomed {
                state.ids.remove(id);
            }
            removed
        };
        self.hub.emit(&ChangeSet::removed(removed.clone()));
        removed
    }

    /// Append models without announcing them, returning the ones kept
    pub fn add_silently(&self, models: Vec<ModelRef>) -> Vec<ModelRef> {
        let mut state = self.state.lock();
        let mut kept = Vec::with_capacity(models.len());
        for model in models {
            if state.ids.insert(model.id().clone()) {
                state.models.push(Arc::clone(&model));
                kept.push(model);
            }
        }
        kept
    }

    /// Re-announce a change set to this collection's listeners
    pub fn broadcast(&self, change_set: &ChangeSet) {
        self.hub.emit(change_set);
    }

    /// Drop every model without announcing anything
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.models.clear();
        state.ids.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }
}

impl ChangeEmitter for ViewLevelData {
    fn on_update(&self, handler: ChangeHandler) -> ListenerId {
        self.hub.on_update(handler)
    }

    fn off(&self, id: ListenerId) {
        self.hub.off(id)
    }

    fn off_all(&self) {
        self.hub.off_all()
    }
}
