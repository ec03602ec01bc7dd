//! # In-Memory Provider
//!
//! A paged remote collection held in memory. Mutations emit `update`
//! change sets through the provider's change hub, which makes it usable
//! both as a data provider and as a global provider.

use crate::events::{ChangeEmitter, ChangeHandler, ChangeHub, ListenerId};
use crate::models::{Attributes, ChangeSet, ItemId, ModelRef, FILTER_PARAM};
use crate::services::provider::{DataParams, PageResult, RemoteProvider};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Default)]
struct PagingState {
    all: Vec<ModelRef>,
    /// Models delivered since the last reset
    loaded: Vec<ModelRef>,
    /// Index into the filtered collection of the next undelivered model
    cursor: usize,
    filter: Option<Value>,
}

impl PagingState {
    fn visible(&self) -> Vec<ModelRef> {
        self.all
            .iter()
            .filter(|model| matches_filter(model, self.filter.as_ref()))
            .cloned()
            .collect()
    }

    fn take_page(&mut self, page_size: usize) -> Vec<ModelRef> {
        let visible = self.visible();
        let end = (self.cursor + page_size).min(visible.len());
        let page = visible[self.cursor.min(end)..end].to_vec();
        self.cursor = end;
        self.loaded.extend(page.iter().cloned());
        page
    }
}

/// A filter object matches a model when every key equals the attribute
fn matches_filter(model: &ModelRef, filter: Option<&Value>) -> bool {
    match filter {
        Some(Value::Object(conditions)) => {
            let attributes = model.attributes().read();
            conditions
                .iter()
                .all(|(key, expected)| attributes.get(key) == Some(expected))
        }
        _ => true,
    }
}

pub struct MemoryProvider {
    state: Mutex<PagingState>,
    page_size: usize,
    hub: ChangeHub,
    last_params: Mutex<Option<DataParams>>,
}

impl MemoryProvider {
    pub fn new(models: Vec<ModelRef>, page_size: usize) -> Self {
        Self {
            state: Mutex::new(PagingState {
                all: models,
                ..PagingState::default()
            }),
            page_size: page_size.max(1),
            hub: ChangeHub::new(),
            last_params: Mutex::new(None),
        }
    }

    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    /// Params received by the most recent paging call
    pub fn last_params(&self) -> Option<DataParams> {
        self.last_params.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert models at the front of the collection and emit `added`.
    /// Models whose id already exists are skipped.
    pub fn add(&self, models: Vec<ModelRef>) {
        let added: Vec<ModelRef> = {
            let mut state = self.state.lock();
            let fresh: Vec<ModelRef> = models
                .into_iter()
                .filter(|m| !state.all.iter().any(|existing| existing.same_identity(m)))
                .collect();
            for (offset, model) in fresh.iter().enumerate() {
                state.all.insert(offset, model.clone());
            }
            // The cursor indexes the filtered collection; hidden models never shift it.
            let visible: Vec<ModelRef> = fresh
                .iter()
                .filter(|m| matches_filter(m, state.filter.as_ref()))
                .cloned()
                .collect();
            state.cursor += visible.len();
            state.loaded.splice(0..0, visible);
            fresh
        };
        if !added.is_empty() {
            tracing::debug!("MemoryProvider: {} model(s) added", added.len());
            self.hub.emit(&ChangeSet::added(added));
        }
    }

    /// Remove models by id and emit `removed`
    pub fn remove(&self, ids: &[ItemId]) {
        let removed: Vec<ModelRef> = {
            let mut state = self.state.lock();
            let removed: Vec<ModelRef> = state
                .all
                .iter()
                .filter(|m| ids.contains(m.id()))
                .cloned()
                .collect();
            let visible_before: Vec<ModelRef> = state.visible();
            let consumed = visible_before[..state.cursor.min(visible_before.len())]
                .iter()
                .filter(|m| ids.contains(m.id()))
                .count();
            state.all.retain(|m| !ids.contains(m.id()));
            state.loaded.retain(|m| !ids.contains(m.id()));
            state.cursor -= consumed;
            removed
        };
        if !removed.is_empty() {
            tracing::debug!("MemoryProvider: {} model(s) removed", removed.len());
            self.hub.emit(&ChangeSet::removed(removed));
        }
    }

    /// Merge attributes into an existing model and emit `merged`
    pub fn merge(&self, id: &ItemId, attributes: Attributes) -> Option<ModelRef> {
        let model = self
            .state
            .lock()
            .all
            .iter()
            .find(|m| m.id() == id)
            .cloned()?;
        for (key, value) in attributes {
            if key != "id" {
                model.set(key, value);
            }
        }
        tracing::debug!("MemoryProvider: model {} merged", id);
        self.hub.emit(&ChangeSet::merged(vec![model.clone()]));
        Some(model)
    }
}

#[async_trait]
impl RemoteProvider for MemoryProvider {
    fn reset(&self) {
        let mut state = self.state.lock();
        state.cursor = 0;
        state.loaded.clear();
    }

    fn has_next_page(&self) -> bool {
        let state = self.state.lock();
        state.cursor < state.visible().len()
    }

    async fn get_first_page(&self, data: DataParams) -> PageResult {
        let page = {
            let mut state = self.state.lock();
            state.filter = data.get(FILTER_PARAM).cloned();
            state.cursor = 0;
            state.loaded.clear();
            state.take_page(self.page_size)
        };
        *self.last_params.lock() = Some(data);
        Ok(page)
    }

    async fn get_next_page(&self, data: DataParams) -> PageResult {
        let page = self.state.lock().take_page(self.page_size);
        *self.last_params.lock() = Some(data);
        Ok(page)
    }

    fn emitter(&self) -> Option<&dyn ChangeEmitter> {
        Some(self)
    }

    fn models(&self) -> Vec<ModelRef> {
        self.state.lock().loaded.clone()
    }
}

impl ChangeEmitter for MemoryProvider {
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
