//! # Scripted Provider for Testing
//!
//! A `RemoteProvider` whose pages are queued up front. It counts calls,
//! can hold fetches open until released, can add latency, and exposes a
//! change hub so it can also act as a global provider.

use anyhow::anyhow;
use async_trait::async_trait;
use pagelink::events::{ChangeEmitter, ChangeHub};
use pagelink::models::{ChangeSet, Model, ModelRef};
use pagelink::services::{DataParams, PageResult, RemoteProvider};
use serde_json::Map;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Plain models with the given ids
pub fn models(ids: impl IntoIterator<Item = i64>) -> Vec<ModelRef> {
    ids.into_iter().map(|id| Model::new(id, Map::new())).collect()
}

/// Scripted page outcome
enum Page {
    Ok(Vec<ModelRef>),
    Err(String),
}

pub struct ScriptedProvider {
    pages: Mutex<VecDeque<Page>>,
    has_next: AtomicBool,
    loaded: Mutex<Vec<ModelRef>>,
    latency: Option<Duration>,
    gate: Mutex<Option<Arc<Notify>>>,
    with_events: bool,
    hub: ChangeHub,
    last_params: Mutex<Option<DataParams>>,
    pub reset_calls: AtomicUsize,
    pub first_page_calls: AtomicUsize,
    pub next_page_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            has_next: AtomicBool::new(false),
            loaded: Mutex::new(Vec::new()),
            latency: None,
            gate: Mutex::new(None),
            with_events: false,
            hub: ChangeHub::new(),
            last_params: Mutex::new(None),
            reset_calls: AtomicUsize::new(0),
            first_page_calls: AtomicUsize::new(0),
            next_page_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful page
    pub fn with_page(self, page: Vec<ModelRef>) -> Self {
        self.pages.lock().unwrap().push_back(Page::Ok(page));
        self
    }

    /// Queue a failing page
    pub fn with_failure(self, message: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Page::Err(message.to_string()));
        self
    }

    pub fn with_has_next(self, has_next: bool) -> Self {
        self.has_next.store(has_next, Ordering::SeqCst);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Expose the change hub through `emitter()`
    pub fn with_events(mut self) -> Self {
        self.with_events = true;
        self
    }

    pub fn set_has_next(&self, has_next: bool) {
        self.has_next.store(has_next, Ordering::SeqCst);
    }

    /// Make the next fetches wait until `release` is called
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn release(&self) {
        if let Some(gate) = self.gate.lock().unwrap().take() {
            gate.notify_waiters();
            gate.notify_one();
        }
    }

    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    pub fn emit(&self, change_set: ChangeSet) {
        self.hub.emit(&change_set);
    }

    pub fn last_params(&self) -> Option<DataParams> {
        self.last_params.lock().unwrap().clone()
    }

    pub fn first_pages(&self) -> usize {
        self.first_page_calls.load(Ordering::SeqCst)
    }

    pub fn next_pages(&self) -> usize {
        self.next_page_calls.load(Ordering::SeqCst)
    }

    async fn fetch(&self, data: DataParams) -> PageResult {
        *self.last_params.lock().unwrap() = Some(data);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let page = self.pages.lock().unwrap().pop_front();
        match page {
            Some(Page::Ok(models)) => {
                self.loaded.lock().unwrap().extend(models.iter().cloned());
                Ok(models)
            }
            Some(Page::Err(message)) => Err(anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl RemoteProvider for ScriptedProvider {
    fn reset(&self) {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        self.loaded.lock().unwrap().clear();
    }

    fn has_next_page(&self) -> bool {
        self.has_next.load(Ordering::SeqCst)
    }

    async fn get_first_page(&self, data: DataParams) -> PageResult {
        self.first_page_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch(data).await
    }

    async fn get_next_page(&self, data: DataParams) -> PageResult {
        self.next_page_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch(data).await
    }

    fn emitter(&self) -> Option<&dyn ChangeEmitter> {
        if self.with_events {
            Some(&self.hub)
        } else {
            None
        }
    }

    fn models(&self) -> Vec<ModelRef> {
        self.loaded.lock().unwrap().clone()
    }
}
