//! # Recording View for Testing
//!
//! A `ViewContract` implementation that records every call the mediator
//! makes and keeps a simulated item list, so tests can assert both the
//! call sequence and the resulting view contents.

use pagelink::models::{ItemId, SearchCriteria, ViewItem};
use pagelink::views::{
    DataView, Indicator, RefreshIndicator, RenderHooks, Router, SearchNavigate, ViewCallback,
    ViewContract,
};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Type alias for call storage to reduce complexity
type CallLog = Arc<Mutex<Vec<ViewCall>>>;

/// Calls that can be tracked
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Init,
    SetRefreshCallback,
    SetInfiniteCallback,
    Clean,
    AsyncPush(Vec<ItemId>),
    SyncPush(Vec<ItemId>),
    AsyncPop(Vec<ItemId>),
    AsyncPrepend(Vec<ItemId>),
    AsyncRefresh(Vec<ItemId>),
    HasMoreData(bool),
    SetupSearch(Value),
    UpdateSearchCriteria(Value),
    LoaderShow,
    LoaderHide,
    RefresherShow(bool),
    RefresherHide(bool),
    MoreLoaderShow,
    MoreLoaderHide,
    RouterGo(String, Map<String, Value>),
}

fn ids(items: &[ViewItem]) -> Vec<ItemId> {
    items.iter().filter_map(ViewItem::id).collect()
}

pub struct RecordingData {
    log: CallLog,
    items: Mutex<Vec<ViewItem>>,
    refresh_callback: Mutex<Option<ViewCallback>>,
    infinite_callback: Mutex<Option<ViewCallback>>,
    search_navigate: Mutex<Option<SearchNavigate>>,
}

impl DataView for RecordingData {
    fn init(&self) {
        self.log.lock().unwrap().push(ViewCall::Init);
    }

    fn set_refresh_callback(&self, callback: ViewCallback) {
        self.log.lock().unwrap().push(ViewCall::SetRefreshCallback);
        *self.refresh_callback.lock().unwrap() = Some(callback);
    }

    fn set_infinite_callback(&self, callback: ViewCallback) {
        self.log.lock().unwrap().push(ViewCall::SetInfiniteCallback);
        *self.infinite_callback.lock().unwrap() = Some(callback);
    }

    fn clean(&self) {
        self.log.lock().unwrap().push(ViewCall::Clean);
        self.items.lock().unwrap().clear();
    }

    fn async_push(&self, items: Vec<ViewItem>) {
        self.log.lock().unwrap().push(ViewCall::AsyncPush(ids(&items)));
        self.items.lock().unwrap().extend(items);
    }

    fn sync_push(&self, items: Vec<ViewItem>) {
        self.log.lock().unwrap().push(ViewCall::SyncPush(ids(&items)));
        self.items.lock().unwrap().extend(items);
    }

    fn async_pop(&self, items: Vec<ViewItem>) {
        let doomed = ids(&items);
        self.log.lock().unwrap().push(ViewCall::AsyncPop(doomed.clone()));
        self.items
            .lock()
            .unwrap()
            .retain(|item| !item.id().is_some_and(|id| doomed.contains(&id)));
    }

    fn async_prepend(&self, items: Vec<ViewItem>) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::AsyncPrepend(ids(&items)));
        let mut current = self.items.lock().unwrap();
        let rest = std::mem::take(&mut *current);
        current.extend(items);
        current.extend(rest);
    }

    fn async_refresh(&self, items: Vec<ViewItem>) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::AsyncRefresh(ids(&items)));
    }

    fn has_more_data(&self, more: bool) {
        self.log.lock().unwrap().push(ViewCall::HasMoreData(more));
    }

    fn get_items(&self) -> Vec<ViewItem> {
        self.items.lock().unwrap().clone()
    }

    fn setup_search(&self, criteria: &SearchCriteria, on_navigate: SearchNavigate) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::SetupSearch(criteria.filter.clone()));
        *self.search_navigate.lock().unwrap() = Some(on_navigate);
    }

    fn update_search_criteria(&self, criteria: &SearchCriteria) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::UpdateSearchCriteria(criteria.filter.clone()));
    }
}

pub struct RecordingIndicator {
    log: CallLog,
    on_show: ViewCall,
    on_hide: ViewCall,
}

impl Indicator for RecordingIndicator {
    fn show(&self) {
        self.log.lock().unwrap().push(self.on_show.clone());
    }

    fn hide(&self) {
        self.log.lock().unwrap().push(self.on_hide.clone());
    }
}

pub struct RecordingRefresher {
    log: CallLog,
}

impl RefreshIndicator for RecordingRefresher {
    fn show(&self, is_programmatic: bool) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::RefresherShow(is_programmatic));
    }

    fn hide(&self, is_programmatic: bool) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::RefresherHide(is_programmatic));
    }
}

pub struct RecordingRouter {
    log: CallLog,
}

impl Router for RecordingRouter {
    fn go(&self, url: &str, params: &Map<String, Value>) {
        self.log
            .lock()
            .unwrap()
            .push(ViewCall::RouterGo(url.to_string(), params.clone()));
    }
}

#[derive(Default)]
pub struct RecordingRender {
    ready: Mutex<Option<ViewCallback>>,
    destroy: Mutex<Option<ViewCallback>>,
}

impl RenderHooks for RecordingRender {
    fn ready(&self, callback: ViewCallback) {
        *self.ready.lock().unwrap() = Some(callback);
    }

    fn destroy(&self, callback: ViewCallback) {
        *self.destroy.lock().unwrap() = Some(callback);
    }
}

/// View that tracks calls for testing
pub struct RecordingView {
    log: CallLog,
    data: RecordingData,
    loader: RecordingIndicator,
    refresher: RecordingRefresher,
    more_loader: RecordingIndicator,
    router: RecordingRouter,
    render: RecordingRender,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        Arc::new(Self {
            data: RecordingData {
                log: log.clone(),
                items: Mutex::new(Vec::new()),
                refresh_callback: Mutex::new(None),
                infinite_callback: Mutex::new(None),
                search_navigate: Mutex::new(None),
            },
            loader: RecordingIndicator {
                log: log.clone(),
                on_show: ViewCall::LoaderShow,
                on_hide: ViewCall::LoaderHide,
            },
            refresher: RecordingRefresher { log: log.clone() },
            more_loader: RecordingIndicator {
                log: log.clone(),
                on_show: ViewCall::MoreLoaderShow,
                on_hide: ViewCall::MoreLoaderHide,
            },
            router: RecordingRouter { log: log.clone() },
            render: RecordingRender::default(),
            log,
        })
    }

    /// All recorded calls in order
    pub fn calls(&self) -> Vec<ViewCall> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Number of recorded calls equal to `call`
    pub fn count(&self, call: &ViewCall) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count_where(&self, predicate: impl Fn(&ViewCall) -> bool) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| predicate(c))
            .count()
    }

    /// Ids of the items the simulated list currently shows
    pub fn item_ids(&self) -> Vec<ItemId> {
        ids(&self.data.items.lock().unwrap())
    }

    pub fn items(&self) -> Vec<ViewItem> {
        self.data.items.lock().unwrap().clone()
    }

    pub fn has_refresh_callback(&self) -> bool {
        self.data.refresh_callback.lock().unwrap().is_some()
    }

    pub fn has_infinite_callback(&self) -> bool {
        self.data.infinite_callback.lock().unwrap().is_some()
    }

    /// Simulate the user pulling to refresh
    pub async fn pull_to_refresh(&self) {
        let callback = self.data.refresh_callback.lock().unwrap().clone();
        if let Some(callback) = callback {
            callback().await;
        }
    }

    /// Simulate the user scrolling to the end of the list
    pub async fn scroll_to_end(&self) {
        let callback = self.data.infinite_callback.lock().unwrap().clone();
        if let Some(callback) = callback {
            callback().await;
        }
    }

    /// Simulate the user opening search
    pub fn open_search(&self) {
        let navigate = self.data.search_navigate.lock().unwrap().clone();
        if let Some(navigate) = navigate {
            navigate();
        }
    }

    pub fn has_ready_hook(&self) -> bool {
        self.render.ready.lock().unwrap().is_some()
    }

    /// Fire the render ready hook
    pub async fn fire_ready(&self) {
        let callback = self.render.ready.lock().unwrap().clone();
        if let Some(callback) = callback {
            callback().await;
        }
    }

    /// Fire the render destroy hook
    pub async fn fire_destroy(&self) {
        let callback = self.render.destroy.lock().unwrap().clone();
        if let Some(callback) = callback {
            callback().await;
        }
    }
}

impl ViewContract for RecordingView {
    fn data(&self) -> &dyn DataView {
        &self.data
    }

    fn loader(&self) -> &dyn Indicator {
        &self.loader
    }

    fn refresher(&self) -> &dyn RefreshIndicator {
        &self.refresher
    }

    fn more_loader(&self) -> &dyn Indicator {
        &self.more_loader
    }

    fn router(&self) -> &dyn Router {
        &self.router
    }

    fn render(&self) -> &dyn RenderHooks {
        &self.render
    }
}
