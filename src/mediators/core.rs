//! # Mediator Core
//!
//! State shared by every mediator variant, and the base behaviors that
//! variants extend. Variant hooks receive the core and call the base
//! operation they build on by name (`read_page`, `set_up`, `tear_down`,
//! `attach_view`, `detach_view`, `render_from_provider`).

use crate::config::MediatorConfig;
use crate::events::{UpdateKind, UpdateSource, UpdateViewEvent, UpdateViewHook};
use crate::models::{
    generate_items_internal, Materialize, ModelRef, SearchCriteria, SearchSettings, SearchState,
    ViewItem, FILTER_PARAM, SEARCH_GUID_PARAM,
};
use crate::services::{DataParams, RemoteProvider};
use crate::views::{NoopView, SearchNavigate, ViewCallback, ViewContract};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Options for the one-time post-construction step
#[derive(Debug, Clone, Default)]
pub struct SetUpOptions {
    pub search: Option<SearchSettings>,
}

/// Callbacks a mediator hands to a view it attaches to
#[derive(Clone)]
pub struct ViewActions {
    pub refresh: ViewCallback,
    pub load_more: ViewCallback,
}

pub struct MediatorCore {
    data_provider: Arc<dyn RemoteProvider>,
    data_params: Mutex<DataParams>,
    materialize: Materialize,
    enable_refresh: bool,
    enable_infinite: bool,
    search: Mutex<SearchState>,
    is_init: AtomicBool,
    is_loading_data: AtomicBool,
    view: RwLock<Arc<dyn ViewContract>>,
    on_update_view: RwLock<Option<UpdateViewHook>>,
}

impl MediatorCore {
    pub fn new(data_provider: Arc<dyn RemoteProvider>, config: &MediatorConfig) -> Self {
        Self {
            data_provider,
            data_params: Mutex::new(config.data_params.clone()),
            materialize: Materialize::from_flags(config.use_model, config.deep_copy),
            enable_refresh: config.enable_refresh,
            enable_infinite: config.enable_infinite,
            search: Mutex::new(SearchState::NoSearch),
            is_init: AtomicBool::new(true),
            is_loading_data: AtomicBool::new(false),
            view: RwLock::new(NoopView::shared()),
            on_update_view: RwLock::new(None),
        }
    }

    pub fn data_provider(&self) -> &Arc<dyn RemoteProvider> {
        &self.data_provider
    }

    /// The currently bound view; `NoopView` while detached
    pub fn view(&self) -> Arc<dyn ViewContract> {
        Arc::clone(&self.view.read())
    }

    /// True until the first page load settles
    pub fn is_init(&self) -> bool {
        self.is_init.load(Ordering::SeqCst)
    }

    /// True while a first-page or next-page fetch is in flight
    pub fn is_loading_data(&self) -> bool {
        self.is_loading_data.load(Ordering::SeqCst)
    }

    pub(crate) fn set_loading_data(&self, loading: bool) {
        self.is_loading_data.store(loading, Ordering::SeqCst);
    }

    pub(crate) fn finish_init(&self) {
        self.is_init.store(false, Ordering::SeqCst);
    }

    /// Copy of the data params, safe to hand to a provider
    pub fn data_params(&self) -> DataParams {
        self.data_params.lock().clone()
    }

    pub fn set_data_param(&self, key: &str, value: Value) {
        self.data_params.lock().insert(key.to_string(), value);
    }

    pub fn search_state(&self) -> SearchState {
        self.search.lock().clone()
    }

    /// Whether the search model holds new confirmed criteria.
    ///
    /// The model is consulted on a snapshot, so it may read mediator state.
    pub fn search_state_changed(&self) -> bool {
        self.search_state().state_changed()
    }

    pub fn materialize(&self) -> Materialize {
        self.materialize
    }

    pub fn enable_refresh(&self) -> bool {
        self.enable_refresh
    }

    pub fn enable_infinite(&self) -> bool {
        self.enable_infinite
    }

    pub fn set_on_update_view(&self, hook: Option<UpdateViewHook>) {
        *self.on_update_view.write() = hook;
    }

    /// Materialize models per this mediator's policy
    pub fn generate_items(&self, models: &[ModelRef]) -> Vec<ViewItem> {
        generate_items_internal(models, self.materialize)
    }

    /// Report an imminent view mutation to the update-view hook, if any
    pub fn notify_update_view(&self, kind: UpdateKind, source: UpdateSource, items: &[ViewItem]) {
        let hook = self.on_update_view.read().clone();
        if let Some(hook) = hook {
            hook(&UpdateViewEvent {
                kind,
                source,
                data: items.to_vec(),
            });
        }
    }

    /// Base page read: a fetched page passes through unchanged
    pub fn read_page(&self, models: Vec<ModelRef>) -> Vec<ModelRef> {
        models
    }

    /// Push models into the view as a re-render from held state
    pub fn render_items(&self, models: &[ModelRef], is_async: bool) {
        let items = self.generate_items(models);
        self.notify_update_view(UpdateKind::Add, UpdateSource::Cache, &items);
        let view = self.view();
        if is_async {
            view.data().async_push(items);
        } else {
            view.data().sync_push(items);
        }
    }

    /// Base render: re-render whatever the provider currently holds
    pub fn render_from_provider(&self, is_async: bool) {
        let view = self.view();
        view.data().has_more_data(self.data_provider.has_next_page());
        self.render_items(&self.data_provider.models(), is_async);
    }

    /// Base set-up: capture search settings and seed the data params
    pub fn set_up(&self, options: SetUpOptions) {
        let Some(settings) = options.search else {
            return;
        };
        tracing::debug!("Mediator set up with search at '{}'", settings.search_url);
        let state = SearchState::enabled(settings);
        if let Some(criteria) = state.criteria() {
            self.set_data_param(FILTER_PARAM, criteria.filter.clone());
        }
        *self.search.lock() = state;
    }

    /// Base tear-down: drop provider listeners when the provider has events
    pub fn tear_down(&self) {
        if let Some(emitter) = self.data_provider.emitter() {
            tracing::debug!("Mediator tear down: removing provider listeners");
            emitter.off_all();
            self.data_provider.reset();
        }
    }

    /// Base attach: bind the view and register its callbacks
    pub fn attach_view(self: &Arc<Self>, view: Arc<dyn ViewContract>, actions: ViewActions) {
        *self.view.write() = Arc::clone(&view);

        if self.enable_refresh {
            view.data().set_refresh_callback(actions.refresh);
        }
        if self.enable_infinite {
            view.data().set_infinite_callback(actions.load_more);
        }

        let search = self.search_state();
        if let SearchState::SearchEnabled {
            search_url,
            search_model_guid,
            search_criteria,
            ..
        } = search
        {
            let on_navigate = self.search_navigate(search_url, search_model_guid);
            view.data().setup_search(&search_criteria, on_navigate);
        }

        view.data().init();
    }

    fn search_navigate(self: &Arc<Self>, url: String, guid: String) -> SearchNavigate {
        let core = Arc::downgrade(self);
        Arc::new(move || {
            let Some(core) = core.upgrade() else {
                return;
            };
            let mut params = Map::new();
            params.insert(SEARCH_GUID_PARAM.to_string(), Value::from(guid.clone()));
            core.view().router().go(&url, &params);
        })
    }

    /// Base detach: fall back to the no-op view
    pub fn detach_view(&self) {
        *self.view.write() = NoopView::shared();
    }

    /// Recompute search criteria and push the filter into the data params
    pub(crate) fn refresh_search_criteria(&self) -> Option<SearchCriteria> {
        let model = self.search_state().search_model()?;
        let criteria = model.generate_filter();
        if !self.search.lock().apply_criteria(criteria.clone()) {
            return None;
        }
        self.set_data_param(FILTER_PARAM, criteria.filter.clone());
        Some(criteria)
    }
}
