//! # Base Mediator
//!
//! The paging algorithm every mediator runs: first-page load, pull-to-refresh,
//! infinite scroll, search reloads and the view attach/detach lifecycle.
//!
//! `Mediator<V>` owns the algorithm. The variant `V` supplies the hooks a
//! specialized mediator overrides; default hook bodies run the base behavior
//! on [`MediatorCore`], and overriding variants call that base behavior
//! explicitly where they extend it.

use crate::config::MediatorConfig;
use crate::events::{UpdateKind, UpdateSource, UpdateViewHook};
use crate::mediators::core::{MediatorCore, SetUpOptions, ViewActions};
use crate::models::{ModelRef, SearchState, ViewItem};
use crate::services::{DataParams, RemoteProvider};
use crate::views::{ViewCallback, ViewContract};
use anyhow::Result;
use futures::FutureExt;
use std::sync::{Arc, Weak};

/// Hooks a mediator variant may override
pub trait MediatorVariant: Send + Sync + 'static {
    /// Post-process a fetched page before it is materialized
    fn safely_read_data_provider(
        &self,
        core: &MediatorCore,
        models: Vec<ModelRef>,
    ) -> Vec<ModelRef> {
        core.read_page(models)
    }

    /// Re-render held state into the view
    fn render_data(&self, core: &Arc<MediatorCore>, is_async: bool) {
        core.render_from_provider(is_async)
    }

    /// Runs before every first-page load
    fn before_load_init_data(&self, _core: &MediatorCore) {}

    fn set_up(&self, core: &Arc<MediatorCore>, options: SetUpOptions) -> Result<()> {
        core.set_up(options);
        Ok(())
    }

    fn tear_down(&self, core: &Arc<MediatorCore>) {
        core.tear_down()
    }

    fn attach_view(
        &self,
        core: &Arc<MediatorCore>,
        view: Arc<dyn ViewContract>,
        actions: ViewActions,
    ) {
        core.attach_view(view, actions)
    }

    fn detach_view(&self, core: &Arc<MediatorCore>) {
        core.detach_view()
    }
}

/// The plain paging variant
#[derive(Debug, Clone, Copy, Default)]
pub struct Paging;

impl MediatorVariant for Paging {}

pub type BaseMediator = Mediator<Paging>;

struct Inner<V> {
    core: Arc<MediatorCore>,
    variant: V,
}

/// Binds one remote provider to whichever view is currently attached
pub struct Mediator<V: MediatorVariant> {
    inner: Arc<Inner<V>>,
}

impl<V: MediatorVariant> Clone for Mediator<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Non-owning handle used by callbacks handed to views
pub struct WeakMediator<V: MediatorVariant> {
    inner: Weak<Inner<V>>,
}

impl<V: MediatorVariant> Clone for WeakMediator<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<V: MediatorVariant> WeakMediator<V> {
    pub fn upgrade(&self) -> Option<Mediator<V>> {
        self.inner.upgrade().map(|inner| Mediator { inner })
    }
}

impl BaseMediator {
    pub fn paging(data_provider: Arc<dyn RemoteProvider>, config: &MediatorConfig) -> Self {
        Self::new(data_provider, config, Paging)
    }
}

impl<V: MediatorVariant> Mediator<V> {
    pub fn new(
        data_provider: Arc<dyn RemoteProvider>,
        config: &MediatorConfig,
        variant: V,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                core: Arc::new(MediatorCore::new(data_provider, config)),
                variant,
            }),
        }
    }

    /// Install the observational update-view hook
    pub fn with_update_view_hook(self, hook: UpdateViewHook) -> Self {
        self.inner.core.set_on_update_view(Some(hook));
        self
    }

    pub fn downgrade(&self) -> WeakMediator<V> {
        WeakMediator {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn core(&self) -> &Arc<MediatorCore> {
        &self.inner.core
    }

    pub fn variant(&self) -> &V {
        &self.inner.variant
    }

    pub fn data_provider(&self) -> &Arc<dyn RemoteProvider> {
        self.inner.core.data_provider()
    }

    pub fn view(&self) -> Arc<dyn ViewContract> {
        self.inner.core.view()
    }

    pub fn is_init(&self) -> bool {
        self.inner.core.is_init()
    }

    pub fn is_loading_data(&self) -> bool {
        self.inner.core.is_loading_data()
    }

    pub fn data_params(&self) -> DataParams {
        self.inner.core.data_params()
    }

    pub fn search_state(&self) -> SearchState {
        self.inner.core.search_state()
    }

    pub fn generate_items(&self, models: &[ModelRef]) -> Vec<ViewItem> {
        self.inner.core.generate_items(models)
    }

    pub fn safely_read_data_provider(&self, models: Vec<ModelRef>) -> Vec<ModelRef> {
        self.inner
            .variant
            .safely_read_data_provider(&self.inner.core, models)
    }

    pub fn render_data(&self, is_async: bool) {
        self.inner.variant.render_data(&self.inner.core, is_async)
    }

    /// Reset the provider and load the first page into the view.
    ///
    /// `is_init` and `is_loading_data` are cleared whether the fetch
    /// succeeds or fails; on failure the view is left untouched.
    pub async fn load_init_data(&self) -> Result<()> {
        let core = &self.inner.core;
        self.inner.variant.before_load_init_data(core);

        let provider = Arc::clone(core.data_provider());
        provider.reset();
        core.set_loading_data(true);
        tracing::debug!("load_init_data: requesting first page");
        let result = provider.get_first_page(core.data_params()).await;
        core.finish_init();
        core.set_loading_data(false);

        let models = result.inspect_err(|e| tracing::debug!("load_init_data failed: {e:#}"))?;
        let view = core.view();
        view.data().clean();
        view.data().has_more_data(provider.has_next_page());

        let models = self.safely_read_data_provider(models);
        let items = core.generate_items(&models);
        tracing::debug!("load_init_data: rendering {} item(s)", items.len());
        core.notify_update_view(UpdateKind::Add, UpdateSource::Remote, &items);
        view.data().async_push(items);
        Ok(())
    }

    /// Pull-to-refresh: reload the first page behind the refresh indicator
    pub async fn refresh(&self, is_programmatic: bool) -> Result<()> {
        let view = self.inner.core.view();
        view.data().has_more_data(true);
        view.refresher().show(is_programmatic);
        let result = self.load_init_data().await;
        view.refresher().hide(is_programmatic);
        result
    }

    /// Infinite scroll: append the next page.
    ///
    /// Ignored before the first load settles and while any fetch is in
    /// flight. When the provider is exhausted the view is told there is
    /// no more data.
    pub async fn load_more(&self) -> Result<()> {
        let core = &self.inner.core;
        if core.is_init() {
            tracing::debug!("load_more ignored: first page not loaded yet");
            return Ok(());
        }
        if core.is_loading_data() {
            tracing::debug!("load_more ignored: fetch already in flight");
            return Ok(());
        }

        let provider = Arc::clone(core.data_provider());
        let view = core.view();
        if !provider.has_next_page() {
            view.data().has_more_data(false);
            view.more_loader().hide();
            return Ok(());
        }

        view.more_loader().show();
        core.set_loading_data(true);
        let result = provider.get_next_page(core.data_params()).await;
        core.set_loading_data(false);

        let outcome = result.map(|models| {
            let view = core.view();
            view.data().has_more_data(provider.has_next_page());
            let models = self.safely_read_data_provider(models);
            let items = core.generate_items(&models);
            tracing::debug!("load_more: appending {} item(s)", items.len());
            core.notify_update_view(UpdateKind::Add, UpdateSource::Remote, &items);
            view.data().async_push(items);
        });
        view.more_loader().hide();
        outcome
    }

    /// Whether the search model holds new confirmed criteria
    pub fn state_changed(&self) -> bool {
        self.inner.core.search_state_changed()
    }

    /// Apply the current search criteria and reload the first page
    pub async fn update_state_and_reload(&self) -> Result<()> {
        let core = &self.inner.core;
        if let Some(criteria) = core.refresh_search_criteria() {
            core.view().data().update_search_criteria(&criteria);
        }
        let view = core.view();
        view.loader().show();
        let result = self.load_init_data().await;
        view.loader().hide();
        result
    }

    /// One-time post-construction step
    pub fn set_up(&self, options: SetUpOptions) -> Result<()> {
        self.inner.variant.set_up(&self.inner.core, options)
    }

    pub fn tear_down(&self) {
        self.inner.variant.tear_down(&self.inner.core)
    }

    pub fn attach_view(&self, view: Arc<dyn ViewContract>) {
        let actions = self.view_actions();
        self.inner
            .variant
            .attach_view(&self.inner.core, view, actions)
    }

    pub fn detach_view(&self) {
        self.inner.variant.detach_view(&self.inner.core)
    }

    /// Attach to a view and populate it, from held state when the page
    /// was restored from cache or from the provider otherwise
    pub async fn start_service(&self, view: Arc<dyn ViewContract>, from_cache: bool) -> Result<()> {
        tracing::info!("Starting mediator service (from_cache: {from_cache})");
        self.attach_view(view);
        if from_cache {
            self.render_data(false);
            Ok(())
        } else {
            self.start_service_impl().await
        }
    }

    /// First load behind the page loader
    pub async fn start_service_impl(&self) -> Result<()> {
        let view = self.inner.core.view();
        view.loader().show();
        let result = self.load_init_data().await;
        view.loader().hide();
        result
    }

    pub fn stop_service(&self) {
        tracing::info!("Stopping mediator service");
        self.detach_view();
    }

    fn view_actions(&self) -> ViewActions {
        let weak = self.downgrade();
        let refresh: ViewCallback = Arc::new(move || {
            let weak = weak.clone();
            async move {
                let Some(mediator) = weak.upgrade() else {
                    return;
                };
                if let Err(e) = mediator.refresh(false).await {
                    tracing::warn!("Refresh failed: {e:#}");
                }
            }
            .boxed()
        });

        let weak = self.downgrade();
        let load_more: ViewCallback = Arc::new(move || {
            let weak = weak.clone();
            async move {
                let Some(mediator) = weak.upgrade() else {
                    return;
                };
                if let Err(e) = mediator.load_more().await {
                    tracing::warn!("Load more failed: {e:#}");
                }
            }
            .boxed()
        });

        ViewActions { refresh, load_more }
    }
}
