//! # Page Controller
//!
//! Binds a page's view lifecycle to a mediator. The controller builds (or
//! reuses) the mediator, runs its one-time set-up, starts the service when
//! the view reports ready and stops it when the view is destroyed.

use crate::config::MediatorConfig;
use crate::errors::SettingsError;
use crate::events::ChangeEmitter;
use crate::mediators::{Mediator, MediatorVariant, SetUpOptions};
use crate::models::SearchSettings;
use crate::services::RemoteProvider;
use crate::views::{ViewCallback, ViewContract};
use anyhow::Result;
use futures::FutureExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything a page hands its controller
#[derive(Clone)]
pub struct PageSettings {
    pub config: MediatorConfig,
    pub data_provider: Arc<dyn RemoteProvider>,
    pub global_provider: Option<Arc<dyn ChangeEmitter>>,
    pub search: Option<SearchSettings>,
    pub view: Arc<dyn ViewContract>,
}

impl PageSettings {
    pub fn new(data_provider: Arc<dyn RemoteProvider>, view: Arc<dyn ViewContract>) -> Self {
        Self {
            config: MediatorConfig::default(),
            data_provider,
            global_provider: None,
            search: None,
            view,
        }
    }

    pub fn with_config(mut self, config: MediatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_global_provider(mut self, global_provider: Arc<dyn ChangeEmitter>) -> Self {
        self.global_provider = Some(global_provider);
        self
    }

    pub fn with_search(mut self, search: SearchSettings) -> Self {
        self.search = Some(search);
        self
    }
}

/// Type alias for mediator factories to reduce complexity
pub type MediatorFactory<V> = Box<dyn Fn(&PageSettings) -> Result<Mediator<V>> + Send + Sync>;

/// Page-level lifecycle controller
pub struct PageController<V: MediatorVariant> {
    settings: PageSettings,
    factory: Option<MediatorFactory<V>>,
    mediator: Option<Mediator<V>>,
    from_cache: bool,
    started: Arc<AtomicBool>,
}

impl<V: MediatorVariant> PageController<V> {
    /// Controller for a fresh page; the factory builds the mediator
    pub fn new(settings: PageSettings, factory: MediatorFactory<V>) -> Self {
        Self {
            settings,
            factory: Some(factory),
            mediator: None,
            from_cache: false,
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Controller for a page restored from cache with its mediator
    pub fn from_cache(settings: PageSettings, mediator: Mediator<V>) -> Self {
        Self {
            settings,
            factory: None,
            mediator: Some(mediator),
            from_cache: true,
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn mediator(&self) -> Option<&Mediator<V>> {
        self.mediator.as_ref()
    }

    pub fn was_from_cache(&self) -> bool {
        self.from_cache
    }

    /// Whether the ready callback has started the service
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Build the mediator on first call and run its set-up.
    ///
    /// A cached mediator is reused without running set-up again.
    pub fn init_mediator(&mut self) -> Result<Mediator<V>> {
        if let Some(mediator) = &self.mediator {
            return Ok(mediator.clone());
        }

        let factory = self
            .factory
            .as_ref()
            .ok_or(SettingsError::NoMediatorSource)?;
        let mediator = factory(&self.settings)?;
        mediator.set_up(SetUpOptions {
            search: self.settings.search.clone(),
        })?;
        tracing::debug!("Page mediator initialized");

        self.mediator = Some(mediator.clone());
        Ok(mediator)
    }

    /// Wire the view's render hooks to the mediator's service lifecycle
    pub fn start(&mut self) -> Result<()> {
        let mediator = self.init_mediator()?;
        let view = Arc::clone(&self.settings.view);

        let on_destroy: ViewCallback = {
            let mediator = mediator.downgrade();
            Arc::new(move || {
                let mediator = mediator.clone();
                async move {
                    if let Some(mediator) = mediator.upgrade() {
                        mediator.stop_service();
                    }
                }
                .boxed()
            })
        };
        view.render().destroy(on_destroy);

        let on_ready: ViewCallback = {
            let mediator = mediator.downgrade();
            let view = Arc::downgrade(&view);
            let started = Arc::clone(&self.started);
            let from_cache = self.from_cache;
            Arc::new(move || {
                let mediator = mediator.clone();
                let view = view.clone();
                let started = Arc::clone(&started);
                async move {
                    if started.swap(true, Ordering::SeqCst) {
                        tracing::debug!("Ready fired again; service already started");
                        return;
                    }
                    let (Some(mediator), Some(view)) = (mediator.upgrade(), view.upgrade()) else {
                        return;
                    };
                    if let Err(e) = mediator.start_service(view, from_cache).await {
                        tracing::warn!("Failed to start page service: {e:#}");
                    }
                }
                .boxed()
            })
        };
        view.render().ready(on_ready);
        Ok(())
    }

    /// Release the mediator's listeners and cached state
    pub fn stop(&mut self) {
        if let Some(mediator) = &self.mediator {
            mediator.tear_down();
        }
    }
}
