//! # Foreign Store Mediator
//!
//! Writes every page it reads into an external reactive store and renders
//! held state from that store instead of from the provider.

use crate::config::MediatorConfig;
use crate::mediators::base::{Mediator, MediatorVariant};
use crate::mediators::core::MediatorCore;
use crate::models::ModelRef;
use crate::services::{ForeignStore, RemoteProvider, StoreState, StoreSubscription};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type ForeignStoreMediator = Mediator<ForeignStoreBacked>;

pub struct ForeignStoreBacked {
    store: Arc<dyn ForeignStore>,
}

impl ForeignStoreBacked {
    pub fn new(store: Arc<dyn ForeignStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ForeignStore> {
        &self.store
    }
}

impl MediatorVariant for ForeignStoreBacked {
    fn safely_read_data_provider(
        &self,
        core: &MediatorCore,
        models: Vec<ModelRef>,
    ) -> Vec<ModelRef> {
        let models = core.read_page(models);
        self.store.put(&models);
        models
    }

    /// Render the first state the store delivers, then unsubscribe
    fn render_data(&self, core: &Arc<MediatorCore>, is_async: bool) {
        let fired = Arc::new(AtomicBool::new(false));
        let pending: Arc<Mutex<Option<StoreSubscription>>> = Arc::new(Mutex::new(None));

        let listener = {
            let fired = Arc::clone(&fired);
            let pending = Arc::clone(&pending);
            let core = Arc::downgrade(core);
            Arc::new(move |state: &StoreState| {
                if fired.swap(true, Ordering::SeqCst) {
                    return;
                }
                if let Some(core) = core.upgrade() {
                    core.render_items(&state.items, is_async);
                }
                if let Some(subscription) = pending.lock().take() {
                    subscription.unsubscribe();
                }
            })
        };

        let subscription = self.store.subscribe(listener);
        if fired.load(Ordering::SeqCst) {
            subscription.unsubscribe();
            return;
        }
        *pending.lock() = Some(subscription);
        // The store may have delivered between subscribe and parking the handle.
        if fired.load(Ordering::SeqCst) {
            pending.lock().take();
        }
    }
}

impl ForeignStoreMediator {
    pub fn foreign_store(
        data_provider: Arc<dyn RemoteProvider>,
        store: Arc<dyn ForeignStore>,
        config: &MediatorConfig,
    ) -> Self {
        Self::new(data_provider, config, ForeignStoreBacked::new(store))
    }
}
