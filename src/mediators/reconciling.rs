//! # Reconciling Mediator
//!
//! Keeps a view consistent with a second, global provider that emits
//! `update` change sets. Pages read from the data provider are mirrored in
//! a [`ViewLevelData`] collection; global changes are filtered, deduplicated
//! and applied to the mirror, and the mirror's own change events patch the
//! view with prepend, pop and refresh calls.

use crate::config::MediatorConfig;
use crate::events::{ChangeEmitter, ListenerId, UpdateKind, UpdateSource};
use crate::mediators::base::{Mediator, MediatorVariant};
use crate::mediators::collection::ViewLevelData;
use crate::mediators::core::{MediatorCore, SetUpOptions, ViewActions};
use crate::mediators::listening::{Debounced, Immediate, ListeningStrategy};
use crate::models::{global_provider_filter, ChangeSet, Changes, FilterFlags, ModelRef};
use crate::services::RemoteProvider;
use crate::views::ViewContract;
use anyhow::Result;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type ReconcilingMediator = Mediator<Reconciling<Immediate>>;
pub type DebouncedReconcilingMediator = Mediator<Reconciling<Debounced>>;

/// Chooses where an incoming model lands in the mirror.
///
/// `Some(index)` inserts at that position, clamped to the mirror length;
/// `None` appends.
pub trait InsertPosition: Send + Sync {
    fn find_at_index(&self, model: &ModelRef, mirror: &[ModelRef]) -> Option<usize>;
}

/// Default ordering: append in arrival order
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendOrder;

impl InsertPosition for AppendOrder {
    fn find_at_index(&self, _model: &ModelRef, _mirror: &[ModelRef]) -> Option<usize> {
        None
    }
}

impl<F> InsertPosition for F
where
    F: Fn(&ModelRef, &[ModelRef]) -> Option<usize> + Send + Sync,
{
    fn find_at_index(&self, model: &ModelRef, mirror: &[ModelRef]) -> Option<usize> {
        self(model, mirror)
    }
}

/// State the global-provider worker shares with the mediator
struct Reconciler {
    mirror: ViewLevelData,
    filter_flags: FilterFlags,
    ordering: RwLock<Arc<dyn InsertPosition>>,
}

impl Reconciler {
    fn apply(&self, core: &MediatorCore, change_set: ChangeSet) {
        if core.is_loading_data() {
            tracing::debug!("Global update ignored: page load in flight");
            return;
        }
        let Some(change_set) = global_provider_filter(&self.filter_flags, change_set) else {
            return;
        };
        let Changes {
            added,
            removed,
            merged,
        } = change_set.changes;

        if !added.is_empty() {
            let ordering = Arc::clone(&self.ordering.read());
            // One snapshot per change set, kept in step with each insertion.
            let mut snapshot = self.mirror.models();
            for candidate in self.mirror.unseen(&added) {
                let at = ordering.find_at_index(&candidate, &snapshot);
                let index = at.map_or(snapshot.len(), |i| i.min(snapshot.len()));
                if self.mirror.insert(Arc::clone(&candidate), at) {
                    snapshot.insert(index, candidate);
                }
            }
        }
        if !removed.is_empty() {
            self.mirror.remove(&removed);
        }
        if !merged.is_empty() {
            self.mirror.broadcast(&ChangeSet::merged(merged));
        }
    }
}

/// Translate a mirror change set into view patches
fn patch_view(core: &MediatorCore, change_set: &ChangeSet) {
    let changes = &change_set.changes;
    let view = core.view();
    if !changes.added.is_empty() {
        let items = core.generate_items(&changes.added);
        core.notify_update_view(UpdateKind::Add, UpdateSource::Event, &items);
        view.data().async_prepend(items);
    }
    if !changes.removed.is_empty() {
        let items = core.generate_items(&changes.removed);
        core.notify_update_view(UpdateKind::Remove, UpdateSource::Event, &items);
        view.data().async_pop(items);
    }
    if !changes.merged.is_empty() {
        let items = core.generate_items(&changes.merged);
        core.notify_update_view(UpdateKind::Merge, UpdateSource::Event, &items);
        view.data().async_refresh(items);
    }
}

struct GlobalListener {
    emitter: Arc<dyn ChangeEmitter>,
    id: ListenerId,
    worker: JoinHandle<()>,
}

impl Drop for GlobalListener {
    fn drop(&mut self) {
        self.emitter.off(self.id);
        self.worker.abort();
    }
}

/// Variant reconciling the view against a global provider
pub struct Reconciling<L: ListeningStrategy = Immediate> {
    reconciler: Arc<Reconciler>,
    global_provider: Option<Arc<dyn ChangeEmitter>>,
    listening: L,
    global_listener: Mutex<Option<GlobalListener>>,
    view_listener: Mutex<Option<ListenerId>>,
}

impl Reconciling<Immediate> {
    pub fn new(global_provider: Option<Arc<dyn ChangeEmitter>>, filter_flags: FilterFlags) -> Self {
        Self::with_strategy(global_provider, filter_flags, Immediate)
    }
}

impl Reconciling<Debounced> {
    pub fn debounced(
        global_provider: Option<Arc<dyn ChangeEmitter>>,
        filter_flags: FilterFlags,
        delay: std::time::Duration,
    ) -> Self {
        Self::with_strategy(global_provider, filter_flags, Debounced::new(delay))
    }
}

impl<L: ListeningStrategy> Reconciling<L> {
    pub fn with_strategy(
        global_provider: Option<Arc<dyn ChangeEmitter>>,
        filter_flags: FilterFlags,
        listening: L,
    ) -> Self {
        Self {
            reconciler: Arc::new(Reconciler {
                mirror: ViewLevelData::new(),
                filter_flags,
                ordering: RwLock::new(Arc::new(AppendOrder)),
            }),
            global_provider,
            listening,
            global_listener: Mutex::new(None),
            view_listener: Mutex::new(None),
        }
    }

    /// Replace the insertion strategy for reconciled additions
    pub fn with_ordering(self, ordering: Arc<dyn InsertPosition>) -> Self {
        self.set_ordering(ordering);
        self
    }

    /// Swap the insertion strategy; mirrored models stay where they are
    pub fn set_ordering(&self, ordering: Arc<dyn InsertPosition>) {
        *self.reconciler.ordering.write() = ordering;
    }

    pub fn view_level_data(&self) -> &ViewLevelData {
        &self.reconciler.mirror
    }

    pub fn strategy(&self) -> &L {
        &self.listening
    }

    pub fn is_listening_global_provider(&self) -> bool {
        self.global_listener.lock().is_some()
    }

    pub fn is_listening_view_provider(&self) -> bool {
        self.view_listener.lock().is_some()
    }

    /// Apply a global change set to the mirror
    pub fn on_global_provider_update(&self, core: &MediatorCore, change_set: ChangeSet) {
        self.reconciler.apply(core, change_set)
    }

    /// Patch the view with a mirror change set
    pub fn on_view_provider_update(&self, core: &MediatorCore, change_set: &ChangeSet) {
        patch_view(core, change_set)
    }

    /// Subscribe to the global provider; no-op without one
    pub fn start_listening_global_provider(&self, core: &Arc<MediatorCore>) -> Result<()> {
        let Some(emitter) = self.global_provider.as_ref() else {
            return Ok(());
        };
        self.stop_listening_global_provider();

        let (tx, rx) = mpsc::unbounded_channel();
        let core = Arc::downgrade(core);
        let reconciler = Arc::clone(&self.reconciler);
        let worker = self.listening.spawn_worker(
            rx,
            Box::new(move |change_set| {
                if let Some(core) = core.upgrade() {
                    reconciler.apply(&core, change_set);
                }
            }),
        )?;
        let id = emitter.on_update(Arc::new(move |change_set: &ChangeSet| {
            if tx.send(change_set.clone()).is_err() {
                tracing::warn!("Global update dropped: reconcile worker has stopped");
            }
        }));

        tracing::debug!("Listening to global provider");
        *self.global_listener.lock() = Some(GlobalListener {
            emitter: Arc::clone(emitter),
            id,
            worker,
        });
        Ok(())
    }

    pub fn stop_listening_global_provider(&self) {
        // Dropping outside the lock deregisters and aborts the worker.
        let listener = self.global_listener.lock().take();
        drop(listener);
    }

    /// Subscribe the view patcher to the mirror's change events
    pub fn start_listening_view_provider(&self, core: &Arc<MediatorCore>) {
        self.stop_listening_view_provider();
        let core = Arc::downgrade(core);
        let id = self
            .reconciler
            .mirror
            .on_update(Arc::new(move |change_set: &ChangeSet| {
                if let Some(core) = core.upgrade() {
                    patch_view(&core, change_set);
                }
            }));
        *self.view_listener.lock() = Some(id);
    }

    pub fn stop_listening_view_provider(&self) {
        let id = self.view_listener.lock().take();
        if let Some(id) = id {
            self.reconciler.mirror.off(id);
        }
    }
}

impl<L: ListeningStrategy> MediatorVariant for Reconciling<L> {
    fn safely_read_data_provider(
        &self,
        core: &MediatorCore,
        models: Vec<ModelRef>,
    ) -> Vec<ModelRef> {
        let models = core.read_page(models);
        self.reconciler.mirror.add_silently(models)
    }

    fn render_data(&self, core: &Arc<MediatorCore>, is_async: bool) {
        core.render_items(&self.reconciler.mirror.models(), is_async)
    }

    fn before_load_init_data(&self, _core: &MediatorCore) {
        self.reconciler.mirror.clear();
    }

    fn set_up(&self, core: &Arc<MediatorCore>, options: SetUpOptions) -> Result<()> {
        core.set_up(options);
        self.start_listening_global_provider(core)
    }

    fn tear_down(&self, core: &Arc<MediatorCore>) {
        core.tear_down();
        self.reconciler.mirror.off_all();
        *self.view_listener.lock() = None;
        self.reconciler.mirror.clear();
        self.stop_listening_global_provider();
    }

    fn attach_view(
        &self,
        core: &Arc<MediatorCore>,
        view: Arc<dyn ViewContract>,
        actions: ViewActions,
    ) {
        core.attach_view(view, actions);
        self.start_listening_view_provider(core);
    }

    fn detach_view(&self, core: &Arc<MediatorCore>) {
        self.stop_listening_view_provider();
        core.detach_view();
    }
}

impl ReconcilingMediator {
    pub fn reconciling(
        data_provider: Arc<dyn RemoteProvider>,
        global_provider: Option<Arc<dyn ChangeEmitter>>,
        config: &MediatorConfig,
    ) -> Self {
        let variant = Reconciling::new(global_provider, config.filter_flags);
        Self::new(data_provider, config, variant)
    }
}

impl DebouncedReconcilingMediator {
    pub fn debounced(
        data_provider: Arc<dyn RemoteProvider>,
        global_provider: Option<Arc<dyn ChangeEmitter>>,
        config: &MediatorConfig,
    ) -> Self {
        let variant =
            Reconciling::debounced(global_provider, config.filter_flags, config.debounce());
        Self::new(data_provider, config, variant)
    }
}

impl<L: ListeningStrategy> Mediator<Reconciling<L>> {
    pub fn view_level_data(&self) -> &ViewLevelData {
        self.variant().view_level_data()
    }

    pub fn on_global_provider_update(&self, change_set: ChangeSet) {
        self.variant().on_global_provider_update(self.core(), change_set)
    }

    pub fn on_view_provider_update(&self, change_set: &ChangeSet) {
        self.variant().on_view_provider_update(self.core(), change_set)
    }

    pub fn start_listening_global_provider(&self) -> Result<()> {
        self.variant().start_listening_global_provider(self.core())
    }

    pub fn stop_listening_global_provider(&self) {
        self.variant().stop_listening_global_provider()
    }

    pub fn start_listening_view_provider(&self) {
        self.variant().start_listening_view_provider(self.core())
    }

    pub fn stop_listening_view_provider(&self) {
        self.variant().stop_listening_view_provider()
    }
}
