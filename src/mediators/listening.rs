//! # Listening Strategies
//!
//! How a reconciling mediator consumes global-provider events. Events are
//! queued by the provider's handler and drained by a worker task, so the
//! reconciliation always runs after the emitting call has returned.

use crate::events::buffer_until_quiet;
use crate::models::ChangeSet;
use anyhow::Result;
use futures::StreamExt;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Reconciliation step a worker runs for each delivered change set
pub type Reconcile = Box<dyn Fn(ChangeSet) + Send + Sync>;

pub trait ListeningStrategy: Send + Sync + 'static {
    /// Spawn the worker draining `events` on the current tokio runtime
    fn spawn_worker(
        &self,
        events: UnboundedReceiver<ChangeSet>,
        reconcile: Reconcile,
    ) -> Result<JoinHandle<()>>;
}

/// Reconcile each change set as it arrives
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl ListeningStrategy for Immediate {
    fn spawn_worker(
        &self,
        mut events: UnboundedReceiver<ChangeSet>,
        reconcile: Reconcile,
    ) -> Result<JoinHandle<()>> {
        let handle = Handle::try_current()?;
        Ok(handle.spawn(async move {
            while let Some(change_set) = events.recv().await {
                reconcile(change_set);
            }
            tracing::debug!("Global provider listener closed");
        }))
    }
}

/// Buffer change sets until the provider has been quiet for `delay`, then
/// reconcile the whole burst as one coalesced change set
#[derive(Debug, Clone, Copy)]
pub struct Debounced {
    delay: Duration,
}

impl Debounced {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl ListeningStrategy for Debounced {
    fn spawn_worker(
        &self,
        events: UnboundedReceiver<ChangeSet>,
        reconcile: Reconcile,
    ) -> Result<JoinHandle<()>> {
        let handle = Handle::try_current()?;
        let delay = self.delay;
        Ok(handle.spawn(async move {
            let batches = buffer_until_quiet(UnboundedReceiverStream::new(events), delay);
            tokio::pin!(batches);
            while let Some(batch) = batches.next().await {
                tracing::debug!("Coalescing {} global change set(s)", batch.len());
                reconcile(ChangeSet::coalesce(batch));
            }
            tracing::debug!("Debounced global provider listener closed");
        }))
    }
}
