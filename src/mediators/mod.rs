//! # Mediators Module
//!
//! Mediators bind a remote provider to a view: the base paging mediator,
//! the reconciling variants that follow a global provider, and the variant
//! backed by a foreign store.

pub mod base;
pub mod collection;
pub mod core;
pub mod foreign_store;
pub mod listening;
pub mod reconciling;

// Re-export mediator types for easy access
pub use base::{BaseMediator, Mediator, MediatorVariant, Paging, WeakMediator};
pub use collection::ViewLevelData;
pub use self::core::{MediatorCore, SetUpOptions, ViewActions};
pub use foreign_store::{ForeignStoreBacked, ForeignStoreMediator};
pub use listening::{Debounced, Immediate, ListeningStrategy, Reconcile};
pub use reconciling::{
    AppendOrder, DebouncedReconcilingMediator, InsertPosition, Reconciling, ReconcilingMediator,
};
