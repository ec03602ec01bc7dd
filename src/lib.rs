//! # pagelink - Provider-to-View Mediators
//!
//! Binds paged remote collections to list views. A mediator owns the
//! paging lifecycle (first load, pull-to-refresh, infinite scroll, search
//! reloads); specialized mediators keep the view reconciled with a global
//! change feed or render from an external store.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   pages    ┌──────────────┐   push/pop    ┌─────────┐
//! │ Remote       │───────────►│  Mediator    │──────────────►│  View   │
//! │ Provider     │            │              │               │         │
//! └──────────────┘            │ - Paging     │◄──────────────│ - Data  │
//! ┌──────────────┐  updates   │ - Reconcile  │   callbacks   │ - Hooks │
//! │ Global       │───────────►│ - Store      │               └─────────┘
//! │ Provider     │            └──────────────┘                    ▲
//! └──────────────┘                    ▲                           │ ready/destroy
//!                                     │ set_up / start_service    │
//!                            ┌────────────────┐                  │
//!                            │ PageController │──────────────────┘
//!                            └────────────────┘
//! ```

pub mod config;
pub mod controllers;
pub mod errors;
pub mod events;
pub mod logging;
pub mod mediators;
pub mod models;
pub mod services;
pub mod views;

// Re-export main types for easy access
pub use config::MediatorConfig;
pub use controllers::{MediatorFactory, PageController, PageSettings};
pub use errors::{ModelError, SettingsError};
pub use events::{ChangeEmitter, ChangeHub, UpdateKind, UpdateSource, UpdateViewEvent};
pub use mediators::{
    BaseMediator, DebouncedReconcilingMediator, ForeignStoreMediator, Mediator, MediatorVariant,
    ReconcilingMediator, SetUpOptions, ViewLevelData,
};
pub use models::{ChangeSet, FilterFlags, ItemId, Model, ModelRef, ViewItem};
pub use services::{ForeignStore, MemoryProvider, MemoryStore, RemoteProvider};
pub use views::{NoopView, ViewContract};
