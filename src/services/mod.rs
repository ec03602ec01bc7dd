//! # Services Layer
//!
//! External collaborators a mediator talks to: the remote provider it
//! pages through and the foreign store some mediators render from, plus
//! in-memory implementations of both.

pub mod memory_provider;
pub mod provider;
pub mod store;

// Re-export service types
pub use memory_provider::MemoryProvider;
pub use provider::{DataParams, PageResult, RemoteProvider};
pub use store::{ForeignStore, MemoryStore, StoreListener, StoreState, StoreSubscription};
