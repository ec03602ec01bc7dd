//! # Events Module
//!
//! Change notification plumbing: listener registries, the quiet-window
//! buffering operator and the view update descriptor.

pub mod change_hub;
pub mod debounce;
pub mod update_view;

// Re-export all types for easy access
pub use change_hub::{ChangeEmitter, ChangeHandler, ChangeHub, ListenerId};
pub use debounce::buffer_until_quiet;
pub use update_view::{UpdateKind, UpdateSource, UpdateViewEvent, UpdateViewHook};
