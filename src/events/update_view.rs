//! # View Update Events
//!
//! Descriptor handed to the observational `on_update_view` hook right
//! before a mediator mutates the view's data region.

use crate::models::ViewItem;
use std::sync::Arc;

/// Kind of view mutation about to happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Add,
    Remove,
    Merge,
}

/// Where the items of a view mutation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// A page fetched from the remote provider
    Remote,
    /// A re-render from state the mediator already holds
    Cache,
    /// A reconciled change event
    Event,
}

#[derive(Debug, Clone)]
pub struct UpdateViewEvent {
    pub kind: UpdateKind,
    pub source: UpdateSource,
    pub data: Vec<ViewItem>,
}

/// Type alias for the update-view hook
pub type UpdateViewHook = Arc<dyn Fn(&UpdateViewEvent) + Send + Sync>;
