//! No-op view a mediator is bound to while no real view is attached

use crate::views::contract::{
    Alertify, DataView, History, Indicator, NavBar, Overlay, ProgressBar, RefreshIndicator,
    RenderHooks, Router, ViewContract,
};
use std::sync::Arc;

/// View whose every operation does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

pub static NOOP_VIEW: NoopView = NoopView;

impl NoopView {
    pub fn shared() -> Arc<dyn ViewContract> {
        Arc::new(NoopView)
    }
}

impl DataView for NoopView {}
impl Indicator for NoopView {}
impl RefreshIndicator for NoopView {}
impl Router for NoopView {}
impl RenderHooks for NoopView {}
impl NavBar for NoopView {}
impl Overlay for NoopView {}
impl ProgressBar for NoopView {}
impl Alertify for NoopView {}
impl History for NoopView {}
impl ViewContract for NoopView {}
