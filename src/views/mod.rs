//! # Views Module
//!
//! The view contract mediators render into, and the no-op stand-in used
//! while no view is attached.

pub mod contract;
pub mod noop;

pub use contract::{
    Alertify, DataView, History, Indicator, NavBar, Overlay, ProgressBar, RefreshIndicator,
    RenderHooks, Router, SearchNavigate, ViewCallback, ViewContract,
};
pub use noop::{NoopView, NOOP_VIEW};
