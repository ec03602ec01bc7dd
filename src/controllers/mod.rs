//! # Controllers Module
//!
//! Page-level controllers that drive a mediator from a view's lifecycle.

pub mod page_controller;

pub use page_controller::{MediatorFactory, PageController, PageSettings};
