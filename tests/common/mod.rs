//! Common test utilities and infrastructure
//!
//! This module provides shared functionality for integration tests including:
//! - A recording view that tracks every call a mediator makes
//! - A scripted remote provider with queued pages and call counters

#[allow(dead_code)]
pub mod mock_provider;
#[allow(dead_code)]
pub mod mock_view;

// Re-export commonly used items
#[allow(unused_imports)]
pub use mock_provider::{models, ScriptedProvider};
#[allow(unused_imports)]
pub use mock_view::{RecordingView, ViewCall};

/// Let spawned workers drain whatever was just queued to them
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
