//! # Remote Provider
//!
//! Contract of the remote, paginated collection a mediator pages through.

use crate::events::ChangeEmitter;
use crate::models::ModelRef;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Parameters handed to paging calls. Mediators always pass a copy because
/// providers may mutate the map they receive.
pub type DataParams = serde_json::Map<String, Value>;

/// A page of models returned by a provider
pub type PageResult = Result<Vec<ModelRef>>;

#[async_trait]
pub trait RemoteProvider: Send + Sync {
    /// Forget paging state so the next fetch starts from the first page
    fn reset(&self);

    fn has_next_page(&self) -> bool;

    async fn get_first_page(&self, data: DataParams) -> PageResult;

    async fn get_next_page(&self, data: DataParams) -> PageResult;

    /// Event surface, for providers that emit `update` change sets
    fn emitter(&self) -> Option<&dyn ChangeEmitter> {
        None
    }

    /// Models the provider currently holds
    fn models(&self) -> Vec<ModelRef> {
        Vec::new()
    }
}
