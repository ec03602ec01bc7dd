//! # Error Types
//!
//! Typed errors for the places where pagelink itself rejects input.
//! Paging failures raised by a provider are not wrapped; they travel
//! through `anyhow::Result` to whoever awaited the mediator operation.

use thiserror::Error;

/// Errors raised while building models from raw JSON
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("item is not a JSON object")]
    NotAnObject,

    #[error("item has no `id` field")]
    MissingId,

    #[error("item id must be a string or an integer, got {0}")]
    UnsupportedId(String),
}

/// Errors raised while validating mediator and controller settings
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("debounce delay must be greater than zero")]
    ZeroDebounce,

    #[error("invalid mediator configuration: {0}")]
    InvalidConfig(String),

    #[error("page controller has neither a cached mediator nor a factory")]
    NoMediatorSource,
}
