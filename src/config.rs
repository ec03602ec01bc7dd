//! Configuration constants and settings for pagelink mediators
//!
//! `MediatorConfig` carries the plain, serializable part of a mediator's
//! settings. Collaborators such as providers and views are wired separately
//! through `PageSettings`.

use crate::errors::SettingsError;
use crate::models::FilterFlags;
use crate::services::DataParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiet window for the debounced reconciling mediator
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Environment variable name for overriding the default debounce window
pub const DEBOUNCE_ENV_VAR: &str = "PAGELINK_DEBOUNCE_MS";

/// Get the default debounce window, checking the environment variable first
pub fn default_debounce_ms() -> u64 {
    std::env::var(DEBOUNCE_ENV_VAR)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_DEBOUNCE_MS)
}

/// Plain mediator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediatorConfig {
    /// Clone attribute bags instead of handing out shared references
    pub deep_copy: bool,
    /// Hand the whole model to the view instead of its attributes
    pub use_model: bool,
    pub enable_refresh: bool,
    pub enable_infinite: bool,
    /// Remote change categories the reconciling mediators react to
    pub filter_flags: FilterFlags,
    /// Quiet window of the debounced reconciling mediator
    pub debounce_ms: u64,
    /// Parameters passed (as a copy) to every paging call
    pub data_params: DataParams,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            deep_copy: false,
            use_model: false,
            enable_refresh: false,
            enable_infinite: false,
            filter_flags: FilterFlags::default(),
            debounce_ms: default_debounce_ms(),
            data_params: DataParams::new(),
        }
    }
}

impl MediatorConfig {
    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| SettingsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.debounce_ms == 0 {
            return Err(SettingsError::ZeroDebounce);
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_refresh(mut self, enabled: bool) -> Self {
        self.enable_refresh = enabled;
        self
    }

    pub fn with_infinite(mut self, enabled: bool) -> Self {
        self.enable_infinite = enabled;
        self
    }

    pub fn with_deep_copy(mut self, enabled: bool) -> Self {
        self.deep_copy = enabled;
        self
    }

    pub fn with_use_model(mut self, enabled: bool) -> Self {
        self.use_model = enabled;
        self
    }

    pub fn with_filter_flags(mut self, flags: FilterFlags) -> Self {
        self.filter_flags = flags;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_data_params(mut self, params: DataParams) -> Self {
        self.data_params = params;
        self
    }
}
