//! # Models Module
//!
//! Data types flowing between providers, mediators and views.

pub mod change_set;
pub mod item;
pub mod search;

// Re-export model types for easy access
pub use change_set::{global_provider_filter, ChangeSet, ChangeSummary, Changes, FilterFlags};
pub use item::{
    generate_items_internal, Attributes, ItemId, Materialize, Model, ModelRef, SharedAttributes,
    ViewItem,
};
pub use search::{
    SearchCriteria, SearchModel, SearchSettings, SearchState, FILTER_PARAM, SEARCH_GUID_PARAM,
};
