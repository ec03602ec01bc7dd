//! # Search State
//!
//! Optional search context of a mediator. Search is either disabled or fully
//! configured; there is no half-populated state.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Data params key the active search filter is written to
pub const FILTER_PARAM: &str = "filter";

/// Router params key carrying the search model guid
pub const SEARCH_GUID_PARAM: &str = "searchModelGuid";

/// The user-editable search form behind a searchable view
pub trait SearchModel: Send + Sync {
    /// Whether the user confirmed the current form state
    fn is_confirmed(&self) -> bool;

    /// Hash of the current form state, used for change detection
    fn hash_code(&self) -> u64;

    fn generate_filter(&self) -> SearchCriteria;
}

/// Filter derived from a search model
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub filter: Value,
    pub hash_code: u64,
}

/// Settings a host passes to enable search
#[derive(Clone)]
pub struct SearchSettings {
    pub search_url: String,
    pub search_model_guid: String,
    pub search_model: Arc<dyn SearchModel>,
}

impl fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSettings")
            .field("search_url", &self.search_url)
            .field("search_model_guid", &self.search_model_guid)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default)]
pub enum SearchState {
    #[default]
    NoSearch,
    SearchEnabled {
        search_url: String,
        search_model_guid: String,
        search_model: Arc<dyn SearchModel>,
        /// Criteria last applied to the data params
        search_criteria: SearchCriteria,
    },
}

impl SearchState {
    /// Enable search, computing the initial criteria from the model
    pub fn enabled(settings: SearchSettings) -> Self {
        let search_criteria = settings.search_model.generate_filter();
        SearchState::SearchEnabled {
            search_url: settings.search_url,
            search_model_guid: settings.search_model_guid,
            search_model: settings.search_model,
            search_criteria,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, SearchState::SearchEnabled { .. })
    }

    pub fn criteria(&self) -> Option<&SearchCriteria> {
        match self {
            SearchState::NoSearch => None,
            SearchState::SearchEnabled {
                search_criteria, ..
            } => Some(search_criteria),
        }
    }

    /// True unless search is enabled, in which case the model must be
    /// confirmed and its hash must differ from the applied criteria
    pub fn state_changed(&self) -> bool {
        match self {
            SearchState::NoSearch => true,
            SearchState::SearchEnabled {
                search_model,
                search_criteria,
                ..
            } => {
                search_model.is_confirmed()
                    && search_model.hash_code() != search_criteria.hash_code
            }
        }
    }

    pub fn search_model(&self) -> Option<Arc<dyn SearchModel>> {
        match self {
            SearchState::NoSearch => None,
            SearchState::SearchEnabled { search_model, .. } => Some(Arc::clone(search_model)),
        }
    }

    /// Record criteria computed outside this state; false when search is disabled
    pub fn apply_criteria(&mut self, criteria: SearchCriteria) -> bool {
        match self {
            SearchState::NoSearch => false,
            SearchState::SearchEnabled {
                search_criteria, ..
            } => {
                *search_criteria = criteria;
                true
            }
        }
    }

    /// Recompute the criteria from the model; `None` when search is disabled
    pub fn refresh_criteria(&mut self) -> Option<SearchCriteria> {
        match self {
            SearchState::NoSearch => None,
            SearchState::SearchEnabled {
                search_model,
                search_criteria,
                ..
            } => {
                *search_criteria = search_model.generate_filter();
                Some(search_criteria.clone())
            }
        }
    }
}

impl fmt::Debug for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchState::NoSearch => write!(f, "NoSearch"),
            SearchState::SearchEnabled {
                search_url,
                search_model_guid,
                search_criteria,
                ..
            } => f
                .debug_struct("SearchEnabled")
                .field("search_url", search_url)
                .field("search_model_guid", search_model_guid)
                .field("search_criteria", search_criteria)
                .finish_non_exhaustive(),
        }
    }
}
