//! # View Contract
//!
//! The full capability set a mediator may invoke on an attached view,
//! grouped into the sub-objects a host application provides. Every method
//! has a no-op default, so a host implements only what it renders and an
//! unattached mediator talks to `NoopView`.

use crate::models::{SearchCriteria, ViewItem};
use crate::views::noop::NOOP_VIEW;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Callback a view invokes for user-driven actions (pull-to-refresh,
/// infinite scroll) and lifecycle hooks (ready, destroy)
pub type ViewCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Callback a view invokes when the user opens the search page
pub type SearchNavigate = Arc<dyn Fn() + Send + Sync>;

/// The view's data region
pub trait DataView: Send + Sync {
    fn init(&self) {}

    fn set_refresh_callback(&self, _callback: ViewCallback) {}

    fn set_infinite_callback(&self, _callback: ViewCallback) {}

    /// Remove every item from the data region
    fn clean(&self) {}

    fn async_push(&self, _items: Vec<ViewItem>) {}

    fn sync_push(&self, _items: Vec<ViewItem>) {}

    fn async_pop(&self, _items: Vec<ViewItem>) {}

    fn sync_pop(&self, _items: Vec<ViewItem>) {}

    fn async_prepend(&self, _items: Vec<ViewItem>) {}

    fn sync_prepend(&self, _items: Vec<ViewItem>) {}

    fn async_refresh(&self, _items: Vec<ViewItem>) {}

    fn sync_refresh(&self, _items: Vec<ViewItem>) {}

    fn has_more_data(&self, _more: bool) {}

    fn get_items(&self) -> Vec<ViewItem> {
        Vec::new()
    }

    fn setup_search(&self, _criteria: &SearchCriteria, _on_navigate: SearchNavigate) {}

    fn update_search_criteria(&self, _criteria: &SearchCriteria) {}

    fn get_ancestor(&self) -> Option<Arc<dyn ViewContract>> {
        None
    }
}

/// Show/hide indicator (loader, more-loader)
pub trait Indicator: Send + Sync {
    fn show(&self) {}

    fn hide(&self) {}
}

/// Pull-to-refresh indicator
pub trait RefreshIndicator: Send + Sync {
    fn show(&self, _is_programmatic: bool) {}

    fn hide(&self, _is_programmatic: bool) {}
}

pub trait Router: Send + Sync {
    fn go(&self, _url: &str, _params: &Map<String, Value>) {}
}

/// Render lifecycle of the host view
pub trait RenderHooks: Send + Sync {
    fn ready(&self, _callback: ViewCallback) {}

    fn destroy(&self, _callback: ViewCallback) {}

    fn async_digest(&self) {}
}

pub trait NavBar: Send + Sync {
    fn get_state(&self) -> Value {
        Value::Null
    }

    fn set_state(&self, _state: Value) {}
}

/// Modal, popover and popup helpers
pub trait Overlay: Send + Sync {
    fn open(&self, _name: &str, _params: &Value) {}

    fn close(&self) {}
}

pub trait ProgressBar: Send + Sync {
    fn start(&self) {}

    fn set(&self, _fraction: f32) {}

    fn complete(&self) {}
}

pub trait Alertify: Send + Sync {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}

    fn log(&self, _message: &str) {}
}

pub trait History: Send + Sync {
    fn back(&self) {}
}

/// A presentation layer a mediator binds to.
///
/// Mediators only use `data`, `loader`, `refresher`, `more_loader`, `router`
/// and `render`; the remaining helpers are passed through for consumers.
pub trait ViewContract: Send + Sync {
    fn data(&self) -> &dyn DataView {
        &NOOP_VIEW
    }

    fn loader(&self) -> &dyn Indicator {
        &NOOP_VIEW
    }

    fn refresher(&self) -> &dyn RefreshIndicator {
        &NOOP_VIEW
    }

    fn more_loader(&self) -> &dyn Indicator {
        &NOOP_VIEW
    }

    fn router(&self) -> &dyn Router {
        &NOOP_VIEW
    }

    fn render(&self) -> &dyn RenderHooks {
        &NOOP_VIEW
    }

    fn nav_bar(&self) -> &dyn NavBar {
        &NOOP_VIEW
    }

    fn modal(&self) -> &dyn Overlay {
        &NOOP_VIEW
    }

    fn popover(&self) -> &dyn Overlay {
        &NOOP_VIEW
    }

    fn popup(&self) -> &dyn Overlay {
        &NOOP_VIEW
    }

    fn progress_bar(&self) -> &dyn ProgressBar {
        &NOOP_VIEW
    }

    fn alertify(&self) -> &dyn Alertify {
        &NOOP_VIEW
    }

    fn history(&self) -> &dyn History {
        &NOOP_VIEW
    }
}
