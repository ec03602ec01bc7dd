//! # Change Sets
//!
//! The message shape for every change propagated through pagelink: remote
//! provider updates, mirror collection updates and coalesced batches.

use crate::models::item::{ItemId, ModelRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The three change categories. Each is always present, possibly empty.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    pub added: Vec<ModelRef>,
    pub removed: Vec<ModelRef>,
    pub merged: Vec<ModelRef>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.merged.is_empty()
    }
}

/// Boolean summary raised by a merge step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub add: bool,
    pub remove: bool,
    pub merge: bool,
}

/// A change notification
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub changes: Changes,
    /// Present only on change sets produced by `coalesce`
    pub summary: Option<ChangeSummary>,
}

impl ChangeSet {
    pub fn added(models: Vec<ModelRef>) -> Self {
        Self::from_changes(Changes {
            added: models,
            ..Changes::default()
        })
    }

    pub fn removed(models: Vec<ModelRef>) -> Self {
        Self::from_changes(Changes {
            removed: models,
            ..Changes::default()
        })
    }

    pub fn merged(models: Vec<ModelRef>) -> Self {
        Self::from_changes(Changes {
            merged: models,
            ..Changes::default()
        })
    }

    pub fn from_changes(changes: Changes) -> Self {
        Self {
            changes,
            summary: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Merge a batch into one change set. Arrays are concatenated in arrival
    /// order and the summary flags are raised for each non-empty category.
    pub fn coalesce(batch: impl IntoIterator<Item = ChangeSet>) -> ChangeSet {
        let mut changes = Changes::default();
        for change_set in batch {
            let Changes {
                added,
                removed,
                merged,
            } = change_set.changes;
            changes.added.extend(added);
            changes.removed.extend(removed);
            changes.merged.extend(merged);
        }
        let summary = ChangeSummary {
            add: !changes.added.is_empty(),
            remove: !changes.removed.is_empty(),
            merge: !changes.merged.is_empty(),
        };
        ChangeSet {
            changes,
            summary: Some(summary),
        }
    }

    pub fn added_ids(&self) -> Vec<ItemId> {
        self.changes.added.iter().map(|m| m.id().clone()).collect()
    }

    pub fn removed_ids(&self) -> HashSet<ItemId> {
        self.changes.removed.iter().map(|m| m.id().clone()).collect()
    }
}

/// Remote change categories a reconciling mediator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterFlags {
    pub added: bool,
    pub removed: bool,
    /// Gates the `merged` category
    pub updated: bool,
}

impl Default for FilterFlags {
    fn default() -> Self {
        Self {
            added: true,
            removed: true,
            updated: true,
        }
    }
}

/// Pass the change set through if an enabled category is non-empty.
///
/// Categories are checked in the order added, removed, merged and the first
/// match returns the whole change set, so downstream processing still sees
/// the other categories. `None` means the event is ignored.
pub fn global_provider_filter(flags: &FilterFlags, change_set: ChangeSet) -> Option<ChangeSet> {
    let changes = &change_set.changes;
    if flags.added && !changes.added.is_empty() {
        return Some(change_set);
    }
    if flags.removed && !changes.removed.is_empty() {
        return Some(change_set);
    }
    if flags.updated && !changes.merged.is_empty() {
        return Some(change_set);
    }
    None
}
