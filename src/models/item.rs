//! # Items and Materialization
//!
//! A `Model` is one item of a remote collection: an identity plus a shared,
//! mutable attribute bag. Before items reach a view they are materialized
//! into `ViewItem`s according to the mediator's `Materialize` policy.

use crate::errors::ModelError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Attribute bag of an item
pub type Attributes = serde_json::Map<String, Value>;

/// Attribute bag shared between a model and every view bound to it
pub type SharedAttributes = Arc<RwLock<Attributes>>;

/// Shared handle to a model; the handle's pointer is the model's object identity
pub type ModelRef = Arc<Model>;

/// Identity of an item. Two items are the same item iff their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    pub fn to_value(&self) -> Value {
        match self {
            ItemId::Int(n) => Value::from(*n),
            ItemId::Str(s) => Value::from(s.clone()),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{n}"),
            ItemId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Int(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        ItemId::Int(n.into())
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Str(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Str(s)
    }
}

impl TryFrom<&Value> for ItemId {
    type Error = ModelError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ItemId::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(ItemId::Int)
                .ok_or_else(|| ModelError::UnsupportedId(n.to_string())),
            other => Err(ModelError::UnsupportedId(other.to_string())),
        }
    }
}

/// One item of a remote collection
#[derive(Debug)]
pub struct Model {
    id: ItemId,
    attributes: SharedAttributes,
}

impl Model {
    /// Create a model. The id is also written into the attribute bag under `id`.
    pub fn new(id: impl Into<ItemId>, mut attributes: Attributes) -> ModelRef {
        let id = id.into();
        attributes.insert("id".to_string(), id.to_value());
        Arc::new(Self {
            id,
            attributes: Arc::new(RwLock::new(attributes)),
        })
    }

    /// Build a model from a JSON object carrying an `id` field
    pub fn from_value(value: Value) -> Result<ModelRef, ModelError> {
        let Value::Object(attributes) = value else {
            return Err(ModelError::NotAnObject);
        };
        let id = attributes
            .get("id")
            .ok_or(ModelError::MissingId)
            .and_then(ItemId::try_from)?;
        Ok(Self::new(id, attributes))
    }

    pub fn from_values(
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<ModelRef>, ModelError> {
        values.into_iter().map(Self::from_value).collect()
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn attributes(&self) -> &SharedAttributes {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.attributes.read().get(key).cloned()
    }

    /// Set one attribute. Every `ViewItem::Bound` of this model observes the change.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.attributes.write().insert(key.into(), value);
    }

    /// Shallow copy of the current attribute bag
    pub fn snapshot(&self) -> Attributes {
        self.attributes.read().clone()
    }

    /// Identity comparison: ids only, never attribute contents
    pub fn same_identity(&self, other: &Model) -> bool {
        self.id == other.id
    }
}

/// An item in the shape handed to a view
#[derive(Debug, Clone)]
pub enum ViewItem {
    /// The model itself
    Model(ModelRef),
    /// The model's live attribute bag
    Bound(SharedAttributes),
    /// A copy of the attribute bag taken at materialization time
    Detached(Attributes),
}

impl ViewItem {
    pub fn id(&self) -> Option<ItemId> {
        match self {
            ViewItem::Model(model) => Some(model.id().clone()),
            ViewItem::Bound(attributes) => attributes
                .read()
                .get("id")
                .and_then(|v| ItemId::try_from(v).ok()),
            ViewItem::Detached(attributes) => {
                attributes.get("id").and_then(|v| ItemId::try_from(v).ok())
            }
        }
    }

    /// Current attribute values, whatever the item shape
    pub fn attributes(&self) -> Attributes {
        match self {
            ViewItem::Model(model) => model.snapshot(),
            ViewItem::Bound(attributes) => attributes.read().clone(),
            ViewItem::Detached(attributes) => attributes.clone(),
        }
    }
}

/// How models are turned into view items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Materialize {
    UseModel,
    DeepCopy,
    #[default]
    Reference,
}

impl Materialize {
    /// `use_model` wins over `deep_copy`
    pub fn from_flags(use_model: bool, deep_copy: bool) -> Self {
        if use_model {
            Materialize::UseModel
        } else if deep_copy {
            Materialize::DeepCopy
        } else {
            Materialize::Reference
        }
    }
}

/// Materialize models into view items, preserving order
pub fn generate_items_internal(models: &[ModelRef], policy: Materialize) -> Vec<ViewItem> {
    models
        .iter()
        .map(|model| match policy {
            Materialize::UseModel => ViewItem::Model(Arc::clone(model)),
            Materialize::DeepCopy => ViewItem::Detached(model.snapshot()),
            Materialize::Reference => ViewItem::Bound(Arc::clone(model.attributes())),
        })
        .collect()
}
