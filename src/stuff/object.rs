//! Delegate objects: field maps with fallback lookup through a parent chain.

use crate::stuff::types::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A field map with an optional parent that unresolved lookups fall back to.
pub struct Object {
    parent: Option<Arc<Object>>,
    fields: RwLock<HashMap<String, Value>>,
}

impl Object {
    /// Creates a parentless object with no fields.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            fields: RwLock::new(HashMap::new()),
        })
    }

    /// Creates an empty object delegating unresolved lookups to `parent`.
    pub fn with_parent(parent: Arc<Object>) -> Arc<Self> {
        Arc::new(Self {
            parent: Some(parent),
            fields: RwLock::new(HashMap::new()),
        })
    }

    /// The object this one delegates to, when it has one.
    pub fn parent(&self) -> Option<Arc<Object>> {
        self.parent.clone()
    }

    /// Writes an own field, shadowing any parent field of the same name.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        self.fields.write().unwrap().insert(field.into(), value);
    }

    /// Reads a field: own fields first, then the parent chain.
    pub fn get(&self, field: &str) -> Option<Value> {
        if let Some(found) = self.fields.read().unwrap().get(field) {
            return Some(Arc::clone(found));
        }
        match &self.parent {
            Some(parent) => parent.get(field),
            None => None,
        }
    }

    /// True only when the field lives on this object itself.
    pub fn has_own(&self, field: &str) -> bool {
        self.fields.read().unwrap().contains_key(field)
    }
}
