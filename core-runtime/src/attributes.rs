//! # Global Attribute Store
//!
//! Process-wide attributes set through `set_attributes` and merged into every
//! subsequent log and trace span.
//!
//! The store is an explicit service shared through `Arc` rather than ambient
//! global state. Writes are last-write-wins per key and nothing is ever
//! evicted.

use bridge_traits::value::{AttributeMap, AttributeValue};
use std::sync::{PoisonError, RwLock};

/// Internally synchronized attribute map.
#[derive(Debug, Default)]
pub struct GlobalAttributeStore {
    attributes: RwLock<AttributeMap>,
}

impl GlobalAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `attributes` into the store, overwriting existing keys.
    pub fn extend(&self, attributes: &AttributeMap) {
        let mut guard = self
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (key, value) in attributes {
            guard.insert(key.clone(), value.clone());
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<AttributeValue> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Copy of the current attributes.
    pub fn snapshot(&self) -> AttributeMap {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Global attributes overlaid with `context`.
    ///
    /// Per-call context is applied last, so it wins on key collision.
    pub fn merged_with(&self, context: &AttributeMap) -> AttributeMap {
        let mut merged = self.snapshot();
        for (key, value) in context {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
