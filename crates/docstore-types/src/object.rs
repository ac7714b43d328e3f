use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Maximum length, in characters, of a string value in the index.
///
/// Longer strings are cut down to this length when an [`IndexObject`] is
/// derived, which bounds the size of the aggregate index blob independent
/// of how large the stored documents themselves are.
pub const INDEX_VALUE_MAX_SIZE: usize = 64;

/// A persisted document: a unique UID plus arbitrary scalar fields.
///
/// `data` is schema-less. Field names are caller-defined and every field
/// holds a [`Value`]. Keys are held in a `BTreeMap` so serialization and
/// iteration order are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Globally unique identifier, immutable once assigned. Empty on a
    /// creation request; the store assigns a fresh UID if absent.
    pub uid: String,
    /// The document's fields.
    pub data: BTreeMap<String, Value>,
}

impl Object {
    /// Create an object with no UID and the given fields.
    pub fn new(data: BTreeMap<String, Value>) -> Self {
        Self {
            uid: String::new(),
            data,
        }
    }

    /// Derive the truncated index projection of this object.
    ///
    /// String values longer than [`INDEX_VALUE_MAX_SIZE`] characters are
    /// truncated to that length; numbers and bools pass through unchanged.
    pub fn to_index(&self) -> IndexObject {
        let data = self
            .data
            .iter()
            .map(|(k, v)| (k.clone(), truncate_value(v)))
            .collect();
        IndexObject {
            uid: self.uid.clone(),
            data,
        }
    }
}

/// The truncated projection of an [`Object`] held in the index cache.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexObject {
    /// Same UID as the source object.
    pub uid: String,
    /// Same keys as the source object, with string values size-bounded.
    pub data: BTreeMap<String, Value>,
}

/// Truncation counts characters, never bytes, so a multi-byte code point
/// is never split.
fn truncate_value(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > INDEX_VALUE_MAX_SIZE => {
            Value::String(s.chars().take(INDEX_VALUE_MAX_SIZE).collect())
        }
        other => other.clone(),
    }
}
