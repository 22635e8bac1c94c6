//! Record payloads and identifiers
//!
//! Create and update operations send an ordered list of `{name, value}`
//! pairs. Values pass through exactly as the caller supplied them; the
//! bridge performs no type coercion. Update payloads prepend the record id
//! as the first pair, which is how the remote distinguishes a mutation from
//! a creation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque session identifier returned by the remote login operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque remote record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One field of a record payload, serialized as `{"name": ..., "value": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: Value,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Ordered collection of record fields for create/update operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues(Vec<NameValue>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the payload from an inbound field map
    ///
    /// Entries are taken in the map's iteration order; values are passed
    /// through untouched.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(
            fields
                .into_iter()
                .map(|(name, value)| NameValue { name, value })
                .collect(),
        )
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.push(NameValue::new(name, value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameValue> {
        self.0.iter()
    }

    /// Consumes the payload into the wire-level `name_value_list`
    pub fn into_name_value_list(self) -> Vec<NameValue> {
        self.0
    }

    /// Prepends the record id, signaling a mutation of an existing record
    pub fn into_update_list(self, id: &RecordId) -> Vec<NameValue> {
        let mut list = Vec::with_capacity(self.0.len() + 1);
        list.push(NameValue::new("id", id.as_str()));
        list.extend(self.0);
        list
    }
}
