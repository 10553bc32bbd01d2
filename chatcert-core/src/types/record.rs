//! The structured response record produced by non-raw provider calls

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One complete structured answer from a provider
///
/// A record is always a mapping — never a bare string, never null. The keys
/// are provider-defined; `"message"` is the conventional key for the
/// human-readable text, but `get_message` on the provider is the only
/// contractual way to extract it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseRecord(Map<String, Value>);

impl ResponseRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under a key, returning self for chaining
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a value under a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Number of keys in the record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ResponseRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ResponseRecord> for Map<String, Value> {
    fn from(record: ResponseRecord) -> Self {
        record.0
    }
}

impl fmt::Display for ResponseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}
