//! Change sets: field name to new value mappings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LoggableError, LoggableResult};

/// Mapping of field name to new value for a pending or realized mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(Map<String, Value>);

impl ChangeSet {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a change set from an arbitrary JSON value
    ///
    /// Only JSON objects carry named fields; anything else is rejected.
    pub fn from_value(value: Value) -> LoggableResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(LoggableError::Json(format!(
                "Expected an object of fields, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Serialize to the compact JSON text stored in the `model_logs` column
    pub fn to_json_text(&self) -> LoggableResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| LoggableError::Json(format!("Failed to encode change set: {}", e)))
    }

    /// Decode the JSON text stored in the `model_logs` column
    pub fn from_json_text(text: &str) -> LoggableResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| LoggableError::Json(format!("Failed to decode change set: {}", e)))?;
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for ChangeSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ChangeSet {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
