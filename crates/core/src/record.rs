//! Records and partial updates
//!
//! A [`Record`] is a schema-less, field-name-ordered map of [`Value`]s.
//! A [`RecordPatch`] carries the fields of a partial update.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored record: field name to value, ordered by field name.
///
/// Records own their data. Handing a record to the store moves or clones it,
/// so later changes on the caller's side never reach stored state.
///
/// # Examples
///
/// ```
/// use recordstore_core::{Record, Value};
///
/// let user = Record::new()
///     .with("id", "1")
///     .with("name", "John Doe")
///     .with("age", 42);
///
/// assert_eq!(user.get("age"), Some(&Value::Int(42)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field, returning the previous value if any
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a mutable reference to a field value
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Remove a field, returning its value if it existed
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Check whether a field is present
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the record into its field map
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }

    /// Merge a patch into this record.
    ///
    /// Existing fields named by the patch are overwritten, new ones added.
    /// The field named `protected` is never touched. Returns the number of
    /// fields written.
    pub fn merge(&mut self, patch: &RecordPatch, protected: &str) -> usize {
        let mut applied = 0;
        for (field, value) in patch.fields() {
            if field == protected {
                continue;
            }
            self.fields.insert(field.to_string(), value.clone());
            applied += 1;
        }
        applied
    }

    /// Build a record from a JSON object.
    ///
    /// Returns `None` if `json` is not an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match Value::from(json) {
            Value::Object(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    /// Render the record as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Fields to merge into an existing record.
///
/// Fields not mentioned by the patch are left untouched.
///
/// # Examples
///
/// ```
/// use recordstore_core::{Record, RecordPatch};
///
/// let mut user = Record::new().with("id", "1").with("name", "John Doe");
/// let patch = RecordPatch::new().set("name", "John Smith");
///
/// user.merge(&patch, "id");
/// assert_eq!(user.get("name").and_then(|v| v.as_str()), Some("John Smith"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordPatch {
    fields: BTreeMap<String, Value>,
}

impl RecordPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Check whether the patch names a field
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields in the patch
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over patch fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, Value>> for RecordPatch {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        RecordPatch { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RecordPatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RecordPatch {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
