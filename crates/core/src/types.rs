//! Addressing types for the record store
//!
//! This module defines the two names every record lives under:
//! - [`TableName`]: the partition a record belongs to
//! - [`RecordId`]: the record's identifier inside its table

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a table.
///
/// Tables are created lazily on first insert, so any string is a valid name.
///
/// # Examples
///
/// ```
/// use recordstore_core::TableName;
///
/// let users = TableName::from("users");
/// assert_eq!(users.as_str(), "users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Create a table name
    pub fn new(name: impl Into<String>) -> Self {
        TableName(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(s: &str) -> Self {
        TableName(s.to_string())
    }
}

impl From<String> for TableName {
    fn from(s: String) -> Self {
        TableName(s)
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a record within a table.
///
/// Derived from the record's identifier field at insert time. Only string
/// values address a record, so `Int(1)` and `String("1")` never share a key.
///
/// # Examples
///
/// ```
/// use recordstore_core::{RecordId, Value};
///
/// assert_eq!(RecordId::from_value(&Value::from("42")).unwrap().as_str(), "42");
/// assert!(RecordId::from_value(&Value::Int(42)).is_none());
/// assert!(RecordId::from_value(&Value::Null).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a record identifier
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Derive an identifier from a field value.
    ///
    /// Returns `None` unless the value is a string.
    pub fn from_value(value: &crate::Value) -> Option<Self> {
        value.as_str().map(RecordId::from)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
