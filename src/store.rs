//! The in-memory record store.
//!
//! [`KeyValueStore`] keeps records in named tables, addressed by the value of
//! each record's identifier field. Tables spring into existence on first
//! insert; there is no schema.
//!
//! # Example
//!
//! ```
//! use recordstore::prelude::*;
//!
//! let mut store = KeyValueStore::new();
//! let john = Record::new()
//!     .with("id", "1")
//!     .with("name", "John Doe")
//!     .with("email", "john@example.com");
//!
//! store.insert("users", &john)?;
//! assert_eq!(store.get("users", "1"), Some(john));
//!
//! assert!(store.update("users", "1", &RecordPatch::new().set("name", "John Smith")));
//! assert!(store.delete("users", "1"));
//! assert!(store.get("users", "1").is_none());
//! # Ok::<(), recordstore::Error>(())
//! ```

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use recordstore_core::{Record, RecordId, RecordPatch, TableName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

type Table = BTreeMap<RecordId, Record>;

/// In-memory, table-scoped record store.
///
/// Single-threaded: callers that share a store across threads must wrap it
/// in their own lock.
#[derive(Debug, Clone, Default)]
pub struct KeyValueStore {
    config: StoreConfig,
    tables: HashMap<TableName, Table>,
}

impl KeyValueStore {
    /// Create an empty store using the `"id"` identifier field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use recordstore::KeyValueStore;
    ///
    /// let store = KeyValueStore::builder().id_field("sku").build()?;
    /// assert_eq!(store.id_field(), "sku");
    /// # Ok::<(), recordstore::Error>(())
    /// ```
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Create an empty store from an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tables: HashMap::new(),
        })
    }

    /// Name of the identifier field every record must carry.
    pub fn id_field(&self) -> &str {
        &self.config.id_field
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Insert a copy of `record` into `table`.
    ///
    /// Overwrites any record with the same identifier. Creates the table if
    /// needed.
    ///
    /// # Errors
    ///
    /// [`Error::MissingIdentifier`] if the record has no usable identifier
    /// field. The store is left untouched in that case.
    pub fn insert(&mut self, table: impl Into<TableName>, record: &Record) -> Result<()> {
        let table = table.into();
        let id = self.identifier_of(&table, record)?;

        let replaced = self
            .tables
            .entry(table)
            .or_default()
            .insert(id, record.clone())
            .is_some();
        if replaced {
            debug!("Replaced existing record on insert");
        }
        Ok(())
    }

    /// Look up a record.
    ///
    /// Returns an owned copy, or `None` if the table or record is absent.
    pub fn get(&self, table: &str, id: &str) -> Option<Record> {
        self.tables.get(table)?.get(id).cloned()
    }

    /// Merge `patch` into an existing record.
    ///
    /// Returns `false`, changing nothing, if the table or record is absent.
    /// Patch entries naming the identifier field are ignored.
    pub fn update(&mut self, table: &str, id: &str, patch: &RecordPatch) -> bool {
        let id_field = self.config.id_field.as_str();
        let Some(record) = self.tables.get_mut(table).and_then(|t| t.get_mut(id)) else {
            return false;
        };

        if patch.contains_field(id_field) {
            warn!(
                "Ignoring update to identifier field '{}' of {}/{}",
                id_field, table, id
            );
        }
        record.merge(patch, id_field);
        true
    }

    /// Remove a record.
    ///
    /// Returns `true` if it existed. The table itself stays, even when empty.
    pub fn delete(&mut self, table: &str, id: &str) -> bool {
        self.tables
            .get_mut(table)
            .and_then(|t| t.remove(id))
            .is_some()
    }

    /// Remove every table and record.
    pub fn clear(&mut self) {
        debug!("Clearing {} tables", self.tables.len());
        self.tables.clear();
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Check whether a record exists.
    pub fn contains(&self, table: &str, id: &str) -> bool {
        self.tables
            .get(table)
            .map_or(false, |t| t.contains_key(id))
    }

    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records in one table (0 if it does not exist).
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, BTreeMap::len)
    }

    /// Names of all tables, sorted.
    pub fn tables(&self) -> Vec<TableName> {
        let mut names: Vec<TableName> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Copies of every record in a table, in identifier order.
    pub fn records(&self, table: &str) -> Vec<Record> {
        self.tables
            .get(table)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default()
    }

    /// A serializable copy of the whole store.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tables: self
                .tables
                .iter()
                .map(|(name, table)| (name.clone(), table.clone()))
                .collect(),
        }
    }

    /// Replace the whole contents of the store with `snapshot`.
    ///
    /// Empty tables in the snapshot are kept. Returns the number of records
    /// restored.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingIdentifier`] if a record lacks a usable identifier
    /// - [`Error::Serialization`] if a record is filed under a key that
    ///   differs from its own identifier
    ///
    /// The store is left untouched on error.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> Result<usize> {
        let mut tables = HashMap::with_capacity(snapshot.tables.len());
        for (name, records) in snapshot.tables {
            let mut table = Table::new();
            for (key, record) in records {
                let id = self.identifier_of(&name, &record)?;
                if id != key {
                    return Err(Error::Serialization(format!(
                        "record '{}' in table '{}' is filed under key '{}'",
                        id, name, key
                    )));
                }
                table.insert(id, record);
            }
            tables.insert(name, table);
        }

        self.tables = tables;
        debug!("Restored {} records", self.len());
        Ok(self.len())
    }

    fn identifier_of(&self, table: &TableName, record: &Record) -> Result<RecordId> {
        record
            .get(&self.config.id_field)
            .and_then(RecordId::from_value)
            .ok_or_else(|| Error::MissingIdentifier {
                table: table.to_string(),
                field: self.config.id_field.clone(),
            })
    }
}

/// Point-in-time copy of a store's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Table name to identifier to record
    pub tables: BTreeMap<TableName, BTreeMap<RecordId, Record>>,
}

impl StoreSnapshot {
    /// Total number of records in the snapshot.
    pub fn record_count(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }
}

/// Builder for store configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier field name.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.config.id_field = field.into();
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<KeyValueStore> {
        KeyValueStore::with_config(self.config)
    }
}
