//! Record store behind a simulated connection.
//!
//! [`ConnectedStore`] refuses every operation while its connection is closed,
//! pays simulated latency on each call, and stamps records with
//! `created_at` / `updated_at` timestamps from its [`Clock`].

use crate::clock::{timestamp_field, Clock, SystemClock};
use crate::config::LatencyProfile;
use crate::connection::{Connection, SimulatedConnection};
use crate::error::{Error, Result};
use crate::latency::{Sleeper, ThreadSleeper};
use crate::store::KeyValueStore;
use recordstore_core::{Record, RecordPatch, TableName, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Field set on every record inserted through a [`ConnectedStore`].
pub const CREATED_AT: &str = "created_at";

/// Field set on every record updated through a [`ConnectedStore`].
pub const UPDATED_AT: &str = "updated_at";

/// A [`KeyValueStore`] gated by a [`Connection`].
///
/// Not-found is still a normal return value: `get` yields `None`, and
/// `update`/`delete` yield `false`. Errors mean the request was refused.
///
/// # Example
///
/// ```
/// use recordstore::prelude::*;
/// use std::sync::Arc;
///
/// let mut conn = SimulatedConnection::default();
/// conn.set_connected(true);
///
/// let mut db = ConnectedStore::new(conn).with_sleeper(Arc::new(NoopSleeper));
/// db.insert("users", &Record::new().with("id", "1").with("name", "Alice"))?;
///
/// let alice = db.get("users", "1")?.unwrap();
/// assert!(alice.contains_field("created_at"));
/// # Ok::<(), recordstore::Error>(())
/// ```
pub struct ConnectedStore<C = SimulatedConnection> {
    store: KeyValueStore,
    connection: C,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
    latency: LatencyProfile,
}

impl<C: Connection> ConnectedStore<C> {
    /// Wrap an empty store around `connection`.
    ///
    /// Uses real sleeping, the system clock and default latencies.
    pub fn new(connection: C) -> Self {
        Self {
            store: KeyValueStore::new(),
            connection,
            sleeper: Arc::new(ThreadSleeper),
            clock: Arc::new(SystemClock),
            latency: LatencyProfile::default(),
        }
    }

    /// Replace the underlying store.
    pub fn with_store(mut self, store: KeyValueStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the sleeper used for per-operation latency.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the clock used for record timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the latency profile.
    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    // =========================================================================
    // Connection
    // =========================================================================

    /// Open the underlying connection.
    pub fn connect(&mut self) -> Result<bool> {
        self.connection.connect()
    }

    /// Close the underlying connection.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    /// True while the underlying connection is open.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Mutable access to the underlying connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// The underlying store, bypassing the connection check.
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Insert a copy of `record`, stamped with `created_at`.
    ///
    /// Latency is only paid for accepted writes.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the connection is closed
    /// - [`Error::MissingIdentifier`] if the record has no identifier
    pub fn insert(&mut self, table: impl Into<TableName>, record: &Record) -> Result<()> {
        let table = table.into();
        self.ensure_connected("insert")?;

        let mut stamped = record.clone();
        stamped.insert(CREATED_AT, timestamp_field(self.clock.as_ref()));
        self.store.insert(table.clone(), &stamped)?;
        self.sleeper.sleep(self.latency.write());

        let id = stamped
            .get(self.store.id_field())
            .and_then(Value::as_str)
            .unwrap_or_default();
        debug!("Inserted record {} into {}", id, table);
        Ok(())
    }

    /// Look up a record.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] if the connection is closed.
    pub fn get(&self, table: &str, id: &str) -> Result<Option<Record>> {
        self.ensure_connected("get")?;
        self.sleeper.sleep(self.latency.read());
        Ok(self.store.get(table, id))
    }

    /// Merge `patch` into an existing record and set `updated_at`.
    ///
    /// Returns `Ok(false)` if the record does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] if the connection is closed.
    pub fn update(&mut self, table: &str, id: &str, patch: &RecordPatch) -> Result<bool> {
        self.ensure_connected("update")?;
        if !self.store.contains(table, id) {
            return Ok(false);
        }

        self.sleeper.sleep(self.latency.write());
        let stamped = patch
            .clone()
            .set(UPDATED_AT, timestamp_field(self.clock.as_ref()));
        let updated = self.store.update(table, id, &stamped);

        debug!("Updated record {} in {}", id, table);
        Ok(updated)
    }

    /// Remove a record.
    ///
    /// Returns `Ok(false)` if the record does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] if the connection is closed.
    pub fn delete(&mut self, table: &str, id: &str) -> Result<bool> {
        self.ensure_connected("delete")?;
        if !self.store.contains(table, id) {
            return Ok(false);
        }

        self.sleeper.sleep(self.latency.write());
        let deleted = self.store.delete(table, id);

        debug!("Deleted record {} from {}", id, table);
        Ok(deleted)
    }

    fn ensure_connected(&self, operation: &str) -> Result<()> {
        if self.connection.is_connected() {
            Ok(())
        } else {
            warn!("Rejected {} on {}: not connected", operation, self.connection.endpoint());
            Err(Error::NotConnected)
        }
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for ConnectedStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectedStore")
            .field("connection", &self.connection)
            .field("records", &self.store.len())
            .field("latency", &self.latency)
            .finish()
    }
}
