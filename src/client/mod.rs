//! Database client over a simulated connection.
//!
//! [`DatabaseClient`] owns its own store and speaks the small query language
//! in [`query`]. Every externally visible step (connecting, querying,
//! reading config, backing up and restoring) pays latency through the
//! shared [`Sleeper`], which is what tests replace to observe it.

pub mod query;

use crate::config::{ClientConfig, ConnectionConfig, LatencyProfile};
use crate::connection::{Connection, SimulatedConnection};
use crate::error::{Error, Result};
use crate::latency::{Sleeper, ThreadSleeper};
use crate::store::{KeyValueStore, StoreSnapshot};
use query::{Query, QueryOutput};
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Client for the simulated database.
///
/// # Example
///
/// ```
/// use recordstore::prelude::*;
/// use std::sync::Arc;
///
/// let mut client = DatabaseClient::with_sleeper(ConnectionConfig::default(), Arc::new(NoopSleeper));
/// client.connect()?;
///
/// client.execute_query("INSERT INTO users VALUES id=1,name=Alice")?;
/// let rows = client.execute_query("SELECT * FROM users")?;
/// assert_eq!(rows.records().len(), 1);
/// # Ok::<(), recordstore::Error>(())
/// ```
pub struct DatabaseClient {
    connection: SimulatedConnection,
    store: KeyValueStore,
    sleeper: Arc<dyn Sleeper>,
    latency: LatencyProfile,
}

impl DatabaseClient {
    /// Create a disconnected client that really sleeps.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_sleeper(config, Arc::new(ThreadSleeper))
    }

    /// Create a disconnected client whose connection shares `sleeper`.
    pub fn with_sleeper(config: ConnectionConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        let latency = config.latency;
        Self {
            connection: SimulatedConnection::with_sleeper(config, Arc::clone(&sleeper)),
            store: KeyValueStore::new(),
            sleeper,
            latency,
        }
    }

    /// Host the client points at
    pub fn host(&self) -> &str {
        self.connection.host()
    }

    /// Port the client points at
    pub fn port(&self) -> u16 {
        self.connection.port()
    }

    /// Open the connection.
    pub fn connect(&mut self) -> Result<bool> {
        info!("Connecting to database at {}", self.connection.endpoint());
        self.connection.connect()
    }

    /// Close the connection.
    pub fn disconnect(&mut self) {
        if self.connection.is_connected() {
            info!("Disconnecting from database");
        }
        self.connection.disconnect();
    }

    /// True while the connection is open.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Data the client has accumulated.
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Read the server-side settings.
    ///
    /// Does not require a connection.
    pub fn config(&self) -> ClientConfig {
        self.sleeper.sleep(self.latency.config_read());
        ClientConfig::default()
    }

    /// Parse and run one query.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the connection is closed
    /// - [`Error::InvalidQuery`] if the text does not parse
    /// - [`Error::MissingIdentifier`] if an `INSERT` has no `id` pair
    pub fn execute_query(&mut self, query: &str) -> Result<QueryOutput> {
        if !self.connection.is_connected() {
            error!("Not connected to database");
            return Err(Error::NotConnected);
        }

        debug!("Executing query: {}", query);
        self.sleeper.sleep(self.latency.query());

        self.run(query).map_err(|e| {
            error!("Query execution failed: {}", e);
            e
        })
    }

    /// Run a query, retrying failures.
    ///
    /// Makes at most `max_retries` attempts, pausing for the retry backoff
    /// between them.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if `max_retries` is zero
    /// - [`Error::RetriesExhausted`] carrying the last failure
    pub fn query_with_retry(&mut self, query: &str, max_retries: u32) -> Result<QueryOutput> {
        if max_retries == 0 {
            return Err(Error::InvalidConfig("max_retries must be at least 1".into()));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.execute_query(query) {
                Ok(output) => return Ok(output),
                Err(err) => err,
            };

            if attempt >= max_retries {
                error!("Query failed after {} attempts", max_retries);
                return Err(Error::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }
            warn!("Query failed, retrying ({}/{})", attempt, max_retries);
            self.sleeper.sleep(self.latency.retry_backoff());
        }
    }

    /// Write a JSON snapshot of the client's data to `writer`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the connection is closed
    /// - [`Error::Io`] if the writer fails
    pub fn backup_to<W: Write>(&self, mut writer: W) -> Result<()> {
        if !self.connection.is_connected() {
            error!("Cannot backup: not connected to database");
            return Err(Error::NotConnected);
        }

        let snapshot = self.store.snapshot();
        info!("Backing up {} records", snapshot.record_count());
        self.sleeper.sleep(self.latency.backup());

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        Ok(())
    }

    /// Replace the client's data with a snapshot written by [`backup_to`].
    ///
    /// Returns the number of records restored.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the connection is closed
    /// - [`Error::Serialization`] if the input is not a valid snapshot
    /// - [`Error::Io`] if the reader fails
    ///
    /// [`backup_to`]: DatabaseClient::backup_to
    pub fn restore_from<R: Read>(&mut self, reader: R) -> Result<usize> {
        if !self.connection.is_connected() {
            error!("Cannot restore: not connected to database");
            return Err(Error::NotConnected);
        }

        self.sleeper.sleep(self.latency.backup());
        let snapshot: StoreSnapshot = serde_json::from_reader(reader)?;
        let restored = self.store.restore(snapshot)?;
        info!("Restored {} records", restored);
        Ok(restored)
    }

    fn run(&mut self, query: &str) -> Result<QueryOutput> {
        match Query::parse(query)? {
            Query::Select { table } => Ok(QueryOutput::Rows(self.store.records(table.as_str()))),
            Query::Insert { table, record } => {
                self.store.insert(table, &record)?;
                Ok(QueryOutput::Inserted(record))
            }
        }
    }
}

impl Default for DatabaseClient {
    fn default() -> Self {
        Self::new(ConnectionConfig::default())
    }
}

impl std::fmt::Debug for DatabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseClient")
            .field("connection", &self.connection)
            .field("records", &self.store.len())
            .finish()
    }
}
