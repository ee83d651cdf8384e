//! # recordstore
//!
//! In-memory, table-scoped record store.
//!
//! Records are schema-less field maps that carry an identifier field
//! (`"id"` by default). The store addresses them by `(table, id)` and offers
//! insert, point lookup, partial update, delete and clear. Absence is a
//! normal result (`None` / `false`), never an error.
//!
//! ## Quick Start
//!
//! ```
//! use recordstore::prelude::*;
//!
//! let mut store = KeyValueStore::new();
//! store.insert("users", &Record::new().with("id", "1").with("name", "John Doe"))?;
//!
//! store.update("users", "1", &RecordPatch::new().set("name", "John Smith"));
//! let john = store.get("users", "1").unwrap();
//! assert_eq!(john.get("name"), Some(&Value::from("John Smith")));
//! # Ok::<(), recordstore::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`KeyValueStore`] - the store itself
//! - [`ConnectedStore`] - the store behind a [`Connection`], with simulated
//!   latency and `created_at` / `updated_at` stamping
//! - [`DatabaseClient`] - a query-speaking client with retry and backup
//!
//! Latency and time are injected through [`Sleeper`] and [`Clock`], so tests
//! can observe them without waiting.

#![warn(missing_docs)]

mod client;
mod clock;
mod config;
mod connected;
mod connection;
mod error;
mod latency;
mod store;

pub mod prelude;

// Re-export main entry points
pub use client::query::{Query, QueryOutput};
pub use client::DatabaseClient;
pub use connected::{ConnectedStore, CREATED_AT, UPDATED_AT};
pub use connection::{Connection, SimulatedConnection};
pub use error::{Error, Result};
pub use store::{KeyValueStore, StoreBuilder, StoreSnapshot};

// Configuration
pub use config::{ClientConfig, ConnectionConfig, LatencyProfile, StoreConfig, DEFAULT_ID_FIELD};

// Injectable seams
pub use clock::{Clock, FixedClock, SystemClock};
pub use latency::{NoopSleeper, RecordingSleeper, Sleeper, ThreadSleeper};

// Core types
pub use recordstore_core::{Record, RecordId, RecordPatch, TableName, Value};
