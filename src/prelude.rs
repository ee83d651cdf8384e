//! Convenient imports for recordstore.
//!
//! ```
//! use recordstore::prelude::*;
//!
//! let mut store = KeyValueStore::new();
//! store.insert("users", &Record::new().with("id", "1"))?;
//! # Ok::<(), recordstore::Error>(())
//! ```

// Stores
pub use crate::client::DatabaseClient;
pub use crate::connected::ConnectedStore;
pub use crate::store::KeyValueStore;

// Error handling
pub use crate::error::{Error, Result};

// Connection and seams
pub use crate::config::{ConnectionConfig, LatencyProfile};
pub use crate::connection::{Connection, SimulatedConnection};
pub use crate::latency::{NoopSleeper, RecordingSleeper, Sleeper};

// Core types
pub use recordstore_core::{Record, RecordPatch, Value};
