//! Store Comprehensive Test Suite
//!
//! Exercises the public API end to end: the plain record store, the
//! connection-gated store, and the query client.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test store_comprehensive
//!
//! # Run the property tests only
//! cargo test --test store_comprehensive properties::
//! ```

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use recordstore::prelude::*;
use recordstore::{FixedClock, StoreConfig};

// Test modules
pub mod basic_ops;
pub mod connected;
pub mod isolation;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test-writer subscriber so `tracing` output shows on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Standard user records shared across tests
pub fn sample_users() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", "1")
            .with("name", "John Doe")
            .with("email", "john@example.com"),
        Record::new()
            .with("id", "2")
            .with("name", "Jane Smith")
            .with("email", "jane@example.com"),
        Record::new()
            .with("id", "3")
            .with("name", "Bob Johnson")
            .with("email", "bob@example.com"),
    ]
}

/// Fresh empty store
pub fn empty_store() -> KeyValueStore {
    KeyValueStore::with_config(StoreConfig::default()).expect("default config is valid")
}

/// Store with [`sample_users`] in the `users` table
pub fn populated_store() -> KeyValueStore {
    let mut store = empty_store();
    for record in sample_users() {
        store.insert("users", &record).expect("sample users have ids");
    }
    store
}

/// Table names used by table-parameterized tests
pub fn table_names() -> [&'static str; 3] {
    ["users", "products", "orders"]
}

/// Connected store with a recording sleeper and a frozen clock
pub fn connected_store() -> (ConnectedStore, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::new());
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut conn = SimulatedConnection::with_sleeper(ConnectionConfig::default(), sleeper.clone());
    conn.connect().expect("simulated connect cannot fail");
    sleeper.reset();

    let store = ConnectedStore::new(conn)
        .with_sleeper(sleeper.clone())
        .with_clock(Arc::new(FixedClock::new(at)));
    (store, sleeper)
}

/// Connected query client with a recording sleeper
pub fn connected_client() -> (DatabaseClient, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::new());
    let mut client = DatabaseClient::with_sleeper(ConnectionConfig::default(), sleeper.clone());
    client.connect().expect("simulated connect cannot fail");
    sleeper.reset();
    (client, sleeper)
}
