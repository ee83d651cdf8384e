//! Connected Store Tests
//!
//! The store behind a simulated connection: connection gating, latency
//! observed through a recording sleeper, and timestamp stamping.

use crate::*;
use recordstore::{CREATED_AT, UPDATED_AT};
use std::time::Duration;

// =============================================================================
// CONNECTION STATE
// =============================================================================

#[test]
fn test_insert_works_while_connected() {
    let (mut db, _) = connected_store();
    db.insert("users", &Record::new().with("id", "1").with("name", "Alice"))
        .unwrap();

    let stored = db.store().get("users", "1").unwrap();
    assert_eq!(stored.get("name"), Some(&Value::from("Alice")));
}

#[test]
fn test_insert_fails_after_connection_drops() {
    let (mut db, _) = connected_store();
    db.insert("users", &Record::new().with("id", "1")).unwrap();

    db.connection_mut().set_connected(false);
    let err = db.insert("users", &Record::new().with("id", "2")).unwrap_err();

    assert!(err.is_not_connected());
    assert_eq!(db.store().len(), 1);
}

#[test]
fn test_every_operation_requires_connection() {
    let (mut db, _) = connected_store();
    db.insert("users", &Record::new().with("id", "1")).unwrap();
    db.disconnect();

    assert!(db.get("users", "1").unwrap_err().is_not_connected());
    assert!(db
        .update("users", "1", &RecordPatch::new().set("a", 1))
        .unwrap_err()
        .is_not_connected());
    assert!(db.delete("users", "1").unwrap_err().is_not_connected());

    let stored = db.store().get("users", "1").unwrap();
    assert!(!stored.contains_field("a"));
    assert!(!stored.contains_field(UPDATED_AT));
    assert_eq!(stored.len(), 2);
}

#[test]
fn test_reconnect_restores_access() {
    let (mut db, _) = connected_store();
    db.disconnect();
    assert!(!db.is_connected());

    assert!(db.connect().unwrap());
    db.insert("users", &Record::new().with("id", "1")).unwrap();
}

// =============================================================================
// LATENCY
// =============================================================================

#[test]
fn test_connect_and_disconnect_latency() {
    let (mut db, sleeper) = connected_store();
    db.disconnect();
    db.connect().unwrap();

    assert_eq!(
        sleeper.calls(),
        vec![Duration::from_millis(500), Duration::from_secs(1)]
    );
}

#[test]
fn test_no_real_sleep_with_recording_sleeper() {
    let (mut db, sleeper) = connected_store();
    let start = std::time::Instant::now();
    for i in 0..20 {
        let record = Record::new().with("id", i.to_string());
        db.insert("users", &record).unwrap();
    }

    assert_eq!(sleeper.total(), Duration::from_secs(2));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_custom_latency_profile() {
    let (db, sleeper) = connected_store();
    let latency = LatencyProfile {
        read_ms: 7,
        ..LatencyProfile::zero()
    };
    let db = db.with_latency(latency);

    db.get("users", "missing").unwrap();
    assert_eq!(sleeper.calls(), vec![Duration::from_millis(7)]);
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

#[test]
fn test_created_and_updated_timestamps_use_injected_clock() {
    init_tracing();
    let (mut db, _) = connected_store();
    db.insert("users", &Record::new().with("id", "1").with("name", "Alice"))
        .unwrap();
    db.update("users", "1", &RecordPatch::new().set("name", "Bob"))
        .unwrap();

    let stored = db.get("users", "1").unwrap().unwrap();
    let expected = Value::from("2024-01-01T00:00:00+00:00");
    assert_eq!(stored.get(CREATED_AT), Some(&expected));
    assert_eq!(stored.get(UPDATED_AT), Some(&expected));
    assert_eq!(stored.get("name"), Some(&Value::from("Bob")));
}

#[test]
fn test_missing_records_are_not_errors() {
    let (mut db, _) = connected_store();
    assert_eq!(db.get("users", "1").unwrap(), None);
    assert!(!db.update("users", "1", &RecordPatch::new()).unwrap());
    assert!(!db.delete("users", "1").unwrap());
}
