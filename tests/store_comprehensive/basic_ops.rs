//! Basic Store Operations Tests
//!
//! Tests for insert, get, update, delete and clear.

use crate::*;

// =============================================================================
// INSERT / GET
// =============================================================================

#[test]
fn test_empty_store_returns_none() {
    let store = empty_store();
    assert!(store.get("users", "1").is_none());
}

#[test]
fn test_insert_and_get() {
    let mut store = empty_store();
    let users = sample_users();

    store.insert("users", &users[0]).unwrap();
    assert_eq!(store.get("users", "1"), Some(users[0].clone()));
}

#[test]
fn test_populated_store_contains_every_sample() {
    let store = populated_store();
    for record in sample_users() {
        let id = record.get("id").and_then(Value::as_str).unwrap().to_string();
        assert_eq!(store.get("users", &id), Some(record));
    }
    assert_eq!(store.len(), 3);
}

#[test]
fn test_different_tables() {
    let mut store = empty_store();
    for table in table_names() {
        let record = Record::new()
            .with("id", "1")
            .with("data", format!("Test data for {}", table));
        store.insert(table, &record).unwrap();
        assert_eq!(store.get(table, "1"), Some(record), "table: {}", table);
    }
    assert_eq!(store.tables().len(), 3);
}

#[test]
fn test_same_id_in_different_tables_is_independent() {
    let mut store = empty_store();
    store.insert("users", &Record::new().with("id", "1").with("kind", "user")).unwrap();
    store.insert("orders", &Record::new().with("id", "1").with("kind", "order")).unwrap();

    assert!(store.delete("users", "1"));
    assert!(store.get("orders", "1").is_some());
}

#[test]
fn test_insert_without_id_fails() {
    let mut store = empty_store();
    let err = store
        .insert("users", &Record::new().with("name", "Test User"))
        .unwrap_err();

    assert!(matches!(err, Error::MissingIdentifier { .. }));
    assert!(err.to_string().contains("must have an 'id' field"));
    assert!(store.is_empty());
}

#[test]
fn test_nested_values_survive() {
    let mut store = empty_store();
    let record = Record::from_json(serde_json::json!({
        "id": "n1",
        "address": {"city": "Oslo", "zip": "0150"},
        "tags": ["a", "b"],
        "score": 9.5,
        "active": true,
        "manager": null
    }))
    .unwrap();

    store.insert("people", &record).unwrap();
    assert_eq!(store.get("people", "n1"), Some(record));
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_update_record() {
    let mut store = populated_store();

    let updated = store.update("users", "1", &RecordPatch::new().set("name", "John Smith"));
    assert!(updated);

    let record = store.get("users", "1").unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("John Smith")));
    assert_eq!(record.get("email"), Some(&Value::from("john@example.com")));
}

#[test]
fn test_update_adds_new_fields() {
    let mut store = populated_store();
    assert!(store.update("users", "2", &RecordPatch::new().set("age", 31)));
    assert_eq!(
        store.get("users", "2").unwrap().get("age"),
        Some(&Value::Int(31))
    );
}

#[test]
fn test_update_nonexistent_leaves_store_unchanged() {
    let mut store = populated_store();
    let before = store.snapshot();

    assert!(!store.update("users", "99", &RecordPatch::new().set("name", "Ghost")));
    assert!(!store.update("ghosts", "1", &RecordPatch::new().set("name", "Ghost")));
    assert_eq!(store.snapshot(), before);
}

// =============================================================================
// DELETE / CLEAR
// =============================================================================

#[test]
fn test_delete_record() {
    let mut store = populated_store();
    assert!(store.delete("users", "1"));
    assert!(store.get("users", "1").is_none());
    assert_eq!(store.len(), 2);
}

#[test]
fn test_delete_nonexistent_returns_false() {
    let mut store = populated_store();
    assert!(!store.delete("users", "99"));
    assert!(!store.delete("ghosts", "1"));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_clear_then_get_returns_none() {
    let mut store = populated_store();
    store.clear();
    for record in sample_users() {
        let id = record.get("id").and_then(Value::as_str).unwrap().to_string();
        assert!(store.get("users", &id).is_none());
    }
    assert!(store.is_empty());
}

#[test]
fn test_store_usable_after_clear() {
    let mut store = populated_store();
    store.clear();
    store.insert("users", &sample_users()[1]).unwrap();
    assert_eq!(store.len(), 1);
}

// =============================================================================
// WALKTHROUGH
// =============================================================================

#[test]
fn test_full_lifecycle_walkthrough() {
    init_tracing();
    let mut store = empty_store();
    let john = Record::new()
        .with("id", "1")
        .with("name", "John Doe")
        .with("email", "john@example.com");

    store.insert("users", &john).unwrap();
    assert_eq!(store.get("users", "1"), Some(john));

    assert!(store.update("users", "1", &RecordPatch::new().set("name", "John Smith")));
    let updated = store.get("users", "1").unwrap();
    assert_eq!(updated.get("name"), Some(&Value::from("John Smith")));
    assert_eq!(updated.get("email"), Some(&Value::from("john@example.com")));

    assert!(store.delete("users", "1"));
    assert!(store.get("users", "1").is_none());
}

#[test]
fn test_int_and_string_ids_do_not_collide() {
    let mut store = empty_store();
    let text = Record::new().with("id", "1").with("kind", "str");
    store.insert("t", &text).unwrap();

    let err = store
        .insert("t", &Record::new().with("id", 1).with("kind", "int"))
        .unwrap_err();
    assert!(err.is_missing_identifier());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("t", "1"), Some(text));
}
