//! Copy Isolation Tests
//!
//! Stored records never alias caller-held values, in either direction.

use crate::*;

#[test]
fn test_mutating_caller_record_after_insert() {
    let mut store = empty_store();
    let mut record = Record::new().with("id", "1").with("name", "Alice");

    store.insert("users", &record).unwrap();
    record.insert("name", "Mallory");
    record.insert("extra", true);

    let stored = store.get("users", "1").unwrap();
    assert_eq!(stored.get("name"), Some(&Value::from("Alice")));
    assert!(!stored.contains_field("extra"));
}

#[test]
fn test_mutating_returned_record() {
    let store = populated_store();

    let mut fetched = store.get("users", "1").unwrap();
    fetched.insert("name", "Changed");
    fetched.remove("email");

    let again = store.get("users", "1").unwrap();
    assert_eq!(again.get("name"), Some(&Value::from("John Doe")));
    assert!(again.contains_field("email"));
}

#[test]
fn test_mutating_nested_value_after_insert() {
    let mut store = empty_store();
    let mut record = Record::new()
        .with("id", "1")
        .with("tags", Value::Array(vec![Value::from("a")]));

    store.insert("users", &record).unwrap();
    if let Some(Value::Array(tags)) = record.get_mut("tags") {
        tags.push(Value::from("b"));
    }

    let stored = store.get("users", "1").unwrap();
    assert_eq!(
        stored.get("tags"),
        Some(&Value::Array(vec![Value::from("a")]))
    );
}

#[test]
fn test_patch_reuse_does_not_link_records() {
    let mut store = populated_store();
    let patch = RecordPatch::new().set("team", "blue");

    store.update("users", "1", &patch);
    store.update("users", "2", &patch);
    store.update("users", "1", &RecordPatch::new().set("team", "red"));

    assert_eq!(
        store.get("users", "2").unwrap().get("team"),
        Some(&Value::from("blue"))
    );
}

#[test]
fn test_cloned_store_is_independent() {
    let mut original = populated_store();
    let copy = original.clone();

    original.clear();
    assert_eq!(copy.len(), 3);
}
