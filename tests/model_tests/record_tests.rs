//! Record Tests
//!
//! Tests verify:
//! - Positional get/update/insert/delete
//! - Bounds checking on every positional operation
//! - Equality

use flatdb::{FlatError, Record};

fn record(fields: &[&str]) -> Record {
    fields.iter().copied().collect()
}

// =============================================================================
// Access Tests
// =============================================================================

#[test]
fn test_get_fields() {
    let r = record(&["Dog", "Corgi"]);

    assert_eq!(r.len(), 2);
    assert_eq!(r.get(0).unwrap(), "Dog");
    assert_eq!(r.get(1).unwrap(), "Corgi");
    assert_eq!(r.fields(), &["Dog".to_string(), "Corgi".to_string()]);
}

#[test]
fn test_get_out_of_range() {
    let r = record(&["Dog"]);

    let result = r.get(1);
    assert!(matches!(
        result,
        Err(FlatError::IndexOutOfRange { index: 1, len: 1 })
    ));
}

#[test]
fn test_empty_record() {
    let r = Record::default();

    assert!(r.is_empty());
    assert!(r.get(0).is_err());
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_update_field() {
    let mut r = record(&["Dog", "Corgi"]);

    r.update(1, "Beagle").unwrap();

    assert_eq!(r.get(1).unwrap(), "Beagle");
    assert_eq!(r.len(), 2);
}

#[test]
fn test_update_out_of_range() {
    let mut r = record(&["Dog"]);

    assert!(matches!(
        r.update(1, "x"),
        Err(FlatError::IndexOutOfRange { .. })
    ));
    assert_eq!(r, record(&["Dog"]));
}

#[test]
fn test_insert_at_front_middle_and_end() {
    let mut r = record(&["b", "d"]);

    r.insert(0, "a").unwrap();
    r.insert(2, "c").unwrap();
    r.insert(4, "e").unwrap(); // append at len

    assert_eq!(r, record(&["a", "b", "c", "d", "e"]));
}

#[test]
fn test_insert_past_end_fails() {
    let mut r = record(&["a"]);

    assert!(matches!(
        r.insert(2, "x"),
        Err(FlatError::IndexOutOfRange { index: 2, len: 1 })
    ));
}

#[test]
fn test_delete_field() {
    let mut r = record(&["a", "b", "c"]);

    let removed = r.delete(1).unwrap();

    assert_eq!(removed, "b");
    assert_eq!(r, record(&["a", "c"]));
}

#[test]
fn test_delete_out_of_range() {
    let mut r = record(&["a"]);

    assert!(r.delete(1).is_err());
    assert_eq!(r.len(), 1);
}

// =============================================================================
// Equality Tests
// =============================================================================

#[test]
fn test_equality() {
    assert_eq!(record(&["a", "b"]), record(&["a", "b"]));
    assert_ne!(record(&["a", "b"]), record(&["b", "a"]));
    assert_ne!(record(&["a"]), record(&["a", ""]));
    assert_eq!(
        Record::new(vec!["x".to_string()]),
        Record::from(vec!["x".to_string()])
    );
}
