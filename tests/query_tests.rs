//! Tests for field queries
//!
//! These tests verify:
//! - Coerced comparison semantics (numeric strings compare numerically)
//! - All six operators
//! - Query error cases: invalid operator, unknown field, empty store,
//!   incomparable coerced types
//! - Queries over read-only fields

use rosterdb::{Config, Record, RecordStore, RosterError, SnapshotManager};
use tempfile::TempDir;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_record(
    first: &str,
    last: &str,
    department: &str,
    salary: &str,
    birth_date: &str,
) -> Record {
    Record {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        department: department.to_string(),
        salary: salary.to_string(),
        birth_date: birth_date.to_string(),
        email: format!(
            "{}.{}@acmecorp.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
    }
}

/// A store over a pre-written database file with three known records.
/// Returned ids are in seed order: Jane, John, Eve.
fn seeded_store() -> (TempDir, RecordStore, Vec<Uuid>) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("roster.db"))
        .company_name("Acme Corp")
        .build();

    let manager = SnapshotManager::new(&config);
    let mut snapshot = manager.load().unwrap();

    let mut ids = vec![];
    for (first, last, department, salary, birth_date) in [
        ("Jane", "Doe", "1", "10000.00", "1985-03-10"),
        ("John", "Smith", "5", "15000.00", "1992-11-30"),
        ("Eve", "Stone", "10", "20000.00", "1999-07-04"),
    ] {
        let record = sample_record(first, last, department, salary, birth_date);
        ids.push(record.id);
        snapshot.records.insert(record.id, record);
    }
    manager.save(&snapshot).unwrap();

    let store = RecordStore::open(config).unwrap();
    (temp_dir, store, ids)
}

// =============================================================================
// Operator Semantics Tests
// =============================================================================

#[test]
fn test_query_equality_on_string_field() {
    let (_temp, store, ids) = seeded_store();

    let matches = store.query_by_field("first_name", "==", "Jane").unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches.contains_key(&ids[0]));
}

#[test]
fn test_query_department_compares_numerically() {
    let (_temp, store, ids) = seeded_store();

    // "10" >= "5" holds numerically but not lexicographically
    let matches = store.query_by_field("department", ">=", "5").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[1]));
    assert!(matches.contains_key(&ids[2]));

    let matches = store.query_by_field("department", "<", "10").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[0]));
    assert!(matches.contains_key(&ids[1]));
}

#[test]
fn test_query_not_equal() {
    let (_temp, store, ids) = seeded_store();

    let matches = store.query_by_field("department", "!=", "5").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[0]));
    assert!(matches.contains_key(&ids[2]));
}

#[test]
fn test_query_salary_against_integer_value() {
    let (_temp, store, ids) = seeded_store();

    // Stored "15000.00" coerces to a float, the query value to an
    // integer; they still compare numerically
    let matches = store.query_by_field("salary", ">", "14999").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[1]));
    assert!(matches.contains_key(&ids[2]));

    let matches = store.query_by_field("salary", "<=", "10000").unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches.contains_key(&ids[0]));
}

#[test]
fn test_query_boolean_coercion() {
    let (_temp, store, ids) = seeded_store();

    // Stored values coerce per record; make every department a boolean
    store.update_field(ids[0], "department", "true").unwrap();
    store.update_field(ids[1], "department", "false").unwrap();
    store.update_field(ids[2], "department", "TRUE").unwrap();

    let matches = store.query_by_field("department", "==", "true").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[0]));
    assert!(matches.contains_key(&ids[2]));
}

#[test]
fn test_query_no_matches_is_empty_not_error() {
    let (_temp, store, _ids) = seeded_store();

    let matches = store.query_by_field("first_name", "==", "Nobody").unwrap();
    assert!(matches.is_empty());
}

// =============================================================================
// Read-Only Field Query Tests
// =============================================================================

#[test]
fn test_query_on_read_only_fields_allowed() {
    let (_temp, store, ids) = seeded_store();

    let matches = store
        .query_by_field("email", "==", "jane.doe@acmecorp.com")
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches.contains_key(&ids[0]));

    let matches = store
        .query_by_field("id", "==", &ids[1].to_string())
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches.contains_key(&ids[1]));
}

#[test]
fn test_query_birth_date_orders_chronologically() {
    let (_temp, store, ids) = seeded_store();

    // ISO dates compare as strings in date order
    let matches = store
        .query_by_field("birth_date", "<", "1995-01-01")
        .unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.contains_key(&ids[0]));
    assert!(matches.contains_key(&ids[1]));
}

// =============================================================================
// Query Error Tests
// =============================================================================

#[test]
fn test_query_invalid_operator() {
    let (_temp, store, _ids) = seeded_store();

    for operator in ["=>", "=<", "<>", "equals", ""] {
        let err = store
            .query_by_field("department", operator, "5")
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidOperator(_)));
    }
}

#[test]
fn test_query_invalid_operator_beats_unknown_field() {
    let (_temp, store, _ids) = seeded_store();

    let err = store.query_by_field("nickname", "=>", "5").unwrap_err();
    assert!(matches!(err, RosterError::InvalidOperator(_)));
}

#[test]
fn test_query_unknown_field() {
    let (_temp, store, _ids) = seeded_store();

    let err = store.query_by_field("nickname", "==", "JD").unwrap_err();
    assert!(matches!(err, RosterError::UnknownQueryField(name) if name == "nickname"));
}

#[test]
fn test_query_valid_field_on_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::open_path(&temp_dir.path().join("roster.db")).unwrap();

    // With no records, even a real field name is unknown
    let err = store.query_by_field("salary", ">", "0").unwrap_err();
    assert!(matches!(err, RosterError::UnknownQueryField(_)));
}

#[test]
fn test_query_incomparable_types() {
    let (_temp, store, _ids) = seeded_store();

    // Numeric departments against a plain string refuse to compare
    let err = store
        .query_by_field("department", "==", "marketing")
        .unwrap_err();
    assert!(matches!(err, RosterError::IncomparableTypes { .. }));

    let err = store
        .query_by_field("first_name", "<", "5")
        .unwrap_err();
    assert!(matches!(err, RosterError::IncomparableTypes { .. }));
}
