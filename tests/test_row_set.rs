//! Integration tests for read-only result snapshots.

mod common;

use common::{people_result, MockConnection};
use mysql_rowset_rs::{DbDataType, Error, RowSet};

#[tokio::test]
async fn test_query_materializes_snapshot() {
    let mut conn = MockConnection::with_result(people_result());
    let set = RowSet::query(&mut conn, "SELECT * FROM people").await.unwrap();

    assert_eq!(set.num_rows(), 2);
    assert_eq!(set.num_cols(), 7);
    assert_eq!(set.get(0, 1).unwrap(), Some("Ada Lovelace"));
    assert_eq!(set.col_name(6).unwrap(), "born");
}

#[tokio::test]
async fn test_query_on_closed_connection_fails() {
    let mut conn = MockConnection::new();
    let result = RowSet::query(&mut conn, "SELECT 1").await;
    assert!(matches!(result, Err(Error::ConnectionClosed)));
}

#[tokio::test]
async fn test_descriptors_carry_server_metadata() {
    let mut conn = MockConnection::with_result(people_result());
    let set = RowSet::query(&mut conn, "SELECT * FROM people").await.unwrap();

    let id = set.col_desc(0).unwrap();
    assert_eq!(id.table, "people");
    assert_eq!(id.data_type, DbDataType::Int);
    assert!(id.is_pri_key);
    assert!(id.is_auto_inc);
    assert!(!id.null_ok);

    let children = set.col_desc(4).unwrap();
    assert_eq!(children.data_type, DbDataType::UnsignedSmallInt);
    assert!(!children.is_pri_key);

    assert_eq!(set.col_desc(6).unwrap().data_type, DbDataType::Date);
}

#[tokio::test]
async fn test_null_cells_round_trip() {
    let mut conn = MockConnection::with_result(people_result());
    let set = RowSet::query(&mut conn, "SELECT * FROM people").await.unwrap();

    // Row 1 has a NULL age; every other cell holds its exact source string.
    assert_eq!(set.get(1, 3).unwrap(), None);
    assert_eq!(set.get(1, 0).unwrap(), Some("2"));
    assert_eq!(set.get(1, 5).unwrap(), Some("5.0"));
}

#[tokio::test]
async fn test_range_errors_on_access() {
    let mut conn = MockConnection::with_result(people_result());
    let set = RowSet::query(&mut conn, "SELECT * FROM people").await.unwrap();

    assert!(matches!(
        set.get(2, 0),
        Err(Error::RowIndexOutOfBounds { index: 2, count: 2 })
    ));
    assert!(matches!(
        set.get(0, 7),
        Err(Error::ColumnIndexOutOfBounds { index: 7, count: 7 })
    ));
    assert!(matches!(
        set.col_name(9),
        Err(Error::ColumnIndexOutOfBounds { index: 9, count: 7 })
    ));
}
