//! Shared test fixtures: a scripted connection and canned result sets.
#![allow(dead_code)]

use std::collections::VecDeque;

use mysql_rowset_rs::types::constants::{
    AUTO_INCREMENT_FLAG, MYSQL_TYPE_DATE, MYSQL_TYPE_DOUBLE, MYSQL_TYPE_LONG, MYSQL_TYPE_SHORT,
    MYSQL_TYPE_VAR_STRING, NOT_NULL_FLAG, PRI_KEY_FLAG, UNSIGNED_FLAG,
};
use mysql_rowset_rs::{Connection, Error, FieldMeta, QueryResult, Result};

/// Scripted connection: replays canned query results, records executed SQL.
#[derive(Default)]
pub struct MockConnection {
    /// Canned results for `query`, consumed front to back.
    pub results: VecDeque<QueryResult>,
    /// Affected-row counts for `execute`, consumed front to back; when
    /// exhausted, every statement reports 1 affected row.
    pub affected: VecDeque<u64>,
    /// Number of `execute` calls that succeed before the connection fails.
    pub fail_after: Option<usize>,
    /// Every statement passed to `execute`, in order.
    pub executed: Vec<String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(result: QueryResult) -> Self {
        let mut conn = Self::new();
        conn.results.push_back(result);
        conn
    }
}

impl Connection for MockConnection {
    async fn execute(&mut self, sql: &str) -> Result<u64> {
        if let Some(n) = self.fail_after {
            if self.executed.len() >= n {
                return Err(Error::query("server has gone away"));
            }
        }
        self.executed.push(sql.to_string());
        Ok(self.affected.pop_front().unwrap_or(1))
    }

    async fn query(&mut self, _sql: &str) -> Result<QueryResult> {
        self.results.pop_front().ok_or(Error::ConnectionClosed)
    }
}

pub fn field(name: &str, table: &str, type_code: u8, flags: u16) -> FieldMeta {
    FieldMeta {
        name: name.to_string(),
        org_name: name.to_string(),
        table: table.to_string(),
        type_code,
        flags,
        length: 11,
        decimals: 0,
        charset: 45,
    }
}

pub fn cell(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Two rows from a single `people` table keyed by an auto-increment `id`,
/// with one column per validation family.
pub fn people_result() -> QueryResult {
    QueryResult {
        fields: vec![
            field(
                "id",
                "people",
                MYSQL_TYPE_LONG,
                NOT_NULL_FLAG | PRI_KEY_FLAG | AUTO_INCREMENT_FLAG,
            ),
            field("name", "people", MYSQL_TYPE_VAR_STRING, 0),
            field("ref_code", "people", MYSQL_TYPE_VAR_STRING, NOT_NULL_FLAG),
            field("age", "people", MYSQL_TYPE_SHORT, 0),
            field("children", "people", MYSQL_TYPE_SHORT, UNSIGNED_FLAG),
            field("rating", "people", MYSQL_TYPE_DOUBLE, 0),
            field("born", "people", MYSQL_TYPE_DATE, 0),
        ],
        rows: vec![
            vec![
                cell("1"),
                cell("Ada Lovelace"),
                cell("A-1"),
                cell("36"),
                cell("3"),
                cell("4.5"),
                cell("1815-12-10"),
            ],
            vec![
                cell("2"),
                cell("Grace Hopper"),
                cell("B-2"),
                None,
                cell("0"),
                cell("5.0"),
                cell("1906-12-09"),
            ],
        ],
    }
}

/// Three rows joining `people` (keyed by `id`) with `places` (keyed by
/// `place_id`).
pub fn people_places_result() -> QueryResult {
    QueryResult {
        fields: vec![
            field(
                "id",
                "people",
                MYSQL_TYPE_LONG,
                NOT_NULL_FLAG | PRI_KEY_FLAG | AUTO_INCREMENT_FLAG,
            ),
            field("name", "people", MYSQL_TYPE_VAR_STRING, 0),
            field("age", "people", MYSQL_TYPE_SHORT, 0),
            field(
                "place_id",
                "places",
                MYSQL_TYPE_LONG,
                NOT_NULL_FLAG | PRI_KEY_FLAG,
            ),
            field("city", "places", MYSQL_TYPE_VAR_STRING, 0),
        ],
        rows: vec![
            vec![
                cell("1"),
                cell("Ada Lovelace"),
                cell("36"),
                cell("10"),
                cell("London"),
            ],
            vec![
                cell("2"),
                cell("Charles Babbage"),
                cell("79"),
                cell("10"),
                cell("London"),
            ],
            vec![
                cell("3"),
                cell("Grace Hopper"),
                None,
                cell("20"),
                cell("New York"),
            ],
        ],
    }
}

/// A table with no primary key; nothing in it can be written back.
pub fn keyless_result() -> QueryResult {
    QueryResult {
        fields: vec![
            field("note_id", "notes", MYSQL_TYPE_LONG, NOT_NULL_FLAG),
            field("body", "notes", MYSQL_TYPE_VAR_STRING, 0),
        ],
        rows: vec![vec![cell("7"), cell("first note")]],
    }
}

/// A keyed table joined with a keyless lookup table, plus a computed column
/// with no traceable origin.
pub fn partially_writable_result() -> QueryResult {
    let mut computed = FieldMeta::new("YEAR(born)", MYSQL_TYPE_LONG);
    computed.charset = 45;
    QueryResult {
        fields: vec![
            field("id", "people", MYSQL_TYPE_LONG, NOT_NULL_FLAG | PRI_KEY_FLAG),
            field("name", "people", MYSQL_TYPE_VAR_STRING, 0),
            field("code", "codes", MYSQL_TYPE_VAR_STRING, 0),
            computed,
        ],
        rows: vec![vec![cell("1"), cell("Ada Lovelace"), cell("BIRT"), cell("1815")]],
    }
}
