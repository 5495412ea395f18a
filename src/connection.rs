//! Connection boundary for executing SQL.
//!
//! The cache requires exactly three operations from a live session:
//! execute a statement for its affected-row count, execute a statement for
//! its result set, and escape a literal. Transport, authentication, and
//! dialect concerns stay behind this trait.

use std::future::Future;

use crate::error::Result;
use crate::escape;
use crate::types::FieldMeta;

/// Raw result of a statement that produced a result set.
///
/// Cells are strings as transmitted by the server; `None` marks SQL NULL.
/// Zero columns (DML) and zero rows (no match) are both valid and are
/// distinguished by column count vs. row count.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Native field metadata, one entry per column.
    pub fields: Vec<FieldMeta>,
    /// Row-major cell grid; every row must have one entry per field.
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Get the number of columns.
    pub fn num_cols(&self) -> usize {
        self.fields.len()
    }

    /// Get the number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A live, authenticated session with an SQL server.
///
/// One `Connection` serves one logical session at a time: calls must be
/// serialized by the caller, and every call blocks its task until the server
/// responds. Implementations cover transport and authentication; the row-set
/// types never hold a connection after a load completes and reacquire one
/// explicitly for write-back.
pub trait Connection {
    /// Execute a statement that produces no result set.
    ///
    /// Returns the server-reported affected-row count. Fails if the server
    /// rejects the statement or the session is not open.
    fn execute(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Execute a statement that produces a result set.
    ///
    /// Returns native field metadata and the raw cell grid.
    fn query(&mut self, sql: &str) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Escape a literal value for direct interpolation into SQL text.
    ///
    /// The default covers backslash-capable character sets; override when the
    /// session's active charset changes what must be escaped. Never used on
    /// identifiers, which are taken only from trusted server metadata.
    fn escape(&self, value: &str) -> String {
        escape::escape_default(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants::MYSQL_TYPE_LONG;

    #[test]
    fn test_query_result_shape() {
        let result = QueryResult {
            fields: vec![FieldMeta::new("id", MYSQL_TYPE_LONG)],
            rows: vec![vec![Some("1".to_string())], vec![None]],
        };
        assert_eq!(result.num_cols(), 1);
        assert_eq!(result.num_rows(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.column_names(), vec!["id"]);
    }

    #[test]
    fn test_dml_result_is_zero_column() {
        let result = QueryResult::default();
        assert_eq!(result.num_cols(), 0);
        assert_eq!(result.num_rows(), 0);
        assert!(result.is_empty());
    }
}
