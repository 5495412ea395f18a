//! Error types for the result-set cache.

use std::io;
use thiserror::Error;

use crate::types::ValueFormat;

/// Result type alias for row-set operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for row-set and connection operations.
///
/// Three classes share this enum. Range errors (`RowIndexOutOfBounds`,
/// `ColumnIndexOutOfBounds`) are caller bugs and should be propagated, not
/// recovered from. Connection errors (`Io`, `Query`, `ConnectionClosed`,
/// `MalformedResultSet`) surface transport or server failures. Validation
/// errors are expected, recoverable outcomes of edit calls; test with
/// [`Error::is_validation`] before presenting them to a user.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error in a connection implementation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Server rejected the statement or the transport failed mid-query.
    #[error("Query failed: {message}")]
    Query { message: String },

    /// The connection is not open.
    #[error("Connection closed")]
    ConnectionClosed,

    /// A result row did not match the reported column count.
    #[error("Malformed result set: row {row} has {found} fields (expected {expected})")]
    MalformedResultSet {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Row index out of bounds.
    #[error("Row index {index} out of bounds (rows: {count})")]
    RowIndexOutOfBounds { index: usize, count: usize },

    /// Column index out of bounds.
    #[error("Column index {index} out of bounds (columns: {count})")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    /// No table in the row set has a usable primary key.
    #[error("This row set cannot be modified")]
    NotWritable,

    /// The column is locked against edits.
    #[error("Column {column} is locked")]
    ColumnLocked { column: String },

    /// The value does not match the column's declared data type.
    #[error("Value {value:?} for column {column} is not a valid {expected}")]
    InvalidFormat {
        column: String,
        expected: ValueFormat,
        value: String,
    },

    /// The column does not allow NULL values.
    #[error("Column {column} cannot be set to NULL")]
    NullNotAllowed { column: String },

    /// The row was previously marked for deletion.
    #[error("Row {row} was previously marked for deletion")]
    RowMarkedForDeletion { row: usize },
}

impl Error {
    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// True for expected, recoverable edit failures the caller should surface
    /// to the user (as opposed to caller bugs and connection failures).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotWritable
                | Self::ColumnLocked { .. }
                | Self::InvalidFormat { .. }
                | Self::NullNotAllowed { .. }
                | Self::RowMarkedForDeletion { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::NotWritable.is_validation());
        assert!(Error::ColumnLocked {
            column: "name".to_string()
        }
        .is_validation());
        assert!(!Error::query("syntax error").is_validation());
        assert!(!Error::RowIndexOutOfBounds { index: 4, count: 3 }.is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidFormat {
            column: "age".to_string(),
            expected: ValueFormat::Integer,
            value: "12a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Value \"12a\" for column age is not a valid integer"
        );

        let err = Error::ColumnIndexOutOfBounds { index: 5, count: 3 };
        assert_eq!(err.to_string(), "Column index 5 out of bounds (columns: 3)");
    }
}
