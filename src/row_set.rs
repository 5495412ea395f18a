//! Read-only result snapshots.

use tracing::debug;

use crate::connection::{Connection, QueryResult};
use crate::error::{Error, Result};
use crate::types::ColumnDesc;

/// A loaded, read-only query result.
///
/// Holds the classified column descriptors and a rectangular grid of cells;
/// `None` cells are SQL NULL. Row and column counts are fixed at load time.
/// A snapshot is constructed fresh by each query execution and discarded
/// wholesale, never partially updated, and holds no reference to the
/// connection that produced it.
#[derive(Debug)]
pub struct RowSet {
    columns: Vec<ColumnDesc>,
    rows: Vec<Vec<Option<String>>>,
}

impl RowSet {
    /// Materialize a snapshot from a raw query result.
    ///
    /// Classifies every field into a column descriptor and takes ownership of
    /// the cell grid. Fails with `MalformedResultSet` if any row does not
    /// match the reported column count.
    pub fn load(result: QueryResult) -> Result<Self> {
        let columns: Vec<ColumnDesc> = result.fields.iter().map(ColumnDesc::from_field).collect();
        for (i, row) in result.rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::MalformedResultSet {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        debug!(
            rows = result.rows.len(),
            cols = columns.len(),
            "loaded row set"
        );
        Ok(Self {
            columns,
            rows: result.rows,
        })
    }

    /// Execute `sql` on `conn` and materialize the snapshot.
    pub async fn query<C: Connection>(conn: &mut C, sql: &str) -> Result<Self> {
        Self::load(conn.query(sql).await?)
    }

    /// Get the number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Get all column descriptors.
    pub fn columns(&self) -> &[ColumnDesc] {
        &self.columns
    }

    /// Get one cell.
    ///
    /// `Ok(None)` means the cell is SQL NULL, which is not an error. Fails
    /// only on an out-of-range row or column index.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&str>> {
        if row >= self.rows.len() {
            return Err(Error::RowIndexOutOfBounds {
                index: row,
                count: self.rows.len(),
            });
        }
        if col >= self.columns.len() {
            return Err(Error::ColumnIndexOutOfBounds {
                index: col,
                count: self.columns.len(),
            });
        }
        Ok(self.rows[row][col].as_deref())
    }

    /// Get the descriptor for one column.
    pub fn col_desc(&self, col: usize) -> Result<&ColumnDesc> {
        self.columns
            .get(col)
            .ok_or(Error::ColumnIndexOutOfBounds {
                index: col,
                count: self.columns.len(),
            })
    }

    /// Get the name of one column.
    pub fn col_name(&self, col: usize) -> Result<&str> {
        Ok(&self.col_desc(col)?.name)
    }
}
