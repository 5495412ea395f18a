//! Writable row sets: validated edit buffering and write-back.
//!
//! [`WritableRowSet`] layers edit state over a read-only [`RowSet`]: per-column
//! locks, per-table writability derived from primary-key presence, and a
//! sparse buffer of pending edits. Write-back turns the buffer into one
//! UPDATE statement per contributing table per altered row.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::connection::{Connection, QueryResult};
use crate::error::{Error, Result};
use crate::row_set::RowSet;
use crate::types::ValueFormat;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());
static UNSIGNED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]+$").unwrap());
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(([0-9]+\.?[0-9]*)|(\.?[0-9]+))([eE][+-]?[0-9]+)?$").unwrap()
});
// Month and day are range-checked by pattern only; calendar validity (such as
// day 30 in February) is deliberately not enforced.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-(0[1-9]|1[012])-(0[1-9]|[12][0-9]|3[01])$").unwrap());

fn format_accepts(format: ValueFormat, value: &str) -> bool {
    match format {
        ValueFormat::Integer => INTEGER_RE.is_match(value),
        ValueFormat::UnsignedInteger => UNSIGNED_RE.is_match(value),
        ValueFormat::Numeric => NUMERIC_RE.is_match(value),
        ValueFormat::Date => DATE_RE.is_match(value),
    }
}

/// Edit permission for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    Unlocked,
    Locked,
    Permanent,
}

/// Pending disposition of one altered row.
///
/// `Insert` and `Delete` are staged states only: write-back currently issues
/// SQL for `Update` rows and skips the others. `Insert` is reserved for
/// rows created client-side; nothing produces it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Pending UPDATE of an existing row.
    Update,
    /// Reserved: pending INSERT of a new row.
    Insert,
    /// Pending DELETE; the row accepts no further edits.
    Delete,
}

/// One source table referenced by the row set.
#[derive(Debug)]
struct TableInfo {
    name: String,
    writable: bool,
    keys: Vec<usize>,
    cols: Vec<usize>,
}

/// Pending edits for one row. Sparse: only touched rows get an entry.
#[derive(Debug)]
struct RowEdit {
    state: RowState,
    dirty: Vec<bool>,
    is_null: Vec<bool>,
    values: Vec<String>,
}

impl RowEdit {
    fn new(num_cols: usize) -> Self {
        Self {
            state: RowState::Update,
            dirty: vec![false; num_cols],
            is_null: vec![false; num_cols],
            values: vec![String::new(); num_cols],
        }
    }
}

/// An editable overlay over a read-only [`RowSet`].
///
/// Loading derives, per source table, whether write-back is possible at all:
/// a table with no discoverable primary key cannot anchor an UPDATE and every
/// column belonging to it is permanently locked, as are computed columns with
/// no traceable origin and server-assigned auto-increment keys. Edits are
/// validated against the column's declared type and buffered until
/// [`write_back`](WritableRowSet::write_back) translates them into UPDATE
/// statements, one per contributing table per altered row.
#[derive(Debug)]
pub struct WritableRowSet {
    base: RowSet,
    locks: Vec<LockState>,
    tables: Vec<TableInfo>,
    altered: BTreeMap<usize, RowEdit>,
    writable: bool,
    null_substitution: bool,
}

impl WritableRowSet {
    /// Materialize a writable row set from a raw query result.
    ///
    /// Loads the snapshot, then derives lock and table state from the column
    /// descriptors. All edit state starts empty.
    pub fn load(result: QueryResult) -> Result<Self> {
        let base = RowSet::load(result)?;
        let mut set = Self {
            locks: vec![LockState::Unlocked; base.num_cols()],
            base,
            tables: Vec::new(),
            altered: BTreeMap::new(),
            writable: false,
            null_substitution: false,
        };
        set.init_table_info();
        Ok(set)
    }

    /// Execute `sql` on `conn` and materialize a writable row set.
    pub async fn query<C: Connection>(conn: &mut C, sql: &str) -> Result<Self> {
        Self::load(conn.query(sql).await?)
    }

    // Collect table, column and primary-key information, and permanently lock
    // everything that can never be written back: columns with no traceable
    // origin, auto-increment keys, and all columns of keyless tables.
    fn init_table_info(&mut self) {
        for col in 0..self.base.num_cols() {
            let desc = &self.base.columns()[col];

            // Writing back needs both the origin column and table names.
            if desc.name_in_db.is_empty() || desc.table.is_empty() {
                self.locks[col] = LockState::Permanent;
                continue;
            }

            let table = match self.tables.iter().position(|t| t.name == desc.table) {
                Some(i) => i,
                None => {
                    self.tables.push(TableInfo {
                        name: desc.table.clone(),
                        writable: false,
                        keys: Vec::new(),
                        cols: Vec::new(),
                    });
                    self.tables.len() - 1
                }
            };
            self.tables[table].cols.push(col);

            if desc.is_pri_key {
                self.tables[table].keys.push(col);

                // The server assigns auto-increment values; never write them.
                if desc.is_auto_inc {
                    self.locks[col] = LockState::Permanent;
                }
            }
        }

        // An UPDATE without a primary-key anchor is unsafe and is refused.
        self.writable = false;
        for table in &mut self.tables {
            if table.keys.is_empty() {
                table.writable = false;
                for &col in &table.cols {
                    self.locks[col] = LockState::Permanent;
                }
            } else {
                table.writable = true;
                self.writable = true;
            }
        }
    }

    /// Get the number of rows.
    pub fn num_rows(&self) -> usize {
        self.base.num_rows()
    }

    /// Get the number of columns.
    pub fn num_cols(&self) -> usize {
        self.base.num_cols()
    }

    /// Get one cell of the underlying snapshot.
    ///
    /// Pending edits are not reflected here; this is the loaded value.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&str>> {
        self.base.get(row, col)
    }

    /// Get the descriptor for one column.
    pub fn col_desc(&self, col: usize) -> Result<&crate::types::ColumnDesc> {
        self.base.col_desc(col)
    }

    /// Get the name of one column.
    pub fn col_name(&self, col: usize) -> Result<&str> {
        self.base.col_name(col)
    }

    /// Borrow the underlying read-only snapshot.
    pub fn snapshot(&self) -> &RowSet {
        &self.base
    }

    /// True if at least one source table can accept write-back.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Lock a column to prevent changes.
    pub fn lock(&mut self, col: usize) -> Result<()> {
        self.check_col(col)?;
        if self.locks[col] != LockState::Permanent {
            self.locks[col] = LockState::Locked;
        }
        Ok(())
    }

    /// Permanently lock a column. A permanent lock cannot be reversed.
    pub fn lock_permanently(&mut self, col: usize) -> Result<()> {
        self.check_col(col)?;
        self.locks[col] = LockState::Permanent;
        Ok(())
    }

    /// Unlock a column to allow changes.
    ///
    /// Returns `false`, without error, if the column is permanently locked.
    pub fn unlock(&mut self, col: usize) -> Result<bool> {
        self.check_col(col)?;
        if self.locks[col] == LockState::Permanent {
            return Ok(false);
        }
        self.locks[col] = LockState::Unlocked;
        Ok(true)
    }

    /// Turn NULL substitution mode on or off.
    ///
    /// While on, a subsequent [`save_value`](WritableRowSet::save_value) with
    /// an empty string is treated as [`save_null`](WritableRowSet::save_null).
    /// Not retroactive.
    pub fn set_null_substitution(&mut self, on: bool) {
        self.null_substitution = on;
    }

    /// Validate and stage a new value for one cell.
    ///
    /// The value is checked against the column's declared type before being
    /// accepted into the pending-edit buffer; nothing reaches the database
    /// until [`write_back`](WritableRowSet::write_back). Range errors aside,
    /// failures are validation errors the caller can surface and retry.
    pub fn save_value(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        if self.null_substitution && value.is_empty() {
            return self.save_null(row, col);
        }

        self.check_row_col(row, col)?;

        if !self.writable {
            return Err(Error::NotWritable);
        }
        if self.locks[col] != LockState::Unlocked {
            return Err(Error::ColumnLocked {
                column: self.base.col_name(col)?.to_string(),
            });
        }

        if let Some(expected) = self.base.columns()[col].data_type.value_format() {
            if !format_accepts(expected, value) {
                return Err(Error::InvalidFormat {
                    column: self.base.col_name(col)?.to_string(),
                    expected,
                    value: value.to_string(),
                });
            }
        }

        let num_cols = self.base.num_cols();
        let edit = self
            .altered
            .entry(row)
            .or_insert_with(|| RowEdit::new(num_cols));
        if edit.state == RowState::Delete {
            return Err(Error::RowMarkedForDeletion { row });
        }

        if edit.state != RowState::Insert {
            edit.state = RowState::Update;
        }
        edit.dirty[col] = true;
        edit.is_null[col] = false;
        edit.values[col] = value.to_string();
        Ok(())
    }

    /// Stage SQL NULL for one cell.
    ///
    /// Fails with `NullNotAllowed` if the column's descriptor forbids NULL.
    pub fn save_null(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_row_col(row, col)?;

        if !self.writable {
            return Err(Error::NotWritable);
        }
        if self.locks[col] != LockState::Unlocked {
            return Err(Error::ColumnLocked {
                column: self.base.col_name(col)?.to_string(),
            });
        }
        if !self.base.columns()[col].null_ok {
            return Err(Error::NullNotAllowed {
                column: self.base.col_name(col)?.to_string(),
            });
        }

        let num_cols = self.base.num_cols();
        let edit = self
            .altered
            .entry(row)
            .or_insert_with(|| RowEdit::new(num_cols));
        if edit.state == RowState::Delete {
            return Err(Error::RowMarkedForDeletion { row });
        }

        if edit.state != RowState::Insert {
            edit.state = RowState::Update;
        }
        edit.dirty[col] = true;
        edit.is_null[col] = true;
        edit.values[col].clear();
        Ok(())
    }

    /// Mark a row for deletion.
    ///
    /// Staged only: write-back does not yet issue DELETE statements, but the
    /// mark blocks any further edits to the row.
    pub fn mark_row_for_deletion(&mut self, row: usize) -> Result<()> {
        if row >= self.base.num_rows() {
            return Err(Error::RowIndexOutOfBounds {
                index: row,
                count: self.base.num_rows(),
            });
        }
        if !self.writable {
            return Err(Error::NotWritable);
        }
        let num_cols = self.base.num_cols();
        let edit = self
            .altered
            .entry(row)
            .or_insert_with(|| RowEdit::new(num_cols));
        edit.state = RowState::Delete;
        Ok(())
    }

    /// Pending state of a row, or `None` if the row has no staged edits.
    pub fn row_state(&self, row: usize) -> Result<Option<RowState>> {
        if row >= self.base.num_rows() {
            return Err(Error::RowIndexOutOfBounds {
                index: row,
                count: self.base.num_rows(),
            });
        }
        Ok(self.altered.get(&row).map(|e| e.state))
    }

    /// True if the cell has a staged, unflushed edit.
    ///
    /// A field left dirty after [`write_back`](WritableRowSet::write_back)
    /// means its UPDATE matched no rows (unconfirmed), not that an error
    /// occurred.
    pub fn is_dirty(&self, row: usize, col: usize) -> Result<bool> {
        self.check_row_col(row, col)?;
        Ok(self.altered.get(&row).is_some_and(|e| e.dirty[col]))
    }

    /// True if any staged edit or row mark has not been written back.
    pub fn has_pending_edits(&self) -> bool {
        self.altered
            .values()
            .any(|e| e.state != RowState::Update || e.dirty.iter().any(|&d| d))
    }

    /// Write all staged edits to the database.
    ///
    /// For every altered row in update state, one UPDATE per contributing
    /// table is synthesized and executed on `conn`. Key literals in the WHERE
    /// clause come from the originally loaded row, never from pending edits.
    /// A nonzero affected-row count commits that table's portion of the row
    /// (its dirty flags clear); zero leaves the flags set. Each statement is
    /// independently committed; the first connection error aborts the
    /// remaining work and is returned.
    pub async fn write_back<C: Connection>(&mut self, conn: &mut C) -> Result<()> {
        let rows: Vec<usize> = self.altered.keys().copied().collect();
        for row in rows {
            let Some(state) = self.altered.get(&row).map(|e| e.state) else {
                continue;
            };
            match state {
                RowState::Update => self.update_altered_row(row, conn).await?,
                // Staged states with no SQL counterpart yet.
                RowState::Insert | RowState::Delete => {}
            }
        }
        Ok(())
    }

    // Build and execute one UPDATE per writable table with dirty fields in
    // this row.
    async fn update_altered_row<C: Connection>(&mut self, row: usize, conn: &mut C) -> Result<()> {
        for table in &self.tables {
            if !table.writable {
                continue;
            }
            let Some(edit) = self.altered.get(&row) else {
                return Ok(());
            };

            let dirty_cols: Vec<usize> = table
                .cols
                .iter()
                .copied()
                .filter(|&col| edit.dirty[col])
                .collect();
            if dirty_cols.is_empty() {
                continue;
            }

            let mut sql = format!("UPDATE {} SET ", table.name);
            for (i, &col) in dirty_cols.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&self.base.columns()[col].name_in_db);
                sql.push_str(" = ");
                if edit.is_null[col] {
                    sql.push_str("NULL");
                } else {
                    sql.push('\'');
                    sql.push_str(&conn.escape(&edit.values[col]));
                    sql.push('\'');
                }
            }

            // The key identifies the physical row and must be the loaded
            // value, not a pending edit.
            for (i, &col) in table.keys.iter().enumerate() {
                sql.push_str(if i == 0 { " WHERE " } else { " AND " });
                let key = self.base.get(row, col)?.unwrap_or("");
                sql.push_str(&self.base.columns()[col].name_in_db);
                sql.push_str(" = '");
                sql.push_str(&conn.escape(key));
                sql.push('\'');
            }

            trace!(%sql, "write-back statement");
            let affected = conn.execute(&sql).await?;
            debug!(table = %table.name, row, affected, "write-back executed");

            if affected > 0 {
                if let Some(edit) = self.altered.get_mut(&row) {
                    for &col in &table.cols {
                        edit.dirty[col] = false;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.base.num_cols() {
            return Err(Error::ColumnIndexOutOfBounds {
                index: col,
                count: self.base.num_cols(),
            });
        }
        Ok(())
    }

    fn check_row_col(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.base.num_rows() {
            return Err(Error::RowIndexOutOfBounds {
                index: row,
                count: self.base.num_rows(),
            });
        }
        self.check_col(col)
    }
}
