//! Typed result-set cache with transactional write-back.
//!
//! Executes a query through an abstract [`Connection`] and materializes a
//! type-annotated, read-only snapshot of the result ([`RowSet`]), or an
//! editable overlay on top of it ([`WritableRowSet`]) that validates edits
//! against server-reported column metadata, buffers them per row, and
//! translates them into minimal UPDATE statements scoped per source table.
//!
//! Only columns backed by a table with a discoverable primary key can ever be
//! written; a result set joining several tables gets one UPDATE per
//! contributing table, each anchored on that table's own key values from the
//! originally loaded row.
//!
//! # Example
//!
//! ```no_run
//! use mysql_rowset_rs::{Connection, Result, WritableRowSet};
//! # use mysql_rowset_rs::QueryResult;
//! # struct Session;
//! # impl Connection for Session {
//! #     async fn execute(&mut self, _sql: &str) -> Result<u64> { Ok(0) }
//! #     async fn query(&mut self, _sql: &str) -> Result<QueryResult> { Ok(QueryResult::default()) }
//! # }
//! # async fn demo(mut session: Session) -> Result<()> {
//! let mut rows = WritableRowSet::query(
//!     &mut session,
//!     "SELECT p.id, p.name, l.city FROM people p JOIN places l ON p.place_id = l.place_id",
//! )
//! .await?;
//!
//! // Edits are validated against the column type and buffered locally.
//! rows.save_value(0, 1, "Ada King")?;
//!
//! // Pending edits become one UPDATE per source table.
//! rows.write_back(&mut session).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod escape;
pub mod row_set;
pub mod types;
pub mod writable;

// Re-export main types
pub use connection::{Connection, QueryResult};
pub use error::{Error, Result};
pub use row_set::RowSet;
pub use types::{ColumnDesc, DbDataType, FieldMeta, ValueFormat};
pub use writable::{RowState, WritableRowSet};
