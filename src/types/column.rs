//! Column descriptors for loaded result sets.

use super::constants::{AUTO_INCREMENT_FLAG, NOT_NULL_FLAG, PRI_KEY_FLAG};
use super::data_type::DbDataType;
use super::field::FieldMeta;

/// Immutable metadata describing one column of a loaded result set.
///
/// Built once per query execution from server field metadata and owned by the
/// [`RowSet`](crate::RowSet) that created it; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ColumnDesc {
    /// Column name (the display alias when the query set one).
    pub name: String,
    /// Column name in the originating table; empty for computed expressions.
    pub name_in_db: String,
    /// Table the column belongs to; empty for computed expressions.
    pub table: String,
    /// Classified data type.
    pub data_type: DbDataType,
    /// Data length (precision).
    pub length: u32,
    /// Number of decimals (scale) for numeric types.
    pub decimals: u8,
    /// True if NULL values are allowed in the column.
    pub null_ok: bool,
    /// True if the column is part of a primary key.
    pub is_pri_key: bool,
    /// True if the server assigns the value by auto-increment.
    pub is_auto_inc: bool,
}

impl ColumnDesc {
    /// Classify a server-reported field into a descriptor.
    pub fn from_field(field: &FieldMeta) -> Self {
        Self {
            name: field.name.clone(),
            name_in_db: field.org_name.clone(),
            table: field.table.clone(),
            data_type: DbDataType::from_native(field.type_code, field.flags, field.charset),
            length: field.length,
            decimals: field.decimals,
            null_ok: field.flags & NOT_NULL_FLAG == 0,
            is_pri_key: field.flags & PRI_KEY_FLAG != 0,
            is_auto_inc: field.flags & AUTO_INCREMENT_FLAG != 0,
        }
    }
}
