//! Raw column metadata as reported by the server.
//!
//! This struct preserves the native wire-format facts for one result column.
//! [`ColumnDesc`](super::ColumnDesc) is the classified, user-facing form.

/// Server-reported metadata for one result column.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    /// Column name (the display alias when the query set one).
    pub name: String,
    /// Column name in the originating table. Empty for computed expressions.
    pub org_name: String,
    /// Originating table. Empty for computed expressions.
    pub table: String,
    /// Native data type code.
    pub type_code: u8,
    /// Field flag bits: nullability, key membership, signedness, auto-increment.
    pub flags: u16,
    /// Data length (precision).
    pub length: u32,
    /// Number of decimals (scale) for numeric types.
    pub decimals: u8,
    /// Character set id of the column.
    pub charset: u16,
}

impl FieldMeta {
    /// Create field metadata with minimal info.
    pub fn new(name: impl Into<String>, type_code: u8) -> Self {
        Self {
            name: name.into(),
            org_name: String::new(),
            table: String::new(),
            type_code,
            flags: 0,
            length: 0,
            decimals: 0,
            charset: 0,
        }
    }
}
