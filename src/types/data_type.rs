//! The closed data-type enumeration and the native-type classifier.
//!
//! Nullability, key membership, and signedness arrive as field flags, not as
//! part of the type code; the classifier folds signedness and the binary
//! charset sentinel into the resulting variant.

use std::fmt;

use super::constants::{
    BINARY_CHARSET_ID, MYSQL_TYPE_BIT, MYSQL_TYPE_BLOB, MYSQL_TYPE_DATE, MYSQL_TYPE_DATETIME,
    MYSQL_TYPE_DECIMAL, MYSQL_TYPE_DOUBLE, MYSQL_TYPE_ENUM, MYSQL_TYPE_FLOAT,
    MYSQL_TYPE_GEOMETRY, MYSQL_TYPE_INT24, MYSQL_TYPE_LONG, MYSQL_TYPE_LONGLONG,
    MYSQL_TYPE_LONG_BLOB, MYSQL_TYPE_MEDIUM_BLOB, MYSQL_TYPE_NEWDECIMAL, MYSQL_TYPE_NULL,
    MYSQL_TYPE_SET, MYSQL_TYPE_SHORT, MYSQL_TYPE_STRING, MYSQL_TYPE_TIME, MYSQL_TYPE_TIMESTAMP,
    MYSQL_TYPE_TINY, MYSQL_TYPE_TINY_BLOB, MYSQL_TYPE_VARCHAR, MYSQL_TYPE_VAR_STRING,
    MYSQL_TYPE_YEAR, UNSIGNED_FLAG,
};

/// Declared data type of a result column.
///
/// These are the known types of data that can be received from the server.
/// If the type code could not be determined or was not recognized, the type
/// is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbDataType {
    /// Unknown data type.
    Unknown,
    /// Integer, 1 byte.
    TinyInt,
    /// Integer, 2 bytes.
    SmallInt,
    /// Integer, 3 bytes.
    MediumInt,
    /// Integer, 4 bytes.
    Int,
    /// Integer, 8 bytes.
    BigInt,
    /// Unsigned integer, 1 byte.
    UnsignedTinyInt,
    /// Unsigned integer, 2 bytes.
    UnsignedSmallInt,
    /// Unsigned integer, 3 bytes.
    UnsignedMediumInt,
    /// Unsigned integer, 4 bytes.
    UnsignedInt,
    /// Unsigned integer, 8 bytes.
    UnsignedBigInt,
    /// Exact value, fixed point with given precision and scale.
    Decimal,
    /// Approximate value, floating point.
    Float,
    /// Approximate value, double precision floating point.
    Double,
    /// Bit field with a given number of bits.
    Bit,
    /// TIMESTAMP.
    Timestamp,
    /// DATE.
    Date,
    /// TIME.
    Time,
    /// DATETIME.
    DateTime,
    /// YEAR.
    Year,
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    VarChar,
    /// Fixed-length binary string.
    Binary,
    /// Variable-length binary string.
    VarBinary,
    /// Binary large object.
    Blob,
    /// Character large object.
    Text,
    /// String with zero or more of the permitted values.
    Set,
    /// String with one of the permitted values.
    Enum,
    /// Spatial data type.
    Geometry,
    /// Null type.
    Null,
}

/// Validation family applied to values submitted for a column.
///
/// Types outside these families accept any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Optional sign, then one or more digits.
    Integer,
    /// Optional `+`, then one or more digits.
    UnsignedInteger,
    /// Decimal or scientific notation with at least one digit.
    Numeric,
    /// `YYYY-MM-DD` with month 01-12 and day 01-31.
    Date,
}

impl DbDataType {
    /// Classify a raw type code plus its field flags and charset id.
    ///
    /// Total over all inputs: unrecognized codes map to `Unknown`.
    pub fn from_native(type_code: u8, flags: u16, charset: u16) -> Self {
        let unsigned = flags & UNSIGNED_FLAG != 0;
        let binary = charset == BINARY_CHARSET_ID;
        match type_code {
            MYSQL_TYPE_TINY => {
                if unsigned {
                    DbDataType::UnsignedTinyInt
                } else {
                    DbDataType::TinyInt
                }
            }
            MYSQL_TYPE_SHORT => {
                if unsigned {
                    DbDataType::UnsignedSmallInt
                } else {
                    DbDataType::SmallInt
                }
            }
            MYSQL_TYPE_INT24 => {
                if unsigned {
                    DbDataType::UnsignedMediumInt
                } else {
                    DbDataType::MediumInt
                }
            }
            MYSQL_TYPE_LONG => {
                if unsigned {
                    DbDataType::UnsignedInt
                } else {
                    DbDataType::Int
                }
            }
            MYSQL_TYPE_LONGLONG => {
                if unsigned {
                    DbDataType::UnsignedBigInt
                } else {
                    DbDataType::BigInt
                }
            }
            MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => DbDataType::Decimal,
            MYSQL_TYPE_FLOAT => DbDataType::Float,
            MYSQL_TYPE_DOUBLE => DbDataType::Double,
            MYSQL_TYPE_BIT => DbDataType::Bit,
            MYSQL_TYPE_TIMESTAMP => DbDataType::Timestamp,
            MYSQL_TYPE_DATE => DbDataType::Date,
            MYSQL_TYPE_TIME => DbDataType::Time,
            MYSQL_TYPE_DATETIME => DbDataType::DateTime,
            MYSQL_TYPE_YEAR => DbDataType::Year,
            MYSQL_TYPE_STRING => {
                if binary {
                    DbDataType::Binary
                } else {
                    DbDataType::Char
                }
            }
            MYSQL_TYPE_VARCHAR | MYSQL_TYPE_VAR_STRING => {
                if binary {
                    DbDataType::VarBinary
                } else {
                    DbDataType::VarChar
                }
            }
            MYSQL_TYPE_TINY_BLOB | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_LONG_BLOB
            | MYSQL_TYPE_BLOB => {
                if binary {
                    DbDataType::Blob
                } else {
                    DbDataType::Text
                }
            }
            MYSQL_TYPE_SET => DbDataType::Set,
            MYSQL_TYPE_ENUM => DbDataType::Enum,
            MYSQL_TYPE_GEOMETRY => DbDataType::Geometry,
            MYSQL_TYPE_NULL => DbDataType::Null,
            _ => DbDataType::Unknown,
        }
    }

    /// Validation family for this type, if it has one.
    pub fn value_format(&self) -> Option<ValueFormat> {
        match self {
            DbDataType::TinyInt
            | DbDataType::SmallInt
            | DbDataType::MediumInt
            | DbDataType::Int
            | DbDataType::BigInt => Some(ValueFormat::Integer),
            DbDataType::UnsignedTinyInt
            | DbDataType::UnsignedSmallInt
            | DbDataType::UnsignedMediumInt
            | DbDataType::UnsignedInt
            | DbDataType::UnsignedBigInt => Some(ValueFormat::UnsignedInteger),
            DbDataType::Decimal | DbDataType::Float | DbDataType::Double => {
                Some(ValueFormat::Numeric)
            }
            DbDataType::Date => Some(ValueFormat::Date),
            _ => None,
        }
    }
}

impl fmt::Display for DbDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DbDataType::Unknown => "UNKNOWN",
            DbDataType::TinyInt => "TINYINT",
            DbDataType::SmallInt => "SMALLINT",
            DbDataType::MediumInt => "MEDIUMINT",
            DbDataType::Int => "INT",
            DbDataType::BigInt => "BIGINT",
            DbDataType::UnsignedTinyInt => "TINYINT UNSIGNED",
            DbDataType::UnsignedSmallInt => "SMALLINT UNSIGNED",
            DbDataType::UnsignedMediumInt => "MEDIUMINT UNSIGNED",
            DbDataType::UnsignedInt => "INT UNSIGNED",
            DbDataType::UnsignedBigInt => "BIGINT UNSIGNED",
            DbDataType::Decimal => "DECIMAL",
            DbDataType::Float => "FLOAT",
            DbDataType::Double => "DOUBLE",
            DbDataType::Bit => "BIT",
            DbDataType::Timestamp => "TIMESTAMP",
            DbDataType::Date => "DATE",
            DbDataType::Time => "TIME",
            DbDataType::DateTime => "DATETIME",
            DbDataType::Year => "YEAR",
            DbDataType::Char => "CHAR",
            DbDataType::VarChar => "VARCHAR",
            DbDataType::Binary => "BINARY",
            DbDataType::VarBinary => "VARBINARY",
            DbDataType::Blob => "BLOB",
            DbDataType::Text => "TEXT",
            DbDataType::Set => "SET",
            DbDataType::Enum => "ENUM",
            DbDataType::Geometry => "GEOMETRY",
            DbDataType::Null => "NULL",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueFormat::Integer => "integer",
            ValueFormat::UnsignedInteger => "unsigned integer",
            ValueFormat::Numeric => "number",
            ValueFormat::Date => "date",
        };
        f.write_str(name)
    }
}
