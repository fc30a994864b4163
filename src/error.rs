//! Error types
//!
//! Every failure in the row model is a synchronous, local error surfaced to
//! the immediate caller. Nothing here is retried or logged-and-ignored.

use crate::types::ValueKind;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the schema, row, marshalling and persistence layers
#[derive(Debug, Error)]
pub enum Error {
    /// A column name that is not part of the table
    #[error("Unknown column. Table: {table}, Column: {column}")]
    UnknownColumn { table: String, column: String },

    /// A column index outside `[0, column_count)`
    #[error("Column index out of range. Table: {table}, Index: {index}, Column Count: {count}")]
    IndexOutOfRange {
        table: String,
        index: usize,
        count: usize,
    },

    /// A table definition that breaks the schema construction rules
    #[error("Invalid table schema. Table: {table}, Reason: {reason}")]
    SchemaInvariantViolation { table: String, reason: String },

    /// Values and type tags handed over by a storage read do not fit the table
    #[error(
        "Row shape does not match table. Table: {table}, Columns: {expected}, Values: {values}, Types: {types}"
    )]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        values: usize,
        types: usize,
    },

    /// Attempt to overwrite the primary key through the public setter
    #[error("Can not update the primary key of the row. Table: {table}, Index: {index}, Column: {column}")]
    PrimaryKeyImmutable {
        table: String,
        index: usize,
        column: String,
    },

    /// Identity requested before one was assigned
    #[error("Row id was null. Table: {table}, Column Index: {index}, Column Name: {column}")]
    MissingIdentity {
        table: String,
        index: usize,
        column: String,
    },

    /// Identity slot holds a value that is not a number
    #[error("Row id was not a number. Table: {table}, Column Name: {column}, Actual Type: {actual}")]
    IdentityNotNumeric {
        table: String,
        column: String,
        actual: ValueKind,
    },

    /// Value kind not accepted by the column's declared type
    #[error("Illegal value. Column: {column}, Value: {value}, Expected Type: {expected}, Actual Type: {actual}")]
    TypeMismatch {
        column: String,
        value: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Value that the row model has no representation for
    #[error("Unsupported value type. Column: {column}, Value: {description}")]
    UnsupportedValueType { column: String, description: String },

    /// Text or blob longer than the column maximum
    #[error("Value is larger than the column max. Column: {column}, Size: {size}, Max: {max}")]
    ValueTooLarge { column: String, size: u64, max: u64 },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table {0} already exists")]
    DuplicateTable(String),

    /// Row built for a different schema than the one it is written to
    #[error("Row belongs to a different table. Expected Table: {expected}, Row Table: {actual}")]
    TableMismatch { expected: String, actual: String },

    #[error("Row not found. Table: {table}, Id: {id}")]
    RowNotFound { table: String, id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
