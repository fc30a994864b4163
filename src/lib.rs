//! gpkg_rows: typed rows for GeoPackage user tables
//!
//! This library provides the row/column model shared by feature, tile and
//! attribute tables of a GeoPackage container, and the validation that
//! keeps a value consistent with its column's declared type before it is
//! written to storage.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gpkg_rows::{DataType, Error, UserColumn, UserRow, UserTable};
//!
//! let table = Arc::new(
//!     UserTable::new(
//!         "sensors",
//!         vec![
//!             UserColumn::primary_key(0, "id"),
//!             UserColumn::with_type(1, "channel", DataType::TinyInt),
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let mut row = UserRow::new(table);
//! row.set_value(1, 300i64).unwrap();
//!
//! // Validation is deferred until the row is marshalled for a write
//! assert!(matches!(row.to_content_values(), Err(Error::TypeMismatch { .. })));
//! ```

/// gpkg_rows version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Main modules
pub mod error;
pub mod types;
pub mod user;

pub mod database;
pub mod utils;

// Re-export main types
pub use error::{Error, Result};
pub use types::{DataType, StorageType, TypeFamily, Value, ValueKind};
pub use user::{ContentValues, TableKind, UserColumn, UserRow, UserTable};
