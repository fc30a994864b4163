//! User table row model
//!
//! This module provides the row/column abstraction shared by feature, tile
//! and attribute tables.
//!
//! The user module consists of:
//! - `column`: Column definitions
//! - `table`: Table schemas and standard table layouts
//! - `row`: Rows of values read from or written to a table
//! - `validate`: Value compatibility with declared column types
//! - `marshal`: Conversion of rows into storage write values
//!
//! # Workflow
//!
//! 1. **Read**: a storage engine returns values and type tags, wrapped in a `UserRow`
//! 2. **Edit**: callers read and change values through the row
//! 3. **Marshal**: the row is validated and converted into `ContentValues`
//! 4. **Write**: the storage engine persists the content values
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gpkg_rows::types::{DataType, Value};
//! use gpkg_rows::user::{UserColumn, UserRow, UserTable};
//!
//! let table = Arc::new(
//!     UserTable::new(
//!         "places",
//!         vec![
//!             UserColumn::primary_key(0, "id"),
//!             UserColumn::new(1, "name", DataType::Text, Some(5), false, false),
//!             UserColumn::with_type(2, "active", DataType::Boolean),
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let mut row = UserRow::new(table);
//! row.set_value_by_name("name", "hello").unwrap();
//! row.set_value_by_name("active", true).unwrap();
//!
//! let values = row.to_content_values().unwrap();
//! assert_eq!(values.get("active"), Some(&Value::Short(1)));
//! assert!(!values.contains_key("id"));
//! ```

pub mod column;
pub mod marshal;
pub mod row;
pub mod table;
pub mod validate;

// Re-export main types for convenience
pub use column::{ColumnDef, UserColumn};
pub use marshal::{to_content_values, ContentValues};
pub use row::UserRow;
pub use table::{TableDef, TableKind, UserTable};
pub use validate::{accepted_kinds, is_compatible, validate_value};
