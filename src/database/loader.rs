//! Row loader
//!
//! This module provides functionality for loading insert-template rows from
//! JSON. Each JSON object becomes one `UserRow` with its values converted to
//! the column's expected kind where the JSON value fits. Values that do not
//! fit are kept as-is and rejected when the row is marshalled.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gpkg_rows::database::RowLoader;
//! use gpkg_rows::types::Value;
//! use gpkg_rows::user::UserTable;
//!
//! let table = Arc::new(UserTable::tile_table("imagery").unwrap());
//! let json = r#"[{"zoom_level": 1, "tile_column": 0, "tile_row": 1, "tile_data": "89504e47"}]"#;
//!
//! let rows = RowLoader::new().parse_json(&table, json).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(
//!     rows[0].value_by_name("tile_data").unwrap(),
//!     &Value::Blob(vec![0x89, 0x50, 0x4e, 0x47])
//! );
//! ```

use crate::error::{Error, Result};
use crate::types::{Value, ValueKind};
use crate::user::{UserColumn, UserRow, UserTable};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Row loader
///
/// Provides methods for loading rows from JSON documents.
#[derive(Debug, Clone, Default)]
pub struct RowLoader;

impl RowLoader {
    /// Create a new row loader
    pub fn new() -> Self {
        Self
    }

    /// Load rows from a JSON file
    ///
    /// # Arguments
    /// * `table` - Table the rows belong to
    /// * `path` - Path to a JSON file holding an array of objects
    pub fn load_json(&self, table: &Arc<UserTable>, path: impl AsRef<Path>) -> Result<Vec<UserRow>> {
        let contents = fs::read_to_string(path.as_ref())?;
        let rows = self.parse_json(table, &contents)?;
        log::info!(
            "Loaded {} rows for {} from {}",
            rows.len(),
            table.name(),
            path.as_ref().display()
        );
        Ok(rows)
    }

    /// Parse rows from a JSON string holding an array of objects
    pub fn parse_json(&self, table: &Arc<UserTable>, json: &str) -> Result<Vec<UserRow>> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let records = document
            .as_array()
            .ok_or_else(|| Error::UnsupportedValueType {
                column: table.name().to_string(),
                description: "JSON data must be an array of objects".to_string(),
            })?;

        records
            .iter()
            .map(|record| self.row_from_json(table, record))
            .collect()
    }

    /// Build one row from a JSON object
    ///
    /// The primary key is skipped: loaded rows are insert templates and get
    /// their id from the storage engine.
    pub fn row_from_json(&self, table: &Arc<UserTable>, record: &serde_json::Value) -> Result<UserRow> {
        let object = record
            .as_object()
            .ok_or_else(|| Error::UnsupportedValueType {
                column: table.name().to_string(),
                description: format!("expected a JSON object, found {}", record),
            })?;

        let mut row = UserRow::new(Arc::clone(table));
        for (name, json) in object {
            let column = table.column_by_name(name)?;
            if column.is_primary_key() {
                log::warn!(
                    "Skipping primary key {} = {} for table {}",
                    name,
                    json,
                    table.name()
                );
                continue;
            }
            row.set_value(column.index(), json_to_value(column, json)?)?;
        }
        Ok(row)
    }
}

/// Convert a JSON value for a column
///
/// Integers are narrowed to the column's integer width when they fit, numbers
/// become `float` or `double` for real columns and strings in blob columns
/// are decoded as hex. Anything else keeps its natural kind.
pub fn json_to_value(column: &UserColumn, json: &serde_json::Value) -> Result<Value> {
    let expected = column.value_kind();
    let value = match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Boolean(*flag),
        serde_json::Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                integer_value(expected, integer)
            } else {
                let real = number.as_f64().unwrap_or(f64::NAN);
                match expected {
                    ValueKind::Float => Value::Float(real as f32),
                    _ => Value::Double(real),
                }
            }
        }
        serde_json::Value::String(text) => match expected {
            ValueKind::Blob => match hex::decode(text) {
                Ok(bytes) => Value::Blob(bytes),
                Err(_) => Value::Text(text.clone()),
            },
            _ => Value::Text(text.clone()),
        },
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            return Err(Error::UnsupportedValueType {
                column: column.name().to_string(),
                description: json.to_string(),
            })
        }
    };
    Ok(value)
}

fn integer_value(expected: ValueKind, integer: i64) -> Value {
    match expected {
        ValueKind::Byte => i8::try_from(integer).map_or(Value::Long(integer), Value::Byte),
        ValueKind::Short => i16::try_from(integer).map_or(Value::Long(integer), Value::Short),
        ValueKind::Int => i32::try_from(integer).map_or(Value::Long(integer), Value::Int),
        ValueKind::Float => Value::Float(integer as f32),
        ValueKind::Double => Value::Double(integer as f64),
        _ => Value::Long(integer),
    }
}
