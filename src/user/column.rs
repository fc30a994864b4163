//! User table column definitions

use crate::types::{DataType, TypeFamily, ValueKind};
use serde::{Deserialize, Serialize};

/// Column definition within a user table
///
/// Columns are created with the table they belong to and never change
/// afterwards. The index is the column's position in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColumn {
    index: usize,
    name: String,
    data_type: DataType,
    max: Option<u64>,
    not_null: bool,
    primary_key: bool,
}

impl UserColumn {
    /// Create a new column
    ///
    /// # Arguments
    /// * `index` - Position of the column in its table
    /// * `name` - Column name
    /// * `data_type` - Declared SQL type
    /// * `max` - Maximum length in characters (text) or bytes (blob)
    /// * `not_null` - Whether the column is declared NOT NULL
    /// * `primary_key` - Whether the column is the table's primary key
    pub fn new(
        index: usize,
        name: impl Into<String>,
        data_type: DataType,
        max: Option<u64>,
        not_null: bool,
        primary_key: bool,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            data_type,
            max,
            not_null,
            primary_key,
        }
    }

    /// Create an `INTEGER PRIMARY KEY` column
    pub fn primary_key(index: usize, name: impl Into<String>) -> Self {
        Self::new(index, name, DataType::Integer, None, true, true)
    }

    /// Create a nullable column without a size limit
    pub fn with_type(index: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(index, name, data_type, None, false, false)
    }

    /// Create a NOT NULL column without a size limit
    pub fn not_null(index: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(index, name, data_type, None, true, false)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn family(&self) -> TypeFamily {
        self.data_type.family()
    }

    /// Concrete value kind this column is validated against
    pub fn value_kind(&self) -> ValueKind {
        self.data_type.value_kind()
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// Serialized form of a column inside a catalog file
///
/// The index is implied by the column's position in the table definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,

    #[serde(rename = "type")]
    pub data_type: DataType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,

    #[serde(default)]
    pub not_null: bool,

    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnDef {
    pub(crate) fn into_column(self, index: usize) -> UserColumn {
        UserColumn::new(
            index,
            self.name,
            self.data_type,
            self.max,
            self.not_null,
            self.primary_key,
        )
    }
}

impl From<&UserColumn> for ColumnDef {
    fn from(column: &UserColumn) -> Self {
        Self {
            name: column.name.clone(),
            data_type: column.data_type,
            max: column.max,
            not_null: column.not_null,
            primary_key: column.primary_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_accessors() {
        let column = UserColumn::new(2, "name", DataType::Text, Some(5), true, false);
        assert_eq!(column.index(), 2);
        assert_eq!(column.name(), "name");
        assert_eq!(column.data_type(), DataType::Text);
        assert_eq!(column.family(), TypeFamily::Text);
        assert_eq!(column.value_kind(), ValueKind::Text);
        assert_eq!(column.max(), Some(5));
        assert!(column.is_not_null());
        assert!(!column.is_primary_key());
    }

    #[test]
    fn test_primary_key_column() {
        let column = UserColumn::primary_key(0, "fid");
        assert!(column.is_primary_key());
        assert!(column.is_not_null());
        assert_eq!(column.family(), TypeFamily::Integer);
    }

    #[test]
    fn test_column_def_defaults() {
        let def: ColumnDef = serde_json::from_str(r#"{"name": "label", "type": "text"}"#).unwrap();
        assert_eq!(def.max, None);
        assert!(!def.not_null);
        assert!(!def.primary_key);

        let column = def.into_column(3);
        assert_eq!(column.index(), 3);
        assert_eq!(column.data_type(), DataType::Text);
    }
}
