//! User table schema
//!
//! A `UserTable` is the ordered set of columns shared by every row read from
//! or written to one table. Feature, tile and attribute tables all use the
//! same schema type and differ only in their `TableKind` and standard
//! columns.
//!
//! # Example
//!
//! ```rust
//! use gpkg_rows::types::DataType;
//! use gpkg_rows::user::{UserColumn, UserTable};
//!
//! let table = UserTable::new(
//!     "places",
//!     vec![
//!         UserColumn::primary_key(0, "id"),
//!         UserColumn::new(1, "name", DataType::Text, Some(64), true, false),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(table.column_count(), 2);
//! assert_eq!(table.column_index("name").unwrap(), 1);
//! assert_eq!(table.pk_column().name(), "id");
//! ```

use crate::error::{Error, Result};
use crate::types::{DataType, TypeFamily};
use crate::user::column::{ColumnDef, UserColumn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of user table in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Vector features with a geometry column
    Features,

    /// Tile pyramid rows
    Tiles,

    /// Non-spatial attribute rows
    #[default]
    Attributes,
}

/// Table schema
///
/// Immutable once constructed. Construction enforces that the table has at
/// least one column, that column indices are dense and unique, that column
/// names are unique and that exactly one integer column is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableDef", into = "TableDef")]
pub struct UserTable {
    name: String,
    kind: TableKind,
    columns: Vec<UserColumn>,
    name_to_index: HashMap<String, usize>,
    pk_index: usize,
}

impl UserTable {
    /// Create an attributes table
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `columns` - Column definitions, in any order
    ///
    /// # Returns
    /// `Err(SchemaInvariantViolation)` if the columns do not form a valid table
    pub fn new(name: impl Into<String>, columns: Vec<UserColumn>) -> Result<Self> {
        Self::with_kind(name, TableKind::Attributes, columns)
    }

    /// Create a table of the given kind
    pub fn with_kind(
        name: impl Into<String>,
        kind: TableKind,
        mut columns: Vec<UserColumn>,
    ) -> Result<Self> {
        let name = name.into();
        let violation = |reason: String| Error::SchemaInvariantViolation {
            table: name.clone(),
            reason,
        };

        if columns.is_empty() {
            return Err(violation("table has no columns".to_string()));
        }

        columns.sort_by_key(UserColumn::index);

        let mut name_to_index = HashMap::with_capacity(columns.len());
        let mut pk_index: Option<usize> = None;
        for (position, column) in columns.iter().enumerate() {
            if column.index() != position {
                return Err(violation(format!(
                    "column indices must be dense and unique, expected index {} but found {} for column {}",
                    position,
                    column.index(),
                    column.name()
                )));
            }
            if name_to_index
                .insert(column.name().to_string(), position)
                .is_some()
            {
                return Err(violation(format!("duplicate column: {}", column.name())));
            }
            if column.is_primary_key() {
                if let Some(existing) = pk_index {
                    return Err(violation(format!(
                        "more than one primary key column: {}, {}",
                        columns[existing].name(),
                        column.name()
                    )));
                }
                if column.family() != TypeFamily::Integer {
                    return Err(violation(format!(
                        "primary key column {} must be an integer type, found {}",
                        column.name(),
                        column.data_type()
                    )));
                }
                pk_index = Some(position);
            }
        }

        let pk_index = pk_index.ok_or_else(|| violation("no primary key column".to_string()))?;

        Ok(Self {
            name,
            kind,
            columns,
            name_to_index,
            pk_index,
        })
    }

    /// Create a tile table with the standard tile pyramid columns
    pub fn tile_table(name: impl Into<String>) -> Result<Self> {
        Self::with_kind(
            name,
            TableKind::Tiles,
            vec![
                UserColumn::primary_key(0, "id"),
                UserColumn::not_null(1, "zoom_level", DataType::Integer),
                UserColumn::not_null(2, "tile_column", DataType::Integer),
                UserColumn::not_null(3, "tile_row", DataType::Integer),
                UserColumn::not_null(4, "tile_data", DataType::Blob),
            ],
        )
    }

    /// Create a feature table
    ///
    /// The primary key is `id`, followed by the geometry blob column and the
    /// additional columns in the order given.
    pub fn feature_table(
        name: impl Into<String>,
        geometry_column: &str,
        additional: Vec<ColumnDef>,
    ) -> Result<Self> {
        let mut columns = vec![
            UserColumn::primary_key(0, "id"),
            UserColumn::with_type(1, geometry_column, DataType::Blob),
        ];
        columns.extend(
            additional
                .into_iter()
                .enumerate()
                .map(|(offset, def)| def.into_column(offset + 2)),
        );
        Self::with_kind(name, TableKind::Features, columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[UserColumn] {
        &self.columns
    }

    /// Column names in column order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(UserColumn::name).collect()
    }

    pub fn column_name(&self, index: usize) -> Result<&str> {
        self.column(index).map(UserColumn::name)
    }

    /// Get the index of a column by name
    ///
    /// # Returns
    /// `Err(UnknownColumn)` if the table has no such column
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Get a column by index
    ///
    /// # Returns
    /// `Err(IndexOutOfRange)` if `index >= column_count()`
    pub fn column(&self, index: usize) -> Result<&UserColumn> {
        self.columns.get(index).ok_or_else(|| Error::IndexOutOfRange {
            table: self.name.clone(),
            index,
            count: self.columns.len(),
        })
    }

    pub fn column_by_name(&self, name: &str) -> Result<&UserColumn> {
        let index = self.column_index(name)?;
        self.column(index)
    }

    /// Check that an index addresses a column of this table
    pub fn check_index(&self, index: usize) -> Result<()> {
        self.column(index).map(|_| ())
    }

    /// Index of the primary key column
    ///
    /// Always present: tables without exactly one primary key are rejected
    /// at construction.
    pub fn pk_index(&self) -> usize {
        self.pk_index
    }

    pub fn pk_column(&self) -> &UserColumn {
        &self.columns[self.pk_index]
    }
}

/// Serialized form of a table inside a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,

    #[serde(default)]
    pub kind: TableKind,

    pub columns: Vec<ColumnDef>,
}

impl TryFrom<TableDef> for UserTable {
    type Error = Error;

    fn try_from(def: TableDef) -> Result<Self> {
        let columns = def
            .columns
            .into_iter()
            .enumerate()
            .map(|(index, column)| column.into_column(index))
            .collect();
        UserTable::with_kind(def.name, def.kind, columns)
    }
}

impl From<UserTable> for TableDef {
    fn from(table: UserTable) -> Self {
        Self {
            columns: table.columns.iter().map(ColumnDef::from).collect(),
            name: table.name,
            kind: table.kind,
        }
    }
}
