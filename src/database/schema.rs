//! Schema catalog
//!
//! This module provides the catalog of user table schemas defined by a
//! container. Every table in the catalog is shared through an `Arc`, so rows
//! read from the same table all point at one schema.
//!
//! # Example
//!
//! ```rust
//! use gpkg_rows::database::Catalog;
//! use gpkg_rows::user::UserTable;
//!
//! let mut catalog = Catalog::new("world");
//! catalog.add_table(UserTable::tile_table("imagery").unwrap()).unwrap();
//!
//! let tiles = catalog.table("imagery").unwrap();
//! assert_eq!(tiles.column_count(), 5);
//! ```

use crate::error::{Error, Result};
use crate::user::UserTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Catalog of user tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDef", into = "CatalogDef")]
pub struct Catalog {
    /// Container name
    pub name: String,

    /// Table definitions (name -> table)
    tables: BTreeMap<String, Arc<UserTable>>,
}

impl Catalog {
    /// Create an empty catalog
    ///
    /// # Arguments
    /// * `name` - Container name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }

    /// Add a table to the catalog
    ///
    /// # Returns
    /// The shared schema, or `Err(DuplicateTable)` if the name is taken
    pub fn add_table(&mut self, table: UserTable) -> Result<Arc<UserTable>> {
        if self.tables.contains_key(table.name()) {
            return Err(Error::DuplicateTable(table.name().to_string()));
        }
        let table = Arc::new(table);
        self.tables
            .insert(table.name().to_string(), Arc::clone(&table));
        Ok(table)
    }

    /// Get a table by name
    ///
    /// # Returns
    /// `Err(TableNotFound)` if the catalog has no such table
    pub fn table(&self, name: &str) -> Result<Arc<UserTable>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Arc<UserTable>> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Validate the catalog
    ///
    /// Table schemas are validated when they are built, so this only checks
    /// that every table is registered under its own name.
    pub fn validate(&self) -> Result<()> {
        for (name, table) in &self.tables {
            if name != table.name() {
                return Err(Error::SchemaInvariantViolation {
                    table: table.name().to_string(),
                    reason: format!("registered under name {}", name),
                });
            }
        }
        Ok(())
    }
}

/// Serialized form of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,

    #[serde(default)]
    pub tables: Vec<UserTable>,
}

impl TryFrom<CatalogDef> for Catalog {
    type Error = Error;

    fn try_from(def: CatalogDef) -> Result<Self> {
        let mut catalog = Catalog::new(def.name);
        for table in def.tables {
            catalog.add_table(table)?;
        }
        Ok(catalog)
    }
}

impl From<Catalog> for CatalogDef {
    fn from(catalog: Catalog) -> Self {
        Self {
            tables: catalog
                .tables
                .values()
                .map(|table| UserTable::clone(table))
                .collect(),
            name: catalog.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;
    use crate::user::UserColumn;

    fn lineitem() -> UserTable {
        UserTable::new(
            "lineitem",
            vec![
                UserColumn::primary_key(0, "id"),
                UserColumn::with_type(1, "l_quantity", DataType::Integer),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_new() {
        let catalog = Catalog::new("testdb");
        assert_eq!(catalog.name, "testdb");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_add_table() {
        let mut catalog = Catalog::new("testdb");
        let table = catalog.add_table(lineitem()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(Arc::ptr_eq(&table, &catalog.table("lineitem").unwrap()));
    }

    #[test]
    fn test_catalog_add_duplicate_table() {
        let mut catalog = Catalog::new("testdb");
        catalog.add_table(lineitem()).unwrap();
        assert!(matches!(
            catalog.add_table(lineitem()),
            Err(Error::DuplicateTable(ref name)) if name == "lineitem"
        ));
    }

    #[test]
    fn test_catalog_missing_table() {
        let catalog = Catalog::new("testdb");
        assert!(matches!(
            catalog.table("nope"),
            Err(Error::TableNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_table_names_sorted() {
        let mut catalog = Catalog::new("testdb");
        catalog.add_table(lineitem()).unwrap();
        catalog
            .add_table(UserTable::tile_table("imagery").unwrap())
            .unwrap();
        assert_eq!(catalog.table_names(), vec!["imagery", "lineitem"]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_catalog_serde_rejects_duplicates() {
        let json = r#"{
            "name": "testdb",
            "tables": [
                {"name": "t", "columns": [{"name": "id", "type": "INTEGER", "primary_key": true}]},
                {"name": "t", "columns": [{"name": "id", "type": "INTEGER", "primary_key": true}]}
            ]
        }"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
