//! Catalog storage
//!
//! This module provides functionality for persisting a schema catalog to a
//! JSON file and loading it back. Table definitions are re-validated on
//! load, so a hand-edited file with a broken table is rejected.
//!
//! # Example
//!
//! ```rust,no_run
//! use gpkg_rows::database::{Catalog, CatalogStorage};
//!
//! let catalog = Catalog::new("world");
//!
//! let storage = CatalogStorage::new();
//! storage.save(&catalog, "world.json").unwrap();
//!
//! let loaded = storage.load("world.json").unwrap();
//! assert_eq!(loaded, catalog);
//! ```

use crate::database::schema::Catalog;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Catalog storage
///
/// Provides methods for saving and loading catalogs.
#[derive(Debug, Clone)]
pub struct CatalogStorage {
    pretty: bool,
}

impl CatalogStorage {
    /// Create a storage instance writing pretty-printed JSON
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a storage instance writing compact JSON
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Save a catalog to a file
    ///
    /// # Arguments
    /// * `catalog` - Catalog to save
    /// * `path` - File path to save to
    pub fn save(&self, catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        catalog.validate()?;

        let json = if self.pretty {
            serde_json::to_string_pretty(catalog)?
        } else {
            serde_json::to_string(catalog)?
        };
        fs::write(path, json)?;

        log::info!(
            "Saved catalog {} with {} tables to {}",
            catalog.name,
            catalog.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a catalog from a file
    ///
    /// # Arguments
    /// * `path` - File path to load from
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::parse(&contents)?;

        log::info!(
            "Loaded catalog {} with {} tables from {}",
            catalog.name,
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string
    pub fn parse(json: &str) -> Result<Catalog> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }
}

impl Default for CatalogStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::DataType;
    use crate::user::{TableKind, UserColumn, UserTable};

    #[test]
    fn test_storage_save_and_load() {
        let storage = CatalogStorage::new();

        let mut catalog = Catalog::new("testdb");
        catalog
            .add_table(
                UserTable::new(
                    "lineitem",
                    vec![
                        UserColumn::primary_key(0, "id"),
                        UserColumn::new(1, "l_comment", DataType::Text, Some(44), false, false),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        catalog
            .add_table(UserTable::tile_table("imagery").unwrap())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        storage.save(&catalog, &path).unwrap();

        let loaded = storage.load(&path).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded.table("imagery").unwrap().kind(), TableKind::Tiles);
    }

    #[test]
    fn test_storage_compact_round_trip() {
        let storage = CatalogStorage::compact();
        let catalog = Catalog::new("empty");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        storage.save(&catalog, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains('\n'));
        assert_eq!(storage.load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_storage_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogStorage::new().load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_storage_parse_invalid_table() {
        let json = r#"{"name": "db", "tables": [{"name": "t", "columns": []}]}"#;
        assert!(matches!(
            CatalogStorage::parse(json),
            Err(Error::Json(_))
        ));
    }
}
