//! Container database module
//!
//! This module connects the row model to schema catalogs and storage.
//!
//! The database module consists of:
//! - `schema`: Catalog of user table schemas
//! - `storage`: Catalog persistence as JSON
//! - `loader`: Loading insert-template rows from JSON
//! - `dao`: Storage engine boundary and per-table data access
//!
//! # Example
//!
//! ```rust
//! use gpkg_rows::database::{CatalogStorage, MemoryEngine, UserDao};
//!
//! let catalog = CatalogStorage::parse(r#"{
//!     "name": "world",
//!     "tables": [{
//!         "name": "cities",
//!         "kind": "features",
//!         "columns": [
//!             {"name": "id", "type": "INTEGER", "primary_key": true, "not_null": true},
//!             {"name": "geom", "type": "BLOB"},
//!             {"name": "name", "type": "TEXT", "max": 32}
//!         ]
//!     }]
//! }"#)
//! .unwrap();
//!
//! let mut engine = MemoryEngine::new();
//! let mut dao = UserDao::new(&mut engine, catalog.table("cities").unwrap()).unwrap();
//!
//! let mut row = dao.new_row();
//! row.set_value_by_name("name", "Lisbon").unwrap();
//! assert_eq!(dao.insert(&mut row).unwrap(), 1);
//! ```

pub mod dao;
pub mod loader;
pub mod schema;
pub mod storage;

// Re-export main types for convenience
pub use dao::{MemoryEngine, RawRow, StorageEngine, UserDao};
pub use loader::RowLoader;
pub use schema::{Catalog, CatalogDef};
pub use storage::CatalogStorage;
