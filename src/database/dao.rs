//! Persistence boundary for user rows
//!
//! Storage engines never see `UserRow`s. They receive marshalled
//! `ContentValues` and return raw values with storage type tags; the
//! `UserDao` turns those back into rows. The DAO is also the only place
//! that assigns a row's id, after the engine reports the identity it
//! allocated for an insert.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gpkg_rows::database::{MemoryEngine, UserDao};
//! use gpkg_rows::user::UserTable;
//!
//! let table = Arc::new(UserTable::tile_table("imagery").unwrap());
//! let mut engine = MemoryEngine::new();
//! let mut dao = UserDao::new(&mut engine, table).unwrap();
//!
//! let mut row = dao.new_row();
//! row.set_value_by_name("zoom_level", 0i64).unwrap();
//! row.set_value_by_name("tile_column", 0i64).unwrap();
//! row.set_value_by_name("tile_row", 0i64).unwrap();
//! row.set_value_by_name("tile_data", vec![0x89u8, 0x50]).unwrap();
//!
//! let id = dao.insert(&mut row).unwrap();
//! assert_eq!(row.id().unwrap(), id);
//! assert_eq!(dao.count().unwrap(), 1);
//! ```

use crate::error::{Error, Result};
use crate::types::{StorageType, Value};
use crate::user::{ContentValues, UserRow, UserTable};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Values and storage type tags of one stored row, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub values: Vec<Value>,
    pub column_types: Vec<StorageType>,
}

impl RawRow {
    /// Build a raw row, deriving each tag from the stored value
    pub fn from_values(values: Vec<Value>) -> Self {
        let column_types = values.iter().map(StorageType::of).collect();
        Self {
            values,
            column_types,
        }
    }
}

/// Storage engine used by the DAO
///
/// Implementations own identity allocation: `insert` returns the id of the
/// newly created row.
pub trait StorageEngine {
    /// Prepare storage for a table; creating an existing table is a no-op
    fn create_table(&mut self, table: &UserTable) -> Result<()>;

    /// Insert a row and return its allocated id
    fn insert(&mut self, table: &UserTable, values: &ContentValues) -> Result<i64>;

    /// Update the row with the given id, returning the number of rows changed
    fn update(&mut self, table: &UserTable, id: i64, values: &ContentValues) -> Result<usize>;

    /// Delete the row with the given id, returning the number of rows removed
    fn delete(&mut self, table: &UserTable, id: i64) -> Result<usize>;

    fn query_for_id(&self, table: &UserTable, id: i64) -> Result<Option<RawRow>>;

    /// All rows of a table ordered by id
    fn query_all(&self, table: &UserTable) -> Result<Vec<RawRow>>;
}

#[derive(Debug, Default)]
struct MemoryTable {
    column_count: usize,
    pk_index: usize,
    rows: BTreeMap<i64, Vec<Value>>,
}

impl MemoryTable {
    fn apply(&self, table: &UserTable, row: &mut [Value], values: &ContentValues) -> Result<()> {
        for (name, value) in values.iter() {
            let index = table.column_index(name)?;
            row[index] = value.clone();
        }
        Ok(())
    }
}

/// In-memory storage engine
///
/// Ids are allocated like SQLite rowids: one past the largest id in use.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    tables: HashMap<String, MemoryTable>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored for a table
    pub fn row_count(&self, table: &str) -> Result<usize> {
        self.tables
            .get(table)
            .map(|t| t.rows.len())
            .ok_or_else(|| Error::TableNotFound(table.to_string()))
    }

    fn table(&self, name: &str) -> Result<&MemoryTable> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut MemoryTable> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}

impl StorageEngine for MemoryEngine {
    fn create_table(&mut self, table: &UserTable) -> Result<()> {
        self.tables
            .entry(table.name().to_string())
            .or_insert_with(|| MemoryTable {
                column_count: table.column_count(),
                pk_index: table.pk_index(),
                rows: BTreeMap::new(),
            });
        Ok(())
    }

    fn insert(&mut self, table: &UserTable, values: &ContentValues) -> Result<i64> {
        let stored = self.table_mut(table.name())?;
        let id = stored.rows.keys().next_back().map_or(1, |max| max + 1);

        let mut row = vec![Value::Null; stored.column_count];
        stored.apply(table, &mut row, values)?;
        row[stored.pk_index] = Value::Long(id);
        stored.rows.insert(id, row);

        Ok(id)
    }

    fn update(&mut self, table: &UserTable, id: i64, values: &ContentValues) -> Result<usize> {
        let stored = self.table_mut(table.name())?;
        let Some(mut row) = stored.rows.get(&id).cloned() else {
            return Ok(0);
        };
        stored.apply(table, &mut row, values)?;
        stored.rows.insert(id, row);
        Ok(1)
    }

    fn delete(&mut self, table: &UserTable, id: i64) -> Result<usize> {
        let stored = self.table_mut(table.name())?;
        Ok(usize::from(stored.rows.remove(&id).is_some()))
    }

    fn query_for_id(&self, table: &UserTable, id: i64) -> Result<Option<RawRow>> {
        let stored = self.table(table.name())?;
        Ok(stored.rows.get(&id).cloned().map(RawRow::from_values))
    }

    fn query_all(&self, table: &UserTable) -> Result<Vec<RawRow>> {
        let stored = self.table(table.name())?;
        Ok(stored
            .rows
            .values()
            .cloned()
            .map(RawRow::from_values)
            .collect())
    }
}

/// Data access object for the rows of one user table
pub struct UserDao<'e, E: StorageEngine> {
    engine: &'e mut E,
    table: Arc<UserTable>,
}

impl<'e, E: StorageEngine> UserDao<'e, E> {
    /// Create a DAO, preparing the table in the engine
    pub fn new(engine: &'e mut E, table: Arc<UserTable>) -> Result<Self> {
        engine.create_table(&table)?;
        Ok(Self { engine, table })
    }

    pub fn table(&self) -> &Arc<UserTable> {
        &self.table
    }

    /// Create an empty row for an insert
    pub fn new_row(&self) -> UserRow {
        UserRow::new(Arc::clone(&self.table))
    }

    /// Insert a row
    ///
    /// The row is validated and marshalled first; nothing is written if that
    /// fails. On success the engine-assigned id is set on the row.
    ///
    /// # Returns
    /// The id of the new row
    pub fn insert(&mut self, row: &mut UserRow) -> Result<i64> {
        self.check_table(row)?;
        let values = row.to_content_values()?;
        let id = self.engine.insert(&self.table, &values)?;
        row.set_id(id);
        log::debug!("Inserted row {} into {}", id, self.table.name());
        Ok(id)
    }

    /// Query a row by id
    pub fn query_for_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.engine
            .query_for_id(&self.table, id)?
            .map(|raw| self.to_row(raw))
            .transpose()
    }

    /// Query a row by id, failing when it does not exist
    pub fn get(&self, id: i64) -> Result<UserRow> {
        self.query_for_id(id)?.ok_or_else(|| Error::RowNotFound {
            table: self.table.name().to_string(),
            id,
        })
    }

    /// Query every row of the table, ordered by id
    pub fn query_all(&self) -> Result<Vec<UserRow>> {
        self.engine
            .query_all(&self.table)?
            .into_iter()
            .map(|raw| self.to_row(raw))
            .collect()
    }

    /// Update a persisted row
    ///
    /// # Returns
    /// The number of rows changed; `Err(MissingIdentity)` if the row has no id
    pub fn update(&mut self, row: &UserRow) -> Result<usize> {
        self.check_table(row)?;
        let id = row.id()?;
        let values = row.to_content_values()?;
        let changed = self.engine.update(&self.table, id, &values)?;
        log::debug!("Updated {} row(s) with id {} in {}", changed, id, self.table.name());
        Ok(changed)
    }

    /// Delete a persisted row
    pub fn delete(&mut self, row: &UserRow) -> Result<usize> {
        self.check_table(row)?;
        self.delete_by_id(row.id()?)
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<usize> {
        let removed = self.engine.delete(&self.table, id)?;
        log::debug!("Deleted {} row(s) with id {} from {}", removed, id, self.table.name());
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.engine.query_all(&self.table)?.len())
    }

    fn to_row(&self, raw: RawRow) -> Result<UserRow> {
        UserRow::from_storage(Arc::clone(&self.table), raw.column_types, raw.values)
    }

    fn check_table(&self, row: &UserRow) -> Result<()> {
        if Arc::ptr_eq(row.table(), &self.table) || **row.table() == *self.table {
            Ok(())
        } else {
            Err(Error::TableMismatch {
                expected: self.table.name().to_string(),
                actual: row.table().name().to_string(),
            })
        }
    }
}
