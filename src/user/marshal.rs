//! Row marshalling
//!
//! Converts a `UserRow` into the ordered column name → value map handed to a
//! storage engine for an insert or update. The primary key column is never
//! part of the map; its value is owned by the storage engine.

use crate::error::Result;
use crate::types::Value;
use crate::user::row::UserRow;
use crate::user::validate::validate_value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered column name → storage value map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentValues {
    entries: Vec<(String, Value)>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set a column value, replacing an existing entry in place
    pub fn put(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Record an explicit null for a column
    pub fn put_null(&mut self, column: impl Into<String>) {
        self.put(column, Value::Null);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Convert to a JSON object, keeping column order
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl IntoIterator for ContentValues {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ContentValues {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, &value.to_json())?;
        }
        map.end()
    }
}

/// Convert a row to content values
///
/// Every column except the primary key is included. Null values become
/// explicit nulls; everything else is validated against the column type.
/// The first validation failure aborts the conversion.
pub fn to_content_values(row: &UserRow) -> Result<ContentValues> {
    let table = row.table();
    let mut content_values = ContentValues::with_capacity(table.column_count());

    for column in table.columns().iter().filter(|c| !c.is_primary_key()) {
        let value = &row.values()[column.index()];
        if value.is_null() {
            content_values.put_null(column.name());
        } else {
            content_values.put(column.name(), validate_value(column, value)?);
        }
    }

    log::trace!(
        "Marshalled {} columns for table {}",
        content_values.len(),
        table.name()
    );

    Ok(content_values)
}
