//! User rows
//!
//! A `UserRow` holds the values of one table row together with the storage
//! type tags they were read with. Values can be changed freely through the
//! public setters; type validation happens only when the row is marshalled
//! for a write. The primary key is read-only for callers and is assigned
//! by the persistence layer after an insert.

use crate::error::{Error, Result};
use crate::types::{DataType, StorageType, Value};
use crate::user::column::UserColumn;
use crate::user::marshal::{to_content_values, ContentValues};
use crate::user::table::UserTable;
use std::sync::Arc;

/// Row of a user table
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    table: Arc<UserTable>,
    column_types: Vec<StorageType>,
    values: Vec<Value>,
}

impl UserRow {
    /// Create a row from values read from storage
    ///
    /// # Arguments
    /// * `table` - Schema of the table the row was read from
    /// * `column_types` - Storage type tag of each value
    /// * `values` - Values in column order
    ///
    /// Integer-tagged values of `BOOLEAN` columns are decoded back to
    /// `Value::Boolean`, so a row read from storage marshals again.
    ///
    /// # Returns
    /// `Err(ColumnCountMismatch)` unless both sequences have one entry per column
    pub fn from_storage(
        table: Arc<UserTable>,
        column_types: Vec<StorageType>,
        mut values: Vec<Value>,
    ) -> Result<Self> {
        let expected = table.column_count();
        if values.len() != expected || column_types.len() != expected {
            return Err(Error::ColumnCountMismatch {
                table: table.name().to_string(),
                expected,
                values: values.len(),
                types: column_types.len(),
            });
        }
        for ((column, tag), value) in table.columns().iter().zip(&column_types).zip(&mut values) {
            if column.data_type() == DataType::Boolean && *tag == StorageType::Integer {
                if let Some(flag) = decode_boolean(value) {
                    *value = Value::Boolean(flag);
                }
            }
        }
        Ok(Self {
            table,
            column_types,
            values,
        })
    }

    /// Create an empty row with all values null, for use in an insert
    pub fn new(table: Arc<UserTable>) -> Self {
        let count = table.column_count();
        Self {
            table,
            column_types: vec![StorageType::Null; count],
            values: vec![Value::Null; count],
        }
    }

    pub fn table(&self) -> &Arc<UserTable> {
        &self.table
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.table.column_names()
    }

    pub fn column_name(&self, index: usize) -> Result<&str> {
        self.table.column_name(index)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.table.column_index(name)
    }

    pub fn column(&self, index: usize) -> Result<&UserColumn> {
        self.table.column(index)
    }

    pub fn column_by_name(&self, name: &str) -> Result<&UserColumn> {
        self.table.column_by_name(name)
    }

    /// Get the value at a column index
    pub fn value(&self, index: usize) -> Result<&Value> {
        self.table.check_index(index)?;
        Ok(&self.values[index])
    }

    /// Get the value of a named column
    pub fn value_by_name(&self, name: &str) -> Result<&Value> {
        let index = self.table.column_index(name)?;
        Ok(&self.values[index])
    }

    /// All values in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Storage type tags in column order
    pub fn column_types(&self) -> &[StorageType] {
        &self.column_types
    }

    pub fn storage_type(&self, index: usize) -> Result<StorageType> {
        self.table.check_index(index)?;
        Ok(self.column_types[index])
    }

    pub fn storage_type_by_name(&self, name: &str) -> Result<StorageType> {
        let index = self.table.column_index(name)?;
        Ok(self.column_types[index])
    }

    pub fn pk_index(&self) -> usize {
        self.table.pk_index()
    }

    pub fn pk_column(&self) -> &UserColumn {
        self.table.pk_column()
    }

    /// Set the value at a column index
    ///
    /// The value is not checked against the column type here; an
    /// incompatible value is reported when the row is marshalled.
    ///
    /// # Returns
    /// * `Err(PrimaryKeyImmutable)` if `index` is the primary key column
    /// * `Err(IndexOutOfRange)` if `index` is not a column of the table
    pub fn set_value(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.table.check_index(index)?;
        if index == self.table.pk_index() {
            return Err(Error::PrimaryKeyImmutable {
                table: self.table.name().to_string(),
                index,
                column: self.table.pk_column().name().to_string(),
            });
        }
        self.values[index] = value.into();
        Ok(())
    }

    /// Set the value of a named column
    pub fn set_value_by_name(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.table.column_index(name)?;
        self.set_value(index, value)
    }

    /// Get the id, which is the value of the primary key
    ///
    /// # Returns
    /// * `Err(MissingIdentity)` if the row has not been persisted yet
    /// * `Err(IdentityNotNumeric)` if the primary key holds a non-numeric value
    pub fn id(&self) -> Result<i64> {
        let pk = self.table.pk_column();
        let value = &self.values[pk.index()];
        match value.kind() {
            None => Err(Error::MissingIdentity {
                table: self.table.name().to_string(),
                index: pk.index(),
                column: pk.name().to_string(),
            }),
            Some(kind) => value.as_i64().ok_or_else(|| Error::IdentityNotNumeric {
                table: self.table.name().to_string(),
                column: pk.name().to_string(),
                actual: kind,
            }),
        }
    }

    /// Whether the row has an identity assigned
    pub fn has_id(&self) -> bool {
        !self.values[self.table.pk_index()].is_null()
    }

    /// Assign the id after the storage engine created the row
    pub(crate) fn set_id(&mut self, id: i64) {
        let pk_index = self.table.pk_index();
        self.values[pk_index] = Value::Long(id);
    }

    /// Clear the id so the row can be used as part of an insert
    pub fn reset_id(&mut self) {
        let pk_index = self.table.pk_index();
        self.values[pk_index] = Value::Null;
    }

    /// Validate and convert the row for a storage write
    pub fn to_content_values(&self) -> Result<ContentValues> {
        to_content_values(self)
    }
}

/// Boolean stored as an integer; any non-zero value is true
fn decode_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Byte(_) | Value::Short(_) | Value::Int(_) | Value::Long(_) => {
            value.as_i64().map(|v| v != 0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn places() -> Arc<UserTable> {
        Arc::new(
            UserTable::new(
                "places",
                vec![
                    UserColumn::primary_key(0, "id"),
                    UserColumn::new(1, "name", DataType::Text, Some(5), false, false),
                    UserColumn::with_type(2, "active", DataType::Boolean),
                ],
            )
            .unwrap(),
        )
    }

    fn stored_row() -> UserRow {
        UserRow::from_storage(
            places(),
            vec![StorageType::Integer, StorageType::String, StorageType::Integer],
            vec![Value::Long(9), Value::from("home"), Value::Short(1)],
        )
        .unwrap()
    }

    #[test]
    fn test_row_from_storage() {
        let row = stored_row();
        assert_eq!(row.values().len(), row.column_count());
        assert_eq!(row.storage_type(1).unwrap(), StorageType::String);
        assert_eq!(
            row.storage_type_by_name("active").unwrap(),
            StorageType::Integer
        );
        assert_eq!(row.value_by_name("name").unwrap(), &Value::from("home"));
        assert_eq!(row.value_by_name("active").unwrap(), &Value::Boolean(true));
        assert_eq!(row.id().unwrap(), 9);
        assert!(row.has_id());
    }

    #[test]
    fn test_row_from_storage_shape_mismatch() {
        let result = UserRow::from_storage(
            places(),
            vec![StorageType::Integer],
            vec![Value::Long(1), Value::Null, Value::Null],
        );
        assert!(matches!(
            result,
            Err(Error::ColumnCountMismatch {
                expected: 3,
                values: 3,
                types: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_new_row_is_null() {
        let row = UserRow::new(places());
        assert!(row.values().iter().all(Value::is_null));
        assert!(row
            .column_types()
            .iter()
            .all(|tag| *tag == StorageType::Null));
        assert!(!row.has_id());
    }

    #[test]
    fn test_row_lookup_errors() {
        let row = stored_row();
        assert!(matches!(row.value(3), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(
            row.storage_type(10),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            row.value_by_name("nope"),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            row.storage_type_by_name("nope"),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_set_value_defers_validation() {
        let mut row = UserRow::new(places());
        row.set_value(2, "not a boolean").unwrap();
        assert_eq!(row.value(2).unwrap(), &Value::from("not a boolean"));
        assert!(row.to_content_values().is_err());

        row.set_value_by_name("active", false).unwrap();
        assert!(row.to_content_values().is_ok());
    }

    #[test]
    fn test_set_value_errors() {
        let mut row = UserRow::new(places());
        assert!(matches!(
            row.set_value(0, 5i64),
            Err(Error::PrimaryKeyImmutable { index: 0, .. })
        ));
        assert!(matches!(
            row.set_value_by_name("id", 5i64),
            Err(Error::PrimaryKeyImmutable { .. })
        ));
        assert!(matches!(
            row.set_value(3, 5i64),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            row.set_value_by_name("missing", 5i64),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_identity_lifecycle() {
        let mut row = UserRow::new(places());
        assert!(matches!(row.id(), Err(Error::MissingIdentity { .. })));

        row.set_id(42);
        assert_eq!(row.id().unwrap(), 42);

        row.reset_id();
        assert!(matches!(row.id(), Err(Error::MissingIdentity { .. })));

        row.set_id(7);
        assert_eq!(row.id().unwrap(), 7);
    }

    #[test]
    fn test_identity_not_numeric() {
        let row = UserRow::from_storage(
            places(),
            vec![StorageType::String, StorageType::Null, StorageType::Null],
            vec![Value::from("abc"), Value::Null, Value::Null],
        )
        .unwrap();
        assert!(matches!(
            row.id(),
            Err(Error::IdentityNotNumeric { .. })
        ));
    }

    #[test]
    fn test_identity_from_narrow_and_real_values() {
        let row = UserRow::from_storage(
            places(),
            vec![StorageType::Float, StorageType::Null, StorageType::Null],
            vec![Value::Double(12.9), Value::Null, Value::Null],
        )
        .unwrap();
        assert_eq!(row.id().unwrap(), 12);
    }

    #[test]
    fn test_reset_id_makes_template() {
        let mut row = stored_row();
        row.reset_id();
        let values = row.to_content_values().unwrap();
        assert_eq!(values.get("name"), Some(&Value::from("home")));
        assert_eq!(values.get("active"), Some(&Value::Short(1)));
    }

    #[test]
    fn test_stored_boolean_marshals_again() {
        for (stored, flag) in [(Value::Short(0), false), (Value::Long(1), true), (Value::Int(-3), true)] {
            let row = UserRow::from_storage(
                places(),
                vec![StorageType::Integer, StorageType::Null, StorageType::Integer],
                vec![Value::Long(1), Value::Null, stored],
            )
            .unwrap();
            assert_eq!(row.value(2).unwrap(), &Value::Boolean(flag));
            assert_eq!(row.storage_type(2).unwrap(), StorageType::Integer);

            let values = row.to_content_values().unwrap();
            assert_eq!(values.get("active"), Some(&Value::Short(i16::from(flag))));
        }
    }

    #[test]
    fn test_stored_boolean_other_tags_untouched() {
        let row = UserRow::from_storage(
            places(),
            vec![StorageType::Integer, StorageType::Null, StorageType::String],
            vec![Value::Long(1), Value::Null, Value::from("yes")],
        )
        .unwrap();
        assert_eq!(row.value(2).unwrap(), &Value::from("yes"));
        assert!(matches!(
            row.to_content_values(),
            Err(Error::TypeMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_primary_key_is_immutable(id in any::<i64>(), text in ".*") {
            let mut row = UserRow::new(places());
            let is_immutable = matches!(row.set_value(0, id), Err(Error::PrimaryKeyImmutable { .. }));
            prop_assert!(is_immutable);
            let is_immutable = matches!(row.set_value(0, text), Err(Error::PrimaryKeyImmutable { .. }));
            prop_assert!(is_immutable);
            prop_assert!(row.value(0).unwrap().is_null());
        }

        #[test]
        fn prop_reset_id_clears_identity(id in any::<i64>()) {
            let mut row = stored_row();
            row.set_id(id);
            prop_assert_eq!(row.id().unwrap(), id);
            row.reset_id();
            let is_missing = matches!(row.id(), Err(Error::MissingIdentity { .. }));
            prop_assert!(is_missing);
        }
    }
}
