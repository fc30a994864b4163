//! Core value types for user tables
//!
//! This module defines the data structures shared by every table kind:
//! - SQL data types as declared in a table definition
//! - Concrete runtime value kinds and the `Value` enum holding them
//! - Storage type tags recorded when a value is read back from storage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL data types a GeoPackage column may be declared with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    /// 0 or 1
    Boolean,

    /// 8-bit signed integer
    TinyInt,

    /// 16-bit signed integer
    SmallInt,

    /// 32-bit signed integer
    MediumInt,

    /// 64-bit signed integer
    Int,

    /// 64-bit signed integer, alias of `Int`
    Integer,

    /// 32-bit IEEE floating point
    Float,

    /// 64-bit IEEE floating point
    Double,

    /// 64-bit IEEE floating point, alias of `Double`
    Real,

    /// Variable length UTF-8 string
    Text,

    /// Variable length binary data
    Blob,

    /// ISO-8601 date string
    Date,

    /// ISO-8601 timestamp string
    DateTime,
}

impl DataType {
    /// All declared types, in definition order
    pub const ALL: [DataType; 13] = [
        DataType::Boolean,
        DataType::TinyInt,
        DataType::SmallInt,
        DataType::MediumInt,
        DataType::Int,
        DataType::Integer,
        DataType::Float,
        DataType::Double,
        DataType::Real,
        DataType::Text,
        DataType::Blob,
        DataType::Date,
        DataType::DateTime,
    ];

    /// SQL name of the type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::TinyInt => "TINYINT",
            DataType::SmallInt => "SMALLINT",
            DataType::MediumInt => "MEDIUMINT",
            DataType::Int => "INT",
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
            DataType::Blob => "BLOB",
            DataType::Date => "DATE",
            DataType::DateTime => "DATETIME",
        }
    }

    /// Concrete runtime kind a column of this type expects
    ///
    /// The validator checks value compatibility against this kind, so
    /// `TINYINT` and `INTEGER` columns accept different value widths even
    /// though both belong to the integer family.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            DataType::Boolean => ValueKind::Boolean,
            DataType::TinyInt => ValueKind::Byte,
            DataType::SmallInt => ValueKind::Short,
            DataType::MediumInt => ValueKind::Int,
            DataType::Int | DataType::Integer => ValueKind::Long,
            DataType::Float => ValueKind::Float,
            DataType::Double | DataType::Real => ValueKind::Double,
            DataType::Text | DataType::Date | DataType::DateTime => ValueKind::Text,
            DataType::Blob => ValueKind::Blob,
        }
    }

    /// Logical family of the type
    pub fn family(&self) -> TypeFamily {
        self.value_kind().family()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        DataType::ALL
            .iter()
            .find(|data_type| data_type.name() == upper)
            .copied()
            .ok_or_else(|| format!("Unknown data type: {}", s))
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.name().to_string()
    }
}

/// Logical type family of a declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Text,
    Integer,
    Real,
    Blob,
    Boolean,
}

/// Concrete kind of a runtime value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Text,
    Blob,
    Boolean,
}

impl ValueKind {
    /// All value kinds, in widening order within each family
    pub const ALL: [ValueKind; 9] = [
        ValueKind::Byte,
        ValueKind::Short,
        ValueKind::Int,
        ValueKind::Long,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::Text,
        ValueKind::Blob,
        ValueKind::Boolean,
    ];

    pub fn family(&self) -> TypeFamily {
        match self {
            ValueKind::Byte | ValueKind::Short | ValueKind::Int | ValueKind::Long => {
                TypeFamily::Integer
            }
            ValueKind::Float | ValueKind::Double => TypeFamily::Real,
            ValueKind::Text => TypeFamily::Text,
            ValueKind::Blob => TypeFamily::Blob,
            ValueKind::Boolean => TypeFamily::Boolean,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.family(), TypeFamily::Integer | TypeFamily::Real)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Text => "text",
            ValueKind::Blob => "blob",
            ValueKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Storage type tag of a value as read from the database cursor
///
/// The numeric codes match the SQLite cursor field type constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageType {
    #[default]
    Null,
    Integer,
    Float,
    String,
    Blob,
}

impl StorageType {
    pub fn code(&self) -> i32 {
        match self {
            StorageType::Null => 0,
            StorageType::Integer => 1,
            StorageType::Float => 2,
            StorageType::String => 3,
            StorageType::Blob => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(StorageType::Null),
            1 => Some(StorageType::Integer),
            2 => Some(StorageType::Float),
            3 => Some(StorageType::String),
            4 => Some(StorageType::Blob),
            _ => None,
        }
    }

    /// Tag a stored value would be read back with
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => StorageType::Null,
            Value::Byte(_)
            | Value::Short(_)
            | Value::Int(_)
            | Value::Long(_)
            | Value::Boolean(_) => StorageType::Integer,
            Value::Float(_) | Value::Double(_) => StorageType::Float,
            Value::Text(_) => StorageType::String,
            Value::Blob(_) => StorageType::Blob,
        }
    }
}

/// Runtime column value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
    #[default]
    Null,
}

impl Value {
    /// Concrete kind of the value, `None` for null
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Byte(_) => Some(ValueKind::Byte),
            Value::Short(_) => Some(ValueKind::Short),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Long(_) => Some(ValueKind::Long),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Double(_) => Some(ValueKind::Double),
            Value::Text(_) => Some(ValueKind::Text),
            Value::Blob(_) => Some(ValueKind::Blob),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric value as a 64-bit integer
    ///
    /// Floating point values are truncated toward zero. Returns `None` for
    /// null, text, blob and boolean values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Convert value to JSON
    ///
    /// Blobs are rendered as lowercase hex strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Byte(v) => serde_json::json!(v),
            Value::Short(v) => serde_json::json!(v),
            Value::Int(v) => serde_json::json!(v),
            Value::Long(v) => serde_json::json!(v),
            Value::Float(v) => serde_json::json!(v),
            Value::Double(v) => serde_json::json!(v),
            Value::Text(v) => serde_json::json!(v),
            Value::Blob(v) => serde_json::json!(hex::encode(v)),
            Value::Boolean(v) => serde_json::json!(v),
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Null => f.write_str("NULL"),
        }
    }
}

macro_rules! impl_from_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_value! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => Text,
    Vec<u8> => Blob,
    bool => Boolean,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parse() {
        assert_eq!("integer".parse::<DataType>().unwrap(), DataType::Integer);
        assert_eq!(" DateTime ".parse::<DataType>().unwrap(), DataType::DateTime);
        assert!("VARCHAR".parse::<DataType>().is_err());

        for data_type in DataType::ALL {
            assert_eq!(data_type.name().parse::<DataType>().unwrap(), data_type);
        }
    }

    #[test]
    fn test_data_type_serde() {
        let json = serde_json::to_string(&DataType::MediumInt).unwrap();
        assert_eq!(json, "\"MEDIUMINT\"");

        let parsed: DataType = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(parsed, DataType::Blob);

        assert!(serde_json::from_str::<DataType>("\"GEOMETRY\"").is_err());
    }

    #[test]
    fn test_data_type_families() {
        assert_eq!(DataType::TinyInt.family(), TypeFamily::Integer);
        assert_eq!(DataType::Integer.family(), TypeFamily::Integer);
        assert_eq!(DataType::Real.family(), TypeFamily::Real);
        assert_eq!(DataType::Date.family(), TypeFamily::Text);
        assert_eq!(DataType::Blob.family(), TypeFamily::Blob);
        assert_eq!(DataType::Boolean.family(), TypeFamily::Boolean);

        assert_eq!(DataType::Int.value_kind(), ValueKind::Long);
        assert_eq!(DataType::Float.value_kind(), ValueKind::Float);
        assert_eq!(DataType::Real.value_kind(), ValueKind::Double);
    }

    #[test]
    fn test_storage_type_codes() {
        for code in 0..5 {
            assert_eq!(StorageType::from_code(code).unwrap().code(), code);
        }
        assert_eq!(StorageType::from_code(9), None);
        assert_eq!(StorageType::default(), StorageType::Null);

        assert_eq!(StorageType::of(&Value::Boolean(true)), StorageType::Integer);
        assert_eq!(StorageType::of(&Value::Float(1.5)), StorageType::Float);
        assert_eq!(StorageType::of(&Value::from("a")), StorageType::String);
        assert_eq!(StorageType::of(&Value::Blob(vec![1])), StorageType::Blob);
        assert_eq!(StorageType::of(&Value::Null), StorageType::Null);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(7i8), Value::Byte(7));
        assert_eq!(Value::from(7i64), Value::Long(7));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Boolean(true));

        assert_eq!(Value::Double(-3.9).as_i64(), Some(-3));
        assert_eq!(Value::Short(12).as_f64(), Some(12.0));
        assert_eq!(Value::Boolean(true).as_i64(), None);
        assert_eq!(Value::Null.kind(), None);
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(Value::Int(5).to_json(), serde_json::json!(5));
        assert_eq!(Value::Blob(vec![0xde, 0xad]).to_json(), serde_json::json!("dead"));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }
}
