//! Value validation against declared column types
//!
//! Compatibility is decided per runtime value kind: every kind carries the
//! ordered set of column kinds it may be written to, and the column's
//! expected kind must be a member of that set. Integer values widen into
//! wider integer columns, `long` values are also accepted by `double`
//! columns, and floating point values never cross between `float` and
//! `double`.

use crate::error::{Error, Result};
use crate::types::{Value, ValueKind};
use crate::user::column::UserColumn;

/// Column kinds a value of the given kind may be stored in
pub fn accepted_kinds(kind: ValueKind) -> &'static [ValueKind] {
    use crate::types::ValueKind::*;
    match kind {
        Byte => &[Byte, Short, Int, Long],
        Short => &[Short, Int, Long],
        Int => &[Int, Long],
        Long => &[Long, Double],
        Float => &[Float],
        Double => &[Double],
        Text => &[Text],
        Blob => &[Blob],
        Boolean => &[Boolean],
    }
}

/// Whether a value of kind `value` may be written to a column expecting `column`
pub fn is_compatible(column: ValueKind, value: ValueKind) -> bool {
    accepted_kinds(value).contains(&column)
}

/// Validate a non-null value for a column and return its storage form
///
/// Text and blob values are checked against the column maximum, and
/// booleans are transcoded to `Value::Short(0)` / `Value::Short(1)`.
///
/// # Returns
/// * `Err(UnsupportedValueType)` for null, which has no storage form to check
/// * `Err(TypeMismatch)` when the column's type does not accept the value kind
/// * `Err(ValueTooLarge)` when text or blob exceeds the column maximum
pub fn validate_value(column: &UserColumn, value: &Value) -> Result<Value> {
    let Some(actual) = value.kind() else {
        return Err(Error::UnsupportedValueType {
            column: column.name().to_string(),
            description: "NULL".to_string(),
        });
    };

    let expected = column.value_kind();
    if !is_compatible(expected, actual) {
        return Err(Error::TypeMismatch {
            column: column.name().to_string(),
            value: value.to_string(),
            expected,
            actual,
        });
    }

    match value {
        Value::Text(text) => check_size(column, text.chars().count())?,
        Value::Blob(bytes) => check_size(column, bytes.len())?,
        Value::Boolean(flag) => return Ok(Value::Short(i16::from(*flag))),
        _ => {}
    }

    Ok(value.clone())
}

fn check_size(column: &UserColumn, size: usize) -> Result<()> {
    match column.max() {
        Some(max) if size as u64 > max => Err(Error::ValueTooLarge {
            column: column.name().to_string(),
            size: size as u64,
            max,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;
    use crate::types::ValueKind::*;

    fn column(data_type: DataType) -> UserColumn {
        UserColumn::with_type(1, "value", data_type)
    }

    fn sample(kind: ValueKind) -> Value {
        match kind {
            Byte => Value::Byte(1),
            Short => Value::Short(1),
            Int => Value::Int(1),
            Long => Value::Long(1),
            Float => Value::Float(1.0),
            Double => Value::Double(1.0),
            Text => Value::from("a"),
            Blob => Value::Blob(vec![1]),
            Boolean => Value::Boolean(true),
        }
    }

    /// Expected outcome for every declared type and value kind pair
    fn expected_accepts(data_type: DataType, kind: ValueKind) -> bool {
        match data_type {
            DataType::Boolean => kind == Boolean,
            DataType::TinyInt => kind == Byte,
            DataType::SmallInt => matches!(kind, Byte | Short),
            DataType::MediumInt => matches!(kind, Byte | Short | Int),
            DataType::Int | DataType::Integer => matches!(kind, Byte | Short | Int | Long),
            DataType::Float => kind == Float,
            DataType::Double | DataType::Real => matches!(kind, Long | Double),
            DataType::Text | DataType::Date | DataType::DateTime => kind == Text,
            DataType::Blob => kind == Blob,
        }
    }

    #[test]
    fn test_every_declared_type_and_value_kind() {
        for data_type in DataType::ALL {
            for kind in ValueKind::ALL {
                let result = validate_value(&column(data_type), &sample(kind));
                if expected_accepts(data_type, kind) {
                    assert!(result.is_ok(), "{} should accept {}", data_type, kind);
                } else {
                    assert!(
                        matches!(result, Err(Error::TypeMismatch { .. })),
                        "{} should reject {}",
                        data_type,
                        kind
                    );
                }
            }
        }
    }

    #[test]
    fn test_long_into_tinyint_is_type_mismatch() {
        let err = validate_value(&column(DataType::TinyInt), &Value::Long(5)).unwrap_err();
        match err {
            Error::TypeMismatch {
                column,
                expected,
                actual,
                value,
            } => {
                assert_eq!(column, "value");
                assert_eq!(expected, Byte);
                assert_eq!(actual, Long);
                assert_eq!(value, "5");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_widening_is_asymmetric() {
        assert!(is_compatible(Double, Long));
        assert!(!is_compatible(Long, Double));
        assert!(!is_compatible(Float, Double));
        assert!(!is_compatible(Double, Float));
        assert!(is_compatible(Long, Byte));
        assert!(!is_compatible(Byte, Long));
    }

    #[test]
    fn test_text_max_size() {
        let name = UserColumn::new(1, "name", DataType::Text, Some(5), false, false);
        assert_eq!(
            validate_value(&name, &Value::from("hello")).unwrap(),
            Value::from("hello")
        );
        assert!(matches!(
            validate_value(&name, &Value::from("toolong")),
            Err(Error::ValueTooLarge { size: 7, max: 5, .. })
        ));
        // Size counts characters, not bytes
        assert!(validate_value(&name, &Value::from("héllo")).is_ok());
    }

    #[test]
    fn test_blob_max_size() {
        let data = UserColumn::new(1, "data", DataType::Blob, Some(2), false, false);
        assert!(validate_value(&data, &Value::Blob(vec![1, 2])).is_ok());
        assert!(matches!(
            validate_value(&data, &Value::Blob(vec![1, 2, 3])),
            Err(Error::ValueTooLarge { size: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_boolean_transcoding() {
        let active = column(DataType::Boolean);
        assert_eq!(
            validate_value(&active, &Value::Boolean(true)).unwrap(),
            Value::Short(1)
        );
        assert_eq!(
            validate_value(&active, &Value::Boolean(false)).unwrap(),
            Value::Short(0)
        );
    }

    #[test]
    fn test_null_is_unsupported() {
        assert!(matches!(
            validate_value(&column(DataType::Text), &Value::Null),
            Err(Error::UnsupportedValueType { .. })
        ));
    }
}
