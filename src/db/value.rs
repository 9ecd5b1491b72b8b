//! Database-native scalar values and their conversion to Rust types.
//!
//! Sessions decode every cell into a [`Value`]. Callers pull typed data back
//! out through [`FromValue`], which performs the lenient numeric/text
//! coercions a JDBC-style `getInt`/`getString` would, and fails with
//! [`SqlError::TypeConversion`] otherwise.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use super::error::{Result, SqlError};

/// A single database cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    /// Exact numeric, e.g. PostgreSQL `NUMERIC` and aggregates such as `AVG`.
    Decimal(Decimal),
    Text(String),
    Blob(Vec<u8>),
    Bool(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Bool(_) => "bool",
        }
    }

    fn conversion_error(&self, target: &'static str) -> SqlError {
        SqlError::TypeConversion {
            value: format!("{} value {}", self.type_name(), self),
            target,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => write!(f, "x'{}'", hex::encode(b)),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Decimal(d) => Serialize::serialize(d, serializer),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Blob(b) => serializer.serialize_str(&hex::encode(b)),
            Value::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Build a positional parameter list from anything convertible to [`Value`].
///
/// ```
/// use sql_template::params;
/// let p = params![1, "George", None::<i64>];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::db::Value>::new()
    };
    ($($param:expr),+ $(,)?) => {
        vec![$($crate::db::Value::from($param)),+]
    };
}

/// Conversion from a borrowed cell to an owned Rust value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(*i),
            Value::Real(r) if r.fract() == 0.0 && r.abs() < 9.0e15 => Ok(*r as i64),
            Value::Decimal(d) if d.fract().is_zero() => d
                .to_i64()
                .ok_or_else(|| value.conversion_error("i64")),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| value.conversion_error("i64")),
            _ => Err(value.conversion_error("i64")),
        }
    }
}

macro_rules! from_value_narrow_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Result<Self> {
                    let wide = i64::from_value(value)
                        .map_err(|_| value.conversion_error(stringify!($t)))?;
                    <$t>::try_from(wide).map_err(|_| value.conversion_error(stringify!($t)))
                }
            }
        )*
    };
}

from_value_narrow_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            Value::Decimal(d) => d.to_f64().ok_or_else(|| value.conversion_error("f64")),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| value.conversion_error("f64")),
            _ => Err(value.conversion_error("f64")),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        f64::from_value(value)
            .map(|r| r as f32)
            .map_err(|_| value.conversion_error("f32"))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            Value::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(value.conversion_error("bool")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Integer(_) | Value::Real(_) | Value::Decimal(_) | Value::Bool(_) => {
                Ok(value.to_string())
            }
            Value::Null | Value::Blob(_) => Err(value.conversion_error("String")),
        }
    }
}

/// Lossless for integers, decimals and numeric text; reals go through their
/// shortest decimal representation.
impl FromValue for Decimal {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Decimal(d) => Ok(*d),
            Value::Integer(i) => Ok(Decimal::from(*i)),
            Value::Real(r) => Decimal::try_from(*r).map_err(|_| value.conversion_error("Decimal")),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| value.conversion_error("Decimal")),
            _ => Err(value.conversion_error("Decimal")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Blob(b) => Ok(b.clone()),
            Value::Text(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(value.conversion_error("Vec<u8>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_integer_to_i64() {
        assert_eq!(i64::from_value(&Value::Integer(42)).unwrap(), 42);
    }

    #[rstest]
    fn test_integral_real_to_i64() {
        assert_eq!(i64::from_value(&Value::Real(6.0)).unwrap(), 6);
    }

    #[rstest]
    fn test_fractional_real_to_i64_fails() {
        let err = i64::from_value(&Value::Real(6.5)).unwrap_err();
        assert!(matches!(err, SqlError::TypeConversion { target: "i64", .. }));
    }

    #[rstest]
    fn test_numeric_text_to_i32() {
        assert_eq!(i32::from_value(&Value::Text(" 7 ".into())).unwrap(), 7);
    }

    #[rstest]
    fn test_i32_overflow_fails() {
        let err = i32::from_value(&Value::Integer(i64::MAX)).unwrap_err();
        assert!(matches!(err, SqlError::TypeConversion { target: "i32", .. }));
    }

    #[rstest]
    fn test_negative_to_u32_fails() {
        assert!(u32::from_value(&Value::Integer(-1)).is_err());
    }

    #[rstest]
    fn test_integer_to_string() {
        assert_eq!(String::from_value(&Value::Integer(6)).unwrap(), "6");
    }

    #[rstest]
    fn test_null_to_string_fails() {
        let err = String::from_value(&Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert null value NULL to String");
    }

    #[rstest]
    fn test_null_to_option_is_none() {
        assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
    }

    #[rstest]
    fn test_text_to_option_is_some() {
        assert_eq!(
            Option::<String>::from_value(&Value::Text("Leo".into())).unwrap(),
            Some("Leo".to_string())
        );
    }

    #[rstest]
    #[case(Value::Integer(1), true)]
    #[case(Value::Integer(0), false)]
    #[case(Value::Text("TRUE".into()), true)]
    #[case(Value::Bool(false), false)]
    fn test_bool_coercions(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(bool::from_value(&value).unwrap(), expected);
    }

    #[rstest]
    #[case(Value::Decimal(Decimal::new(55, 1)), Decimal::new(55, 1))]
    #[case(Value::Integer(10), Decimal::from(10))]
    #[case(Value::Text("5.5000000000000000".into()), Decimal::new(55, 1))]
    #[case(Value::Real(0.25), Decimal::new(25, 2))]
    fn test_to_decimal(#[case] value: Value, #[case] expected: Decimal) {
        assert_eq!(Decimal::from_value(&value).unwrap(), expected);
    }

    #[rstest]
    fn test_decimal_to_numbers() {
        let avg = Value::Decimal(Decimal::new(55, 1));
        assert_eq!(f64::from_value(&avg).unwrap(), 5.5);
        assert!(i64::from_value(&avg).is_err());
        assert_eq!(i64::from_value(&Value::Decimal(Decimal::new(600, 2))).unwrap(), 6);
        assert_eq!(String::from_value(&avg).unwrap(), "5.5");
    }

    #[rstest]
    fn test_decimal_serializes_as_exact_string() {
        let json = serde_json::to_string(&Value::Decimal(Decimal::new(12345, 2))).unwrap();
        assert_eq!(json, r#""123.45""#);
    }

    #[rstest]
    fn test_blob_display_is_hex() {
        assert_eq!(Value::Blob(vec![0xde, 0xad]).to_string(), "x'dead'");
    }

    #[rstest]
    fn test_serialize_json() {
        let values = vec![
            Value::Null,
            Value::Integer(1),
            Value::Text("Leo".into()),
            Value::Bool(true),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,1,"Leo",true]"#);
    }

    #[rstest]
    fn test_params_macro() {
        let p = params![7, "elephant", None::<i64>, 2.5];
        assert_eq!(
            p,
            vec![
                Value::Integer(7),
                Value::Text("elephant".into()),
                Value::Null,
                Value::Real(2.5),
            ]
        );
    }

    #[rstest]
    fn test_params_macro_empty() {
        let p = params![];
        assert!(p.is_empty());
    }
}
