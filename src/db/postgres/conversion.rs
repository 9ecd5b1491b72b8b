//! Type conversion utilities for the PostgreSQL session.
//!
//! Handles conversion between:
//! - `Value` → PostgreSQL parameters (via the prepared statement's types)
//! - PostgreSQL columns → `Value`
//! - `postgres::Error` → `SqlError`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::Row as PgRow;
use postgres::types::{ToSql, Type};
use rust_decimal::Decimal;

use crate::db::error::{Result, SqlError};
use crate::db::value::{FromValue, Value};

/// `%.f` keeps fractional seconds and accepts their absence when parsing.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Convert each positional value to the Rust type the server expects.
pub(super) fn bind_params(params: &[Value], types: &[Type]) -> Result<Vec<Box<dyn ToSql + Sync>>> {
    params
        .iter()
        .zip(types)
        .map(|(value, ty)| bind_param(value, ty))
        .collect()
}

fn bind_param(value: &Value, ty: &Type) -> Result<Box<dyn ToSql + Sync>> {
    let param: Box<dyn ToSql + Sync> = match *ty {
        Type::BOOL => Box::new(Option::<bool>::from_value(value)?),
        Type::INT2 => Box::new(Option::<i16>::from_value(value)?),
        Type::INT4 => Box::new(Option::<i32>::from_value(value)?),
        Type::INT8 => Box::new(Option::<i64>::from_value(value)?),
        Type::FLOAT4 => Box::new(Option::<f32>::from_value(value)?),
        Type::FLOAT8 => Box::new(Option::<f64>::from_value(value)?),
        Type::NUMERIC => Box::new(Option::<Decimal>::from_value(value)?),
        Type::BYTEA => Box::new(Option::<Vec<u8>>::from_value(value)?),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            Box::new(Option::<String>::from_value(value)?)
        }
        Type::DATE => Box::new(parse_text(value, "DATE", |s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        })?),
        Type::TIMESTAMP => Box::new(parse_text(value, "TIMESTAMP", |s| {
            NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
        })?),
        _ => {
            return Err(SqlError::TypeConversion {
                value: format!("{} value {}", value.type_name(), value),
                target: "unsupported PostgreSQL parameter type",
            });
        }
    };
    Ok(param)
}

fn parse_text<T>(value: &Value, target: &'static str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => parse(s).map(Some).ok_or_else(|| SqlError::TypeConversion {
            value: format!("text value {s}"),
            target,
        }),
        other => Err(SqlError::TypeConversion {
            value: format!("{} value {}", other.type_name(), other),
            target,
        }),
    }
}

/// Decode one column of a row by its declared type.
pub(super) fn decode_column(row: &PgRow, idx: usize) -> Result<Value> {
    let ty = row.columns()[idx].type_().clone();
    let value = match ty {
        Type::BOOL => get::<bool>(row, idx)?.map(Value::Bool),
        Type::INT2 => get::<i16>(row, idx)?.map(Value::from),
        Type::INT4 => get::<i32>(row, idx)?.map(Value::from),
        Type::INT8 => get::<i64>(row, idx)?.map(Value::Integer),
        Type::FLOAT4 => get::<f32>(row, idx)?.map(Value::from),
        Type::FLOAT8 => get::<f64>(row, idx)?.map(Value::Real),
        Type::NUMERIC => get::<Decimal>(row, idx)?.map(Value::Decimal),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, idx)?.map(Value::Text)
        }
        Type::BYTEA => get::<Vec<u8>>(row, idx)?.map(Value::Blob),
        Type::DATE => get::<NaiveDate>(row, idx)?.map(|d| Value::Text(d.to_string())),
        Type::TIME => get::<NaiveTime>(row, idx)?.map(|t| Value::Text(t.to_string())),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, idx)?
            .map(|t| Value::Text(t.format(TIMESTAMP_FORMAT).to_string())),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, idx)?.map(|t| Value::Text(t.to_rfc3339())),
        other => {
            return Err(SqlError::TypeConversion {
                value: format!("column '{}' of type {}", row.columns()[idx].name(), other),
                target: "Value",
            });
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

fn get<'r, T>(row: &'r PgRow, idx: usize) -> Result<Option<T>>
where
    T: postgres::types::FromSql<'r>,
{
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| SqlError::TypeConversion {
            value: format!("column #{idx}: {e}"),
            target: std::any::type_name::<T>(),
        })
}

/// Classify a driver error by SQLSTATE class.
pub fn map_error(err: postgres::Error) -> SqlError {
    let message = err.to_string();
    if err.is_closed() {
        return SqlError::ConnectionLost { message };
    }
    let class = err.code().map(|state| state.code()[..2].to_string());
    match class.as_deref() {
        Some("23") => SqlError::Integrity { message },
        Some("42") | Some("07") => SqlError::Statement { message },
        Some("08") | Some("57") => SqlError::ConnectionLost { message },
        Some("22") => SqlError::TypeConversion {
            value: message,
            target: "PostgreSQL column type",
        },
        _ => SqlError::Driver { message },
    }
}
