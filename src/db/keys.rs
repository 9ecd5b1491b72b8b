//! Generated key handling for single-row inserts.

use serde::Serialize;

use super::error::{Result, SqlError};
use super::row::ColumnMap;
use super::session::Rows;
use super::value::{FromValue, Value};

/// Database-assigned key values of one inserted row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneratedKey {
    values: ColumnMap,
}

impl GeneratedKey {
    pub fn new(values: ColumnMap) -> Self {
        Self { values }
    }

    /// The key as a single value; fails when several key columns were reported.
    pub fn key<T: FromValue>(&self) -> Result<T> {
        match self.values.iter().next() {
            Some((_, value)) if self.values.len() == 1 => T::from_value(value),
            _ => Err(SqlError::incorrect_columns(1, self.values.len())),
        }
    }

    /// One key column by name.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        self.values.get_as(column)
    }

    pub fn values(&self) -> &ColumnMap {
        &self.values
    }
}

/// Whether the statement is an `INSERT`, the only shape keys are reported for.
pub fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .split_whitespace()
        .next()
        .is_some_and(|kw| kw.eq_ignore_ascii_case("insert"))
}

/// Append a `RETURNING` clause naming the generated columns.
///
/// Column names are restricted to plain identifiers since they are spliced
/// into the SQL text.
pub fn with_returning(sql: &str, columns: &[&str]) -> Result<String> {
    if let Some(bad) = columns.iter().find(|c| !is_identifier(c)) {
        return Err(SqlError::statement(format!(
            "invalid generated column name '{bad}'"
        )));
    }
    let body = sql.trim_end().trim_end_matches(';').trim_end();
    Ok(format!("{body} RETURNING {}", columns.join(", ")))
}

/// The prepared `RETURNING` statement must report exactly the declared
/// columns; anything else means the clause was swallowed (e.g. by a trailing
/// `--` comment) and the insert must not run.
pub fn check_returning_columns(reported: usize, generated_columns: &[&str]) -> Result<()> {
    if reported == generated_columns.len() {
        Ok(())
    } else {
        Err(SqlError::statement(format!(
            "RETURNING {} yields {reported} column(s); the clause did not apply to the statement",
            generated_columns.join(", ")
        )))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Drain the rows of a `RETURNING` query into the key of the single inserted row.
pub fn collect_generated(rows: &mut Rows<'_>) -> Result<GeneratedKey> {
    let mut key = None;
    let mut count = 0;
    for row in rows {
        let row = row?;
        count += 1;
        if key.is_none() {
            key = Some(row.into_map());
        }
    }
    match key {
        Some(values) if count == 1 => Ok(GeneratedKey::new(values)),
        _ => Err(SqlError::incorrect_rows(1, count)),
    }
}

/// Key for sessions that can only report an implicit row id.
pub fn rowid_key(rowid: i64) -> GeneratedKey {
    let mut values = ColumnMap::new();
    values.insert("rowid", Value::Integer(rowid));
    GeneratedKey::new(values)
}
