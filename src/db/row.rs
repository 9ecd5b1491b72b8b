//! Result rows and column-name keyed maps.
//!
//! All rows of one result set share a single [`Columns`] header, so the column
//! set is fixed for the duration of an iteration. Column lookups ignore ASCII
//! case: `NAME`, `name` and `Name` address the same column.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::{Result, SqlError};
use super::value::{FromValue, Value};

/// Ordered column names of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns(Arc<[String]>);

impl Columns {
    pub fn new(names: Vec<String>) -> Self {
        Self(names.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Position of a column, matched case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c.eq_ignore_ascii_case(name))
    }
}

/// One record of a query result.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Columns,
    values: Vec<Value>,
}

impl Row {
    /// Sessions guarantee `values.len() == columns.len()`.
    pub fn new(columns: Columns, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Raw cell by column name.
    pub fn value(&self, column: &str) -> Result<&Value> {
        self.columns
            .index_of(column)
            .map(|idx| &self.values[idx])
            .ok_or_else(|| SqlError::ColumnNotFound {
                name: column.to_string(),
            })
    }

    /// Raw cell by zero-based position.
    pub fn value_at(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| SqlError::ColumnNotFound {
            name: format!("#{index}"),
        })
    }

    /// Typed cell by column name.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        T::from_value(self.value(column)?)
    }

    /// Typed cell by zero-based position.
    pub fn get_at<T: FromValue>(&self, index: usize) -> Result<T> {
        T::from_value(self.value_at(index)?)
    }

    pub fn into_map(self) -> ColumnMap {
        ColumnMap {
            entries: self
                .columns
                .names()
                .iter()
                .cloned()
                .zip(self.values)
                .collect(),
        }
    }
}

/// Column name to value mapping for a single row, in select order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnMap {
    entries: Vec<(String, Value)>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Typed lookup; a missing column is an error rather than `None`.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.get(name).ok_or_else(|| SqlError::ColumnNotFound {
            name: name.to_string(),
        })?;
        T::from_value(value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Row> for ColumnMap {
    fn from(row: Row) -> Self {
        row.into_map()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
