//! Parameterized statement execution with typed result mapping.
//!
//! [`SqlExecutor`] owns one session and offers the usual access patterns on
//! top of it: scalars, rows as maps, rows through a mapper, a whole result
//! set through an extractor, per-row callbacks, and writes with or without
//! generated keys. Each call opens at most one cursor and closes it before
//! returning.

use tracing::{debug, trace};

use super::error::{Result, SqlError};
use super::keys::GeneratedKey;
use super::row::{ColumnMap, Columns, Row};
use super::session::{Cursor, Dialect, Rows, Session};
use super::value::{FromValue, Value};

/// Statement executor bound to a single database session.
pub struct SqlExecutor<S: Session = Box<dyn Session>> {
    session: S,
}

impl<S: Session> SqlExecutor<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn dialect(&self) -> Dialect {
        self.session.dialect()
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Open a cursor for `sql` and give the lazy row sequence to `f`.
    fn with_rows<A, F>(&mut self, sql: &str, params: &[Value], f: F) -> Result<A>
    where
        F: FnOnce(&mut Rows<'_>) -> Result<A>,
    {
        debug!(dialect = %self.session.dialect(), sql, params = params.len(), "executing SQL query");
        let mut f = Some(f);
        let mut out = None;
        self.session
            .query(sql, params, &mut |cursor: &mut dyn Cursor| {
                let f = f
                    .take()
                    .ok_or_else(|| SqlError::driver("session opened more than one cursor"))?;
                let mut rows = Rows::new(cursor);
                let result = f(&mut rows);
                trace!(rows = rows.delivered(), "result set consumed");
                out = Some(result?);
                Ok(())
            })?;
        out.ok_or_else(|| SqlError::driver("session did not open a cursor"))
    }

    /// Single-value query: exactly one row with exactly one column.
    pub fn query_scalar<T: FromValue>(&mut self, sql: &str, params: &[Value]) -> Result<T> {
        self.with_rows(sql, params, |rows| {
            require_single_column(rows.columns())?;
            let row = single_row(rows)?;
            row.get_at(0)
        })
    }

    /// Single-row query returned as a column map.
    pub fn query_row_as_map(&mut self, sql: &str, params: &[Value]) -> Result<ColumnMap> {
        self.with_rows(sql, params, |rows| single_row(rows).map(Row::into_map))
    }

    /// Every row as an independent column map.
    pub fn query_rows_as_maps(&mut self, sql: &str, params: &[Value]) -> Result<Vec<ColumnMap>> {
        self.with_rows(sql, params, |rows| {
            rows.map(|row| row.map(Row::into_map)).collect()
        })
    }

    /// Single-column query returned as a list of scalars.
    pub fn query_column<T: FromValue>(&mut self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        self.with_rows(sql, params, |rows| {
            require_single_column(rows.columns())?;
            rows.map(|row| row.and_then(|r| r.get_at(0))).collect()
        })
    }

    /// Map the single expected row through `mapper`.
    pub fn query_one<T, M>(&mut self, sql: &str, params: &[Value], mut mapper: M) -> Result<T>
    where
        M: FnMut(&Row, usize) -> Result<T>,
    {
        self.with_rows(sql, params, |rows| {
            let row = single_row(rows)?;
            mapper(&row, 0)
        })
    }

    /// Map every row through `mapper`, preserving result order.
    pub fn query_many<T, M>(&mut self, sql: &str, params: &[Value], mut mapper: M) -> Result<Vec<T>>
    where
        M: FnMut(&Row, usize) -> Result<T>,
    {
        self.with_rows(sql, params, |rows| {
            let mut out = Vec::new();
            for (idx, row) in rows.enumerate() {
                out.push(mapper(&row?, idx)?);
            }
            Ok(out)
        })
    }

    /// Hand the whole result set to `extractor`, which owns the iteration.
    pub fn query_with_extractor<A, E>(&mut self, sql: &str, params: &[Value], extractor: E) -> Result<A>
    where
        E: FnOnce(&mut Rows<'_>) -> Result<A>,
    {
        self.with_rows(sql, params, extractor)
    }

    /// Invoke `callback` once per row without buffering.
    pub fn query_with_callback<C>(&mut self, sql: &str, params: &[Value], mut callback: C) -> Result<()>
    where
        C: FnMut(&Row) -> Result<()>,
    {
        self.with_rows(sql, params, |rows| {
            for row in rows {
                callback(&row?)?;
            }
            Ok(())
        })
    }

    /// Insert, update or delete; returns the affected row count.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        debug!(dialect = %self.session.dialect(), sql, params = params.len(), "executing SQL update");
        let affected = self.session.execute(sql, params)?;
        trace!(affected, "SQL update affected rows");
        Ok(affected)
    }

    /// Single-row insert that reports the database-generated key.
    pub fn execute_returning_key(
        &mut self,
        sql: &str,
        params: &[Value],
        generated_columns: &[&str],
    ) -> Result<GeneratedKey> {
        debug!(
            dialect = %self.session.dialect(),
            sql,
            params = params.len(),
            generated = ?generated_columns,
            "executing SQL insert with generated key"
        );
        self.session.execute_returning(sql, params, generated_columns)
    }

    /// Run one statement per parameter set; stops at the first failure.
    pub fn batch_update(&mut self, sql: &str, batch: &[Vec<Value>]) -> Result<Vec<u64>> {
        debug!(sql, batch_size = batch.len(), "executing SQL batch update");
        batch
            .iter()
            .map(|params| self.session.execute(sql, params))
            .collect()
    }

    /// Run a multi-statement script without parameters.
    pub fn run_script(&mut self, script: &str) -> Result<()> {
        debug!(dialect = %self.session.dialect(), bytes = script.len(), "executing SQL script");
        self.session.execute_script(script)
    }
}

fn require_single_column(columns: &Columns) -> Result<()> {
    if columns.len() == 1 {
        Ok(())
    } else {
        Err(SqlError::incorrect_columns(1, columns.len()))
    }
}

/// Take the only row of a result set, draining the rest to report the real count.
fn single_row(rows: &mut Rows<'_>) -> Result<Row> {
    let first = rows
        .next()
        .transpose()?
        .ok_or_else(|| SqlError::incorrect_rows(1, 0))?;
    let mut extra = 0;
    for row in rows {
        row?;
        extra += 1;
    }
    if extra == 0 {
        Ok(first)
    } else {
        Err(SqlError::incorrect_rows(1, 1 + extra))
    }
}

/// Row callback that counts rows and remembers the result set's columns.
#[derive(Debug, Default)]
pub struct RowCounter {
    row_count: usize,
    column_names: Vec<String>,
}

impl RowCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_row(&mut self, row: &Row) -> Result<()> {
        if self.row_count == 0 {
            self.column_names = row.columns().names().to_vec();
        }
        self.row_count += 1;
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Column names of the counted result set; empty if it had no rows.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}
