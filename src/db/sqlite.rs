//! Embedded SQLite session backed by `rusqlite`.

use std::path::Path;
use std::time::Duration;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Batch, Connection, ErrorCode, ToSql, params_from_iter};
use tracing::warn;

use super::error::{Result, SqlError};
use super::keys::{self, GeneratedKey};
use super::row::{Columns, Row};
use super::session::{Cursor, CursorConsumer, Dialect, Rows, Session};
use super::value::Value;

/// SQLite session over a file or an in-memory database.
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| SqlError::ConnectionLost {
            message: format!("failed to open SQLite database '{}': {e}", path.display()),
        })?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, discarded when the session drops.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| SqlError::ConnectionLost {
            message: format!("failed to open in-memory SQLite database: {e}"),
        })?;
        Self::with_connection(conn)
    }

    /// Foreign keys are off by default in SQLite; integrity errors rely on them.
    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true).map_err(map_error)?;
        Ok(Self { conn })
    }

    /// How long a statement waits on a locked database before failing.
    pub fn set_busy_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.conn.busy_timeout(timeout).map_err(map_error)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Compile exactly one statement; a trailing second statement is rejected
    /// rather than silently dropped.
    fn prepare<'c>(conn: &'c Connection, sql: &str, params: &[Value]) -> Result<rusqlite::Statement<'c>> {
        let mut batch = Batch::new(conn, sql);
        let stmt = batch
            .next()
            .map_err(map_prepare_error)?
            .ok_or_else(|| SqlError::statement("SQL text contains no statement"))?;
        if batch.next().map_err(map_prepare_error)?.is_some() {
            return Err(SqlError::statement(
                "SQL text contains more than one statement; use a script instead",
            ));
        }
        SqlError::check_param_count(stmt.parameter_count(), params.len())?;
        Ok(stmt)
    }

    fn rowid_insert(&mut self, sql: &str, params: &[Value]) -> Result<GeneratedKey> {
        warn!("no generated columns declared, reporting the SQLite rowid");
        let tx = self.conn.savepoint().map_err(map_error)?;
        let affected = {
            let mut stmt = Self::prepare(&tx, sql, params)?;
            stmt.execute(params_from_iter(params.iter())).map_err(map_error)?
        };
        if affected != 1 {
            return Err(SqlError::incorrect_rows(1, affected));
        }
        let key = keys::rowid_key(tx.last_insert_rowid());
        tx.commit().map_err(map_error)?;
        Ok(key)
    }

    fn returning_insert(&mut self, sql: &str, params: &[Value], generated_columns: &[&str]) -> Result<GeneratedKey> {
        let sql = keys::with_returning(sql, generated_columns)?;
        let tx = self.conn.savepoint().map_err(map_error)?;
        let key = {
            let mut stmt = Self::prepare(&tx, &sql, params)?;
            keys::check_returning_columns(stmt.column_count(), generated_columns)?;
            let columns = columns_of(&stmt);
            let rows = stmt.query(params_from_iter(params.iter())).map_err(map_error)?;
            let mut cursor = SqliteCursor { columns, rows };
            keys::collect_generated(&mut Rows::new(&mut cursor))?
        };
        tx.commit().map_err(map_error)?;
        Ok(key)
    }
}

fn columns_of(stmt: &rusqlite::Statement<'_>) -> Columns {
    Columns::new(stmt.column_names().into_iter().map(String::from).collect())
}

struct SqliteCursor<'s> {
    columns: Columns,
    rows: rusqlite::Rows<'s>,
}

impl Cursor for SqliteCursor<'_> {
    fn columns(&self) -> &Columns {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(row) = self.rows.next().map_err(map_error)? else {
            return Ok(None);
        };
        let values = (0..self.columns.len())
            .map(|idx| row.get_ref(idx).map(decode).map_err(map_error))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Row::new(self.columns.clone(), values)))
    }
}

fn decode(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

/// Decimals have no SQLite storage class and are bound as their exact text.
impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(r) => ValueRef::Real(*r),
            Value::Decimal(d) => return Ok(ToSqlOutput::from(d.to_string())),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
            Value::Bool(b) => ValueRef::Integer(i64::from(*b)),
        }))
    }
}

impl Session for SqliteSession {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
        consumer: &mut CursorConsumer<'_>,
    ) -> Result<()> {
        let mut stmt = Self::prepare(&self.conn, sql, params)?;
        let columns = columns_of(&stmt);
        let rows = stmt.query(params_from_iter(params.iter())).map_err(map_error)?;
        let mut cursor = SqliteCursor { columns, rows };
        consumer(&mut cursor)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut stmt = Self::prepare(&self.conn, sql, params)?;
        let affected = stmt
            .execute(params_from_iter(params.iter()))
            .map_err(map_error)?;
        Ok(affected as u64)
    }

    fn execute_returning(
        &mut self,
        sql: &str,
        params: &[Value],
        generated_columns: &[&str],
    ) -> Result<GeneratedKey> {
        if !keys::is_insert(sql) {
            return Err(SqlError::unsupported(
                "generated keys are only reported for INSERT statements",
            ));
        }
        if generated_columns.is_empty() {
            return self.rowid_insert(sql, params);
        }
        self.returning_insert(sql, params, generated_columns)
    }

    fn execute_script(&mut self, script: &str) -> Result<()> {
        self.conn.execute_batch(script).map_err(map_error)
    }
}

/// Errors raised while compiling a statement are statement errors unless the
/// connection itself is gone.
fn map_prepare_error(err: rusqlite::Error) -> SqlError {
    match map_error(err) {
        SqlError::Driver { message } => SqlError::Statement { message },
        other => other,
    }
}

fn map_error(err: rusqlite::Error) -> SqlError {
    let message = err.to_string();
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => SqlError::Integrity { message },
            ErrorCode::CannotOpen
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseCorrupt => SqlError::ConnectionLost { message },
            _ => SqlError::Driver { message },
        },
        rusqlite::Error::InvalidParameterCount(_, _)
        | rusqlite::Error::InvalidParameterName(_)
        | rusqlite::Error::ExecuteReturnedResults
        | rusqlite::Error::MultipleStatement
        | rusqlite::Error::InvalidColumnIndex(_) => SqlError::Statement { message },
        rusqlite::Error::InvalidColumnName(name) => SqlError::ColumnNotFound { name: name.clone() },
        _ => SqlError::Driver { message },
    }
}
