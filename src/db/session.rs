//! Database session trait for abstracting different drivers.
//!
//! A session is one live connection that runs one statement at a time. It
//! accepts SQL text plus positional parameters and hands back either a
//! streaming [`Cursor`] or an affected-row count. Generated key retrieval is
//! an optional capability: the default implementation reports `Unsupported`.

use std::fmt;

use super::error::{Result, SqlError};
use super::keys::GeneratedKey;
use super::row::{Columns, Row};
use super::value::Value;

/// SQL dialect spoken by a session; used to pick fixture scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Forward-only access to an open result set.
pub trait Cursor {
    fn columns(&self) -> &Columns;

    /// Fetch the next row, or `None` once the result set is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>>;
}

/// Consumer handed the cursor of a query. The cursor is closed when it returns.
pub type CursorConsumer<'a> = dyn FnMut(&mut dyn Cursor) -> Result<()> + 'a;

/// Trait for database sessions that can execute statements.
pub trait Session {
    /// Get the dialect for fixture selection and logging.
    fn dialect(&self) -> Dialect;

    /// Run a query and hand its open cursor to `consumer`.
    ///
    /// Implementations must validate the statement and its parameter count
    /// before fetching any row, and must close the cursor before returning,
    /// whether `consumer` succeeds or fails.
    fn query(&mut self, sql: &str, params: &[Value], consumer: &mut CursorConsumer<'_>)
        -> Result<()>;

    /// Run an insert/update/delete and return the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Run a single-row insert and return the database-generated key.
    ///
    /// `generated_columns` names the key column(s) to report.
    fn execute_returning(
        &mut self,
        _sql: &str,
        _params: &[Value],
        _generated_columns: &[&str],
    ) -> Result<GeneratedKey> {
        Err(SqlError::unsupported(format!(
            "{} sessions cannot report generated keys",
            self.dialect()
        )))
    }

    /// Run a script of `;`-separated statements without parameters.
    fn execute_script(&mut self, script: &str) -> Result<()>;
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
        consumer: &mut CursorConsumer<'_>,
    ) -> Result<()> {
        (**self).query(sql, params, consumer)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).execute(sql, params)
    }

    fn execute_returning(
        &mut self,
        sql: &str,
        params: &[Value],
        generated_columns: &[&str],
    ) -> Result<GeneratedKey> {
        (**self).execute_returning(sql, params, generated_columns)
    }

    fn execute_script(&mut self, script: &str) -> Result<()> {
        (**self).execute_script(script)
    }
}

/// Lazy, single-pass iterator over the rows of an open cursor.
///
/// After the first error the iterator is fused and yields `None`.
pub struct Rows<'a> {
    cursor: &'a mut (dyn Cursor + 'a),
    delivered: usize,
    done: bool,
}

impl<'a> Rows<'a> {
    pub fn new(cursor: &'a mut (dyn Cursor + 'a)) -> Self {
        Self {
            cursor,
            delivered: 0,
            done: false,
        }
    }

    pub fn columns(&self) -> &Columns {
        self.cursor.columns()
    }

    /// Number of rows handed out so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_row() {
            Ok(Some(row)) => {
                self.delivered += 1;
                Some(Ok(row))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    /// In-memory cursor over canned rows, optionally failing at one position.
    pub struct VecCursor {
        pub columns: Columns,
        pub rows: std::vec::IntoIter<Vec<Value>>,
        pub fail_at: Option<usize>,
        pub fetched: usize,
    }

    impl VecCursor {
        pub fn new(columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
            Self {
                columns: Columns::new(columns.iter().map(|c| c.to_string()).collect()),
                rows: rows.into_iter(),
                fail_at: None,
                fetched: 0,
            }
        }
    }

    impl Cursor for VecCursor {
        fn columns(&self) -> &Columns {
            &self.columns
        }

        fn next_row(&mut self) -> Result<Option<Row>> {
            if self.fail_at == Some(self.fetched) {
                return Err(SqlError::ConnectionLost {
                    message: "socket closed".into(),
                });
            }
            self.fetched += 1;
            Ok(self.rows.next().map(|v| Row::new(self.columns.clone(), v)))
        }
    }

    #[rstest]
    fn test_rows_iterates_in_order() {
        let mut cursor = VecCursor::new(
            &["id"],
            vec![vec![Value::Integer(1)], vec![Value::Integer(2)]],
        );
        let rows = Rows::new(&mut cursor);
        let ids: Vec<i64> = rows.map(|r| r.unwrap().get("id").unwrap()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    fn test_rows_fuses_after_error() {
        let mut cursor = VecCursor::new(
            &["id"],
            vec![vec![Value::Integer(1)], vec![Value::Integer(2)]],
        );
        cursor.fail_at = Some(1);
        let mut rows = Rows::new(&mut cursor);
        assert!(rows.next().unwrap().is_ok());
        assert!(rows.next().unwrap().is_err());
        assert!(rows.next().is_none());
        assert_eq!(rows.delivered(), 1);
    }

    #[rstest]
    fn test_dialect_display() {
        assert_eq!(Dialect::Sqlite.to_string(), "sqlite");
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
    }
}
