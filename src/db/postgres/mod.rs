//! PostgreSQL session implementation.
//!
//! Uses the synchronous `postgres` client. Every statement is prepared first
//! so placeholder counts and parameter types are known before binding, and
//! query results are streamed with `query_raw` rather than collected.

mod conversion;

use postgres::fallible_iterator::FallibleIterator;
use postgres::types::ToSql;
use postgres::{Client, GenericClient, NoTls, RowIter, Statement};
use serde::{Deserialize, Serialize};

use super::error::{Result, SqlError};
use super::keys::{self, GeneratedKey};
use super::row::{Columns, Row};
use super::session::{Cursor, CursorConsumer, Dialect, Rows, Session};
use super::value::Value;

pub use conversion::map_error;

/// Connection settings for a PostgreSQL server.
///
/// Either `connection_string` or the individual fields are used; a connection
/// string wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostgresConfig {
    #[serde(default)]
    pub connection_string: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    /// Server-side `statement_timeout`, applied right after connecting.
    #[serde(default)]
    pub statement_timeout_ms: Option<u64>,
}

impl PostgresConfig {
    pub fn from_connection_string(conn: impl Into<String>) -> Self {
        Self {
            connection_string: Some(conn.into()),
            ..Default::default()
        }
    }

    /// Render the settings as a libpq-style connection string.
    pub fn to_connection_string(&self) -> String {
        if let Some(conn) = &self.connection_string {
            return conn.clone();
        }
        let mut parts = Vec::new();
        parts.push(format!("host={}", self.host.as_deref().unwrap_or("localhost")));
        if let Some(port) = self.port {
            parts.push(format!("port={port}"));
        }
        if let Some(user) = &self.user {
            parts.push(format!("user={user}"));
        }
        if let Some(password) = &self.password {
            parts.push(format!("password={password}"));
        }
        if let Some(database) = &self.database {
            parts.push(format!("dbname={database}"));
        }
        parts.join(" ")
    }
}

/// Session over a single PostgreSQL connection.
pub struct PostgresSession {
    client: Client,
}

impl PostgresSession {
    pub fn connect(config: &PostgresConfig) -> Result<Self> {
        let client = Client::connect(&config.to_connection_string(), NoTls).map_err(|e| {
            SqlError::ConnectionLost {
                message: format!("failed to connect to PostgreSQL: {e}"),
            }
        })?;
        let mut session = Self { client };
        if let Some(ms) = config.statement_timeout_ms {
            session.execute_script(&format!("SET statement_timeout = {ms}"))?;
        }
        Ok(session)
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    fn prepare(&mut self, sql: &str, params: &[Value]) -> Result<Statement> {
        prepare_on(&mut self.client, sql, params)
    }
}

/// Prepare on a client or an open transaction and check the placeholder count.
fn prepare_on<C: GenericClient>(client: &mut C, sql: &str, params: &[Value]) -> Result<Statement> {
    let stmt = client.prepare(sql).map_err(|e| match map_error(e) {
        SqlError::Driver { message } => SqlError::Statement { message },
        other => other,
    })?;
    SqlError::check_param_count(stmt.params().len(), params.len())?;
    Ok(stmt)
}

fn columns_of(stmt: &Statement) -> Columns {
    Columns::new(stmt.columns().iter().map(|c| c.name().to_string()).collect())
}

struct PostgresCursor<'c> {
    columns: Columns,
    rows: RowIter<'c>,
}

impl Cursor for PostgresCursor<'_> {
    fn columns(&self) -> &Columns {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(row) = self.rows.next().map_err(map_error)? else {
            return Ok(None);
        };
        let values = (0..self.columns.len())
            .map(|idx| conversion::decode_column(&row, idx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Row::new(self.columns.clone(), values)))
    }
}

impl Session for PostgresSession {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
        consumer: &mut CursorConsumer<'_>,
    ) -> Result<()> {
        let stmt = self.prepare(sql, params)?;
        let bound = conversion::bind_params(params, stmt.params())?;
        let columns = columns_of(&stmt);
        let rows = self
            .client
            .query_raw(&stmt, bound.iter().map(|p| p.as_ref() as &dyn ToSql))
            .map_err(map_error)?;
        let mut cursor = PostgresCursor { columns, rows };
        consumer(&mut cursor)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        let stmt = self.prepare(sql, params)?;
        let bound = conversion::bind_params(params, stmt.params())?;
        let refs: Vec<&(dyn ToSql + Sync)> = bound.iter().map(|p| p.as_ref()).collect();
        self.client.execute(&stmt, &refs).map_err(map_error)
    }

    fn execute_returning(
        &mut self,
        sql: &str,
        params: &[Value],
        generated_columns: &[&str],
    ) -> Result<GeneratedKey> {
        if generated_columns.is_empty() {
            return Err(SqlError::unsupported(
                "PostgreSQL sessions need the generated column names declared",
            ));
        }
        if !keys::is_insert(sql) {
            return Err(SqlError::unsupported(
                "generated keys are only reported for INSERT statements",
            ));
        }
        let sql = keys::with_returning(sql, generated_columns)?;
        let mut tx = self.client.transaction().map_err(map_error)?;
        let stmt = prepare_on(&mut tx, &sql, params)?;
        keys::check_returning_columns(stmt.columns().len(), generated_columns)?;
        let bound = conversion::bind_params(params, stmt.params())?;
        let key = {
            let rows = tx
                .query_raw(&stmt, bound.iter().map(|p| p.as_ref() as &dyn ToSql))
                .map_err(map_error)?;
            let mut cursor = PostgresCursor {
                columns: columns_of(&stmt),
                rows,
            };
            keys::collect_generated(&mut Rows::new(&mut cursor))?
        };
        tx.commit().map_err(map_error)?;
        Ok(key)
    }

    fn execute_script(&mut self, script: &str) -> Result<()> {
        self.client.batch_execute(script).map_err(map_error)
    }
}
