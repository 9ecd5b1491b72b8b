//! Typed SQL execution and result mapping.
//!
//! This module provides the database layer used by the CLI and the fixture
//! loader:
//! - Sessions over SQLite (`rusqlite`) and PostgreSQL (`postgres`)
//! - Statement execution with positional parameter binding
//! - Result mapping to scalars, column maps, mapped domain values,
//!   extractor aggregates and per-row callbacks
//! - Generated key retrieval for single-row inserts
//!
//! # Type Decisions
//!
//! **Why closures instead of `RowMapper`/`ResultSetExtractor` traits?**
//! A closure bound (`FnMut(&Row, usize)`, `FnOnce(&mut Rows)`) accepts both
//! ad hoc lambdas and named `fn` items, and closure signatures are inferred
//! reliably only against `Fn*` bounds.
//!
//! **Why is `Session` object-safe?**
//! The backend is chosen at runtime from configuration, so the CLI holds a
//! `Box<dyn Session>`. Cursors are therefore handed to a consumer callback
//! instead of being returned, which keeps their borrow of the connection
//! scoped to the call.

mod config;
mod error;
mod executor;
mod keys;
mod postgres;
mod row;
pub(crate) mod session;
mod sqlite;
mod value;

pub use config::DatabaseConfig;
pub use error::{Result, SqlError};
pub use executor::{RowCounter, SqlExecutor};
pub use keys::GeneratedKey;
pub use self::postgres::{PostgresConfig, PostgresSession};
pub use row::{ColumnMap, Columns, Row};
pub use session::{Cursor, CursorConsumer, Dialect, Rows, Session};
pub use sqlite::SqliteSession;
pub use value::{FromValue, Value};
