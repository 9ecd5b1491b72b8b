//! Error taxonomy for statement execution and result mapping.

use thiserror::Error;

/// Result alias used throughout the database layer.
pub type Result<T, E = SqlError> = std::result::Result<T, E>;

/// Errors surfaced by sessions and the executor.
///
/// Every failure reaches the immediate caller; nothing is retried or swallowed.
#[derive(Error, Debug)]
pub enum SqlError {
    /// Malformed SQL, or parameters that do not match the placeholders.
    /// Always raised before any row is fetched.
    #[error("Invalid statement: {message}")]
    Statement { message: String },

    /// A single-row (or single-column) operation saw a different count.
    #[error("Incorrect result size: expected {expected} {what}, got {actual}")]
    IncorrectResultSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A cell could not be coerced to the requested Rust type.
    #[error("Cannot convert {value} to {target}")]
    TypeConversion { value: String, target: &'static str },

    /// A uniqueness, foreign key, not-null or check constraint was violated.
    #[error("Integrity constraint violated: {message}")]
    Integrity { message: String },

    /// The session can no longer talk to the database.
    #[error("Connection lost: {message}")]
    ConnectionLost { message: String },

    /// The session or statement shape cannot provide the requested capability.
    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    /// Lookup of a column that the result set does not have.
    #[error("Missing column '{name}' in query result")]
    ColumnNotFound { name: String },

    /// Any other driver failure.
    #[error("Database error: {message}")]
    Driver { message: String },
}

impl SqlError {
    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    pub fn incorrect_rows(expected: usize, actual: usize) -> Self {
        Self::IncorrectResultSize {
            what: "row(s)",
            expected,
            actual,
        }
    }

    pub fn incorrect_columns(expected: usize, actual: usize) -> Self {
        Self::IncorrectResultSize {
            what: "column(s)",
            expected,
            actual,
        }
    }

    /// Fail fast when the bound parameters do not line up with the placeholders.
    pub fn check_param_count(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::statement(format!(
                "statement has {expected} placeholder(s) but {actual} parameter(s) were given"
            )))
        }
    }
}
