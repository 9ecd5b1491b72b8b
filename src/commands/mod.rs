//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` implementation producing a serializable result
//! - An `Outputable` implementation for table output

mod exec;
mod owners;
mod query;
mod scalar;
mod setup;
mod vet;

pub use exec::ExecCmd;
pub use owners::OwnersCmd;
pub use query::QueryCmd;
pub use scalar::ScalarCmd;
pub use setup::SetupCmd;
pub use vet::VetCmd;

use clap::Subcommand;
use std::error::Error;

use crate::db::{SqlExecutor, Value};
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drop, recreate and seed the pet clinic tables
    Setup(SetupCmd),

    /// Run a query and print every row
    Query(QueryCmd),

    /// Run a query that returns exactly one value
    Scalar(ScalarCmd),

    /// Run an insert, update or delete
    Exec(ExecCmd),

    /// List owners through the owner row mapper
    Owners(OwnersCmd),

    /// Show a vet and their specialties
    Vet(VetCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Setup(cmd) => cmd.run(executor, format),
            Command::Query(cmd) => cmd.run(executor, format),
            Command::Scalar(cmd) => cmd.run(executor, format),
            Command::Exec(cmd) => cmd.run(executor, format),
            Command::Owners(cmd) => cmd.run(executor, format),
            Command::Vet(cmd) => cmd.run(executor, format),
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().cloned().unwrap_or_default()).into())
            }
        }
    }
}

/// Execute a command and format its result.
pub trait CommandRunner {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

/// Parse a positional statement parameter from the command line.
///
/// Integers and floats become numbers, `null`, `true` and `false` their
/// literal values, and anything else is bound as text. Quote a value with
/// single quotes to force text (`'42'`).
pub fn parse_param(raw: &str) -> Result<Value, String> {
    if let Some(text) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return Ok(Value::Text(text.to_string()));
    }
    if raw.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }
    match raw {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(Value::Integer(int));
    }
    if let Ok(real) = raw.parse::<f64>() {
        if real.is_finite() {
            return Ok(Value::Real(real));
        }
    }
    Ok(Value::Text(raw.to_string()))
}
