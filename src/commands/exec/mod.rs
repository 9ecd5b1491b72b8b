mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, parse_param};
use crate::db::{SqlExecutor, Value};
use crate::output::{OutputFormat, Outputable};

/// Run an insert, update or delete
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template exec 'UPDATE types SET name = ? WHERE id = ?' -p elephant -p 6
  sql_template exec 'INSERT INTO types (name) VALUES (?)' -p elephant --returning id
  sql_template exec 'INSERT INTO types (name) VALUES (?)' -p elephant --generated-key

--returning names the generated columns to report. --generated-key alone
reports the implicit rowid on SQLite and is rejected by PostgreSQL.")]
pub struct ExecCmd {
    /// SQL text with positional placeholders
    pub sql: String,

    /// Positional parameter, repeat once per placeholder
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<Value>,

    /// Generated column to report for a single-row insert (repeatable)
    #[arg(short, long = "returning", value_name = "COLUMN")]
    pub returning: Vec<String>,

    /// Report the generated key of a single-row insert
    #[arg(short, long, default_value_t = false)]
    pub generated_key: bool,
}

impl ExecCmd {
    fn wants_key(&self) -> bool {
        self.generated_key || !self.returning.is_empty()
    }
}

impl CommandRunner for ExecCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
