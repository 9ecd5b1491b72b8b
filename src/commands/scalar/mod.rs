mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, parse_param};
use crate::db::{SqlExecutor, Value};
use crate::output::{OutputFormat, Outputable};

/// Run a query that returns exactly one value
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template scalar 'SELECT COUNT(*) FROM types'
  sql_template scalar 'SELECT first_name FROM owners WHERE id = ?' -p 1

Fails unless the query yields exactly one row with exactly one column.")]
pub struct ScalarCmd {
    /// SQL text with positional placeholders
    pub sql: String,

    /// Positional parameter, repeat once per placeholder
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<Value>,
}

impl CommandRunner for ScalarCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
