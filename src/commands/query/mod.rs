mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute, parse_param};
use crate::db::{SqlExecutor, Value};
use crate::output::{OutputFormat, Outputable};

/// Run a query and print every row
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template query 'SELECT * FROM types'
  sql_template query 'SELECT * FROM pets WHERE owner_id = $1' -p 3
  sql_template query 'SELECT * FROM owners WHERE city = ? AND id > ?' -p Madison -p 2 --format json")]
pub struct QueryCmd {
    /// SQL text with positional placeholders
    pub sql: String,

    /// Positional parameter, repeat once per placeholder
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<Value>,
}

impl CommandRunner for QueryCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
