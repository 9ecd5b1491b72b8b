mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::db::SqlExecutor;
use crate::output::{OutputFormat, Outputable};

/// List owners through the owner row mapper
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template owners                  # Every owner, ordered by id
  sql_template owners --min-id 9       # Owners with id >= 9")]
pub struct OwnersCmd {
    /// Only owners whose id is at least this value
    #[arg(short, long)]
    pub min_id: Option<i64>,
}

impl CommandRunner for OwnersCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
