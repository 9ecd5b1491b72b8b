mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::db::SqlExecutor;
use crate::output::{OutputFormat, Outputable};

/// Show a vet and their specialties
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template vet 3                   # Linda Douglas: surgery, dentistry
  sql_template vet 3 --format json")]
pub struct VetCmd {
    /// Vet id
    pub id: i64,
}

impl CommandRunner for VetCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
