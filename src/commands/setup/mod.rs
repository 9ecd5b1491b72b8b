mod execute;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::db::SqlExecutor;
use crate::output::{OutputFormat, Outputable};

/// Drop, recreate and seed the pet clinic tables
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_template setup                              # Reset ./petclinic.sqlite with seed data
  sql_template setup --no-seed                    # Empty tables only
  sql_template --db postgres://vet@localhost/clinic setup")]
pub struct SetupCmd {
    /// Create the tables without loading the seed data
    #[arg(long, default_value_t = false)]
    pub no_seed: bool,
}

impl CommandRunner for SetupCmd {
    fn run(self, executor: &mut SqlExecutor, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(executor)?;
        Ok(result.format(format))
    }
}
