use std::error::Error;

use serde::Serialize;

use super::SetupCmd;
use crate::commands::Execute;
use crate::db::SqlExecutor;
use crate::petclinic;

/// Row count of one fixture table after the reset
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub name: String,
    pub rows: i64,
}

/// Result of the setup command execution
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub dialect: String,
    pub seeded: bool,
    pub tables: Vec<TableStatus>,
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        let seeded = !self.no_seed;
        petclinic::reset(executor, seeded)?;

        let tables = petclinic::table_counts(executor)?
            .into_iter()
            .map(|(name, rows)| TableStatus { name, rows })
            .collect();

        Ok(SetupResult {
            dialect: executor.dialect().to_string(),
            seeded,
            tables,
        })
    }
}
