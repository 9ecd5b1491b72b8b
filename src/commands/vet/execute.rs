use std::error::Error;

use serde::Serialize;

use super::VetCmd;
use crate::commands::Execute;
use crate::db::SqlExecutor;
use crate::petclinic::{self, VetSpecs};

/// Result of the vet command execution
#[derive(Debug, Serialize)]
pub struct VetResult {
    pub id: i64,
    pub vet: Option<VetSpecs>,
}

impl Execute for VetCmd {
    type Output = VetResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        let vet = petclinic::find_vet_specs(executor, self.id)?;
        Ok(VetResult { id: self.id, vet })
    }
}
