use std::error::Error;

use serde::Serialize;

use super::OwnersCmd;
use crate::commands::Execute;
use crate::db::SqlExecutor;
use crate::petclinic::{self, Owner};

/// Result of the owners command execution
#[derive(Debug, Default, Serialize)]
pub struct OwnersResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_id: Option<i64>,
    pub owners: Vec<Owner>,
}

impl Execute for OwnersCmd {
    type Output = OwnersResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        let owners = petclinic::find_owners(executor, self.min_id)?;
        Ok(OwnersResult {
            min_id: self.min_id,
            owners,
        })
    }
}
