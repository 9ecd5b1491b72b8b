use std::error::Error;

use serde::Serialize;

use super::ScalarCmd;
use crate::commands::Execute;
use crate::db::{SqlExecutor, Value};

/// Result of the scalar command execution
#[derive(Debug, Serialize)]
pub struct ScalarResult {
    pub sql: String,
    pub value: Value,
}

impl Execute for ScalarCmd {
    type Output = ScalarResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        let value = executor.query_scalar::<Value>(&self.sql, &self.params)?;
        Ok(ScalarResult { sql: self.sql, value })
    }
}
