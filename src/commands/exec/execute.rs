use std::error::Error;

use serde::Serialize;

use super::ExecCmd;
use crate::commands::Execute;
use crate::db::{GeneratedKey, SqlExecutor};

/// Result of the exec command execution
#[derive(Debug, Serialize)]
pub struct ExecResult {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_key: Option<GeneratedKey>,
}

impl Execute for ExecCmd {
    type Output = ExecResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        if self.wants_key() {
            let columns: Vec<&str> = self.returning.iter().map(String::as_str).collect();
            let key = executor.execute_returning_key(&self.sql, &self.params, &columns)?;
            return Ok(ExecResult {
                sql: self.sql,
                affected: Some(1),
                generated_key: Some(key),
            });
        }

        let affected = executor.execute(&self.sql, &self.params)?;
        Ok(ExecResult {
            sql: self.sql,
            affected: Some(affected),
            generated_key: None,
        })
    }
}
