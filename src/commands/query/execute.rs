use std::error::Error;

use serde::Serialize;

use super::QueryCmd;
use crate::commands::Execute;
use crate::db::{ColumnMap, Row, SqlExecutor};

/// Result of the query command execution
#[derive(Debug, Default, Serialize)]
pub struct QueryResult {
    pub sql: String,
    pub columns: Vec<String>,
    pub rows: Vec<ColumnMap>,
}

impl Execute for QueryCmd {
    type Output = QueryResult;

    fn execute(self, executor: &mut SqlExecutor) -> Result<Self::Output, Box<dyn Error>> {
        // The extractor sees the column list even when no row comes back.
        let (columns, rows) = executor.query_with_extractor(&self.sql, &self.params, |rows| {
            let columns = rows.columns().names().to_vec();
            let maps = rows.map(|row| row.map(Row::into_map)).collect::<Result<Vec<_>, _>>()?;
            Ok((columns, maps))
        })?;

        Ok(QueryResult {
            sql: self.sql,
            columns,
            rows,
        })
    }
}
