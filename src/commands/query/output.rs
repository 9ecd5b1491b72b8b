//! Output formatting for query command results.

use super::execute::QueryResult;
use crate::output::{Outputable, render_grid};

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.sql));
        lines.push(String::new());

        if self.rows.is_empty() {
            lines.push("No rows returned.".to_string());
            return lines.join("\n");
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|(_, value)| value.to_string()).collect())
            .collect();
        lines.push(render_grid(&self.columns, &cells));
        lines.push(String::new());
        lines.push(format!("{} row(s)", self.rows.len()));

        lines.join("\n")
    }
}
