//! Output formatting for exec command results.

use super::execute::ExecResult;
use crate::output::Outputable;

impl Outputable for ExecResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        if let Some(affected) = self.affected {
            lines.push(format!("{affected} row(s) affected"));
        }

        if let Some(key) = &self.generated_key {
            lines.push("Generated key:".to_string());
            for (column, value) in key.values().iter() {
                lines.push(format!("  {column} = {value}"));
            }
        }

        lines.join("\n")
    }
}
