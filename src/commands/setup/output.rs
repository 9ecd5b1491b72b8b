//! Output formatting for setup command results.

use super::execute::SetupResult;
use crate::output::{Outputable, render_grid};

impl Outputable for SetupResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Pet clinic setup ({})", self.dialect));
        lines.push(String::new());

        let headers = vec!["table".to_string(), "rows".to_string()];
        let rows: Vec<Vec<String>> = self
            .tables
            .iter()
            .map(|t| vec![t.name.clone(), t.rows.to_string()])
            .collect();
        lines.push(render_grid(&headers, &rows));
        lines.push(String::new());

        if self.seeded {
            lines.push("Schema recreated and seed data loaded.".to_string());
        } else {
            lines.push("Schema recreated without seed data.".to_string());
        }

        lines.join("\n")
    }
}
