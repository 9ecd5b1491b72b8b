//! Output formatting for owners command results.

use super::execute::OwnersResult;
use crate::output::{Outputable, render_grid};

impl Outputable for OwnersResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match self.min_id {
            Some(id) => lines.push(format!("Owners (id >= {id})")),
            None => lines.push("Owners".to_string()),
        }
        lines.push(String::new());

        if self.owners.is_empty() {
            lines.push("No owners found.".to_string());
            return lines.join("\n");
        }

        let headers: Vec<String> = ["id", "name", "address", "city", "telephone"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows: Vec<Vec<String>> = self
            .owners
            .iter()
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.full_name(),
                    o.address.clone(),
                    o.city.clone(),
                    o.telephone.clone(),
                ]
            })
            .collect();
        lines.push(render_grid(&headers, &rows));
        lines.push(String::new());
        lines.push(format!("Found {} owner(s)", self.owners.len()));

        lines.join("\n")
    }
}
