//! Output formatting for vet command results.

use super::execute::VetResult;
use crate::output::Outputable;

impl Outputable for VetResult {
    fn to_table(&self) -> String {
        let Some(vet) = &self.vet else {
            return format!("No vet with id {}.", self.id);
        };

        let mut lines = vec![format!("Vet {}: {} {}", vet.id, vet.first_name, vet.last_name)];
        lines.push(String::new());
        if vet.specialties.is_empty() {
            lines.push("No specialties.".to_string());
        } else {
            lines.push(format!("Specialties ({}):", vet.specialties.len()));
            for specialty in &vet.specialties {
                lines.push(format!("  {specialty}"));
            }
        }
        lines.join("\n")
    }
}
