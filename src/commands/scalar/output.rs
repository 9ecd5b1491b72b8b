//! Output formatting for scalar command results.

use super::execute::ScalarResult;
use crate::output::Outputable;

impl Outputable for ScalarResult {
    fn to_table(&self) -> String {
        self.value.to_string()
    }
}
