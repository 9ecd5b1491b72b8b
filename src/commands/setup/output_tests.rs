//! Output formatting tests for setup command.

#[cfg(test)]
mod tests {
    use super::super::execute::{SetupResult, TableStatus};
    use rstest::{fixture, rstest};

    const SEEDED_TABLE: &str = "\
Pet clinic setup (sqlite)

table   rows
------  ----
types   6
owners  10

Schema recreated and seed data loaded.";

    #[fixture]
    fn seeded_result() -> SetupResult {
        SetupResult {
            dialect: "sqlite".to_string(),
            seeded: true,
            tables: vec![
                TableStatus { name: "types".to_string(), rows: 6 },
                TableStatus { name: "owners".to_string(), rows: 10 },
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_seeded,
        fixture: seeded_result,
        fixture_type: SetupResult,
        expected: SEEDED_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: seeded_result,
        fixture_type: SetupResult,
        assertions: {
            "dialect": "sqlite",
            "seeded": true,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: seeded_result,
        fixture_type: SetupResult,
        contains: ["dialect: sqlite", "owners"],
    }
}
