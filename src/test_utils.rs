//! Shared test utilities for execute and output tests.
//!
//! Every fixture builds a fresh in-memory database, so tests never observe
//! each other's writes.

use rstest::fixture;

use crate::db::{DatabaseConfig, SqlExecutor};
use crate::petclinic;

/// Open a fresh in-memory SQLite executor, optionally seeded.
pub fn clinic_executor(seed: bool) -> SqlExecutor {
    let session = DatabaseConfig::Memory
        .connect()
        .expect("Failed to open in-memory database");
    let mut executor = SqlExecutor::new(session);
    petclinic::reset(&mut executor, seed).expect("Pet clinic reset should succeed");
    executor
}

/// In-memory pet clinic with the seed data loaded.
#[fixture]
pub fn clinic() -> SqlExecutor {
    clinic_executor(true)
}

/// In-memory pet clinic with empty tables.
#[fixture]
pub fn empty_clinic() -> SqlExecutor {
    clinic_executor(false)
}
