//! Pet clinic sample schema, seed data and queries.
//!
//! The fixture is the classic veterinary clinic data set: six pet types, ten
//! owners, thirteen pets, six vets with their specialties and four visits.
//! [`reset`] drops and recreates every table, so each caller starts from the
//! same known state.
//!
//! Shared queries use `$N` placeholders, which both SQLite and PostgreSQL
//! bind positionally.

mod mappers;
mod model;

use tracing::info;

use crate::db::{Dialect, Result, Session, SqlExecutor};

pub use mappers::{extract_vet_specs, map_owner, map_pet, map_pet_type};
pub use model::{Owner, Pet, PetType, VetSpecs};

const SCHEMA_SQLITE: &str = include_str!("schema_sqlite.sql");
const SCHEMA_POSTGRES: &str = include_str!("schema_postgres.sql");
const SEED: &str = include_str!("seed.sql");
const SEQUENCES_POSTGRES: &str = include_str!("sequences_postgres.sql");

/// Fixture tables, in creation order.
pub const TABLES: &[&str] = &[
    "vets",
    "specialties",
    "vet_specialties",
    "types",
    "owners",
    "pets",
    "visits",
];

pub const ALL_OWNERS: &str =
    "SELECT id, first_name, last_name, address, city, telephone FROM owners ORDER BY id";

pub const OWNERS_FROM_ID: &str = "SELECT id, first_name, last_name, address, city, telephone \
     FROM owners WHERE id >= $1 ORDER BY id";

pub const PETS_OF_OWNER: &str =
    "SELECT id, name, birth_date, type_id, owner_id FROM pets WHERE owner_id = $1 ORDER BY id";

pub const VET_SPECIALTIES: &str = "SELECT v.id, v.first_name, v.last_name, s.name AS specialty \
     FROM vets v \
     LEFT JOIN vet_specialties vs ON vs.vet_id = v.id \
     LEFT JOIN specialties s ON s.id = vs.specialty_id \
     WHERE v.id = $1 \
     ORDER BY s.id";

/// Drop and recreate the pet clinic tables, optionally loading the seed data.
pub fn reset<S: Session>(executor: &mut SqlExecutor<S>, seed: bool) -> Result<()> {
    let dialect = executor.dialect();
    info!(%dialect, seed, "resetting pet clinic schema");

    let schema = match dialect {
        Dialect::Sqlite => SCHEMA_SQLITE,
        Dialect::Postgres => SCHEMA_POSTGRES,
    };
    executor.run_script(schema)?;

    if seed {
        executor.run_script(SEED)?;
        if dialect == Dialect::Postgres {
            // Explicit ids in the seed leave the SERIAL sequences behind.
            executor.run_script(SEQUENCES_POSTGRES)?;
        }
        info!(tables = TABLES.len(), "pet clinic seed data loaded");
    }
    Ok(())
}

/// Row count of every fixture table, in [`TABLES`] order.
pub fn table_counts<S: Session>(executor: &mut SqlExecutor<S>) -> Result<Vec<(String, i64)>> {
    TABLES
        .iter()
        .map(|table| -> Result<(String, i64)> {
            let count = executor.query_scalar(&format!("SELECT COUNT(*) FROM {table}"), &[])?;
            Ok((table.to_string(), count))
        })
        .collect()
}

/// Owners ordered by id, optionally starting at `min_id`.
pub fn find_owners<S: Session>(executor: &mut SqlExecutor<S>, min_id: Option<i64>) -> Result<Vec<Owner>> {
    match min_id {
        Some(id) => executor.query_many(OWNERS_FROM_ID, &[id.into()], map_owner),
        None => executor.query_many(ALL_OWNERS, &[], map_owner),
    }
}

pub fn find_pets_of_owner<S: Session>(executor: &mut SqlExecutor<S>, owner_id: i64) -> Result<Vec<Pet>> {
    executor.query_many(PETS_OF_OWNER, &[owner_id.into()], map_pet)
}

pub fn find_vet_specs<S: Session>(executor: &mut SqlExecutor<S>, vet_id: i64) -> Result<Option<VetSpecs>> {
    executor.query_with_extractor(VET_SPECIALTIES, &[vet_id.into()], extract_vet_specs)
}
