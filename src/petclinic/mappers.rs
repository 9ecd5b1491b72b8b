//! Row mappers and result extractors for the pet clinic tables.
//!
//! Mappers have the `(row, index)` shape expected by
//! [`SqlExecutor::query_one`](crate::db::SqlExecutor::query_one) and
//! [`SqlExecutor::query_many`](crate::db::SqlExecutor::query_many); the
//! extractor consumes a whole result set.

use crate::db::{Result, Row, Rows};

use super::model::{Owner, Pet, PetType, VetSpecs};

pub fn map_owner(row: &Row, _index: usize) -> Result<Owner> {
    Ok(Owner {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        address: row.get("address")?,
        city: row.get("city")?,
        telephone: row.get("telephone")?,
    })
}

pub fn map_pet_type(row: &Row, _index: usize) -> Result<PetType> {
    Ok(PetType {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

pub fn map_pet(row: &Row, _index: usize) -> Result<Pet> {
    Ok(Pet {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
        type_id: row.get("type_id")?,
        owner_id: row.get("owner_id")?,
    })
}

/// Fold the rows of a vet/specialty join into one [`VetSpecs`].
///
/// Expects `id`, `first_name`, `last_name` and a nullable `specialty` column,
/// one row per specialty. Returns `None` when the vet does not exist.
pub fn extract_vet_specs(rows: &mut Rows<'_>) -> Result<Option<VetSpecs>> {
    let mut specs: Option<VetSpecs> = None;
    for row in rows {
        let row = row?;
        if specs.is_none() {
            specs = Some(VetSpecs {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                specialties: Vec::new(),
            });
        }
        if let (Some(vet), Some(specialty)) = (specs.as_mut(), row.get::<Option<String>>("specialty")?) {
            vet.specialties.push(specialty);
        }
    }
    Ok(specs)
}
