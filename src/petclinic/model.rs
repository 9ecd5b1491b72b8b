//! Pet clinic domain objects.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Owner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl Owner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    /// ISO `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub type_id: i64,
    pub owner_id: Option<i64>,
}

/// A vet together with the names of their specialties, in specialty id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VetSpecs {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<String>,
}
