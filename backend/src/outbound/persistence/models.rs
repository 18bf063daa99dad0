//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain values
//! re-validate every field.

use diesel::prelude::*;

use crate::domain::{
    NewOwner, Owner, OwnerId, OwnerValidationError, Pet, PetId, UnknownPetHealth,
};

use super::schema::{owners, pets};

/// Stored data that no longer satisfies domain invariants.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowMappingError {
    #[error("stored owner is invalid: {0}")]
    Owner(#[from] OwnerValidationError),
    #[error("stored pet is invalid: {0}")]
    Health(#[from] UnknownPetHealth),
}

/// Row struct for reading from the owners table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnerRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl TryFrom<OwnerRow> for Owner {
    type Error = RowMappingError;

    fn try_from(row: OwnerRow) -> Result<Self, Self::Error> {
        let owner = NewOwner::try_new(row.name, row.age)?;
        Ok(Self::new(OwnerId::new(row.id), owner))
    }
}

/// Insertable struct for creating owner records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = owners)]
pub(crate) struct NewOwnerRow<'a> {
    pub name: &'a str,
    pub age: i32,
}

impl<'a> From<&'a NewOwner> for NewOwnerRow<'a> {
    fn from(owner: &'a NewOwner) -> Self {
        Self {
            name: owner.name(),
            age: owner.age(),
        }
    }
}

/// Row struct for reading from the pets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub health: String,
}

impl PetRow {
    /// Combine with the already mapped owner row.
    pub(crate) fn into_pet(self, owner: Owner) -> Result<Pet, RowMappingError> {
        let health = self.health.parse()?;
        Ok(Pet::new(PetId::new(self.id), self.name, owner, health))
    }
}

/// Insertable struct for creating pet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub name: &'a str,
    pub owner_id: i64,
    pub health: &'a str,
}

/// Map a joined `(pet, owner)` row into a domain pet.
pub(crate) fn joined_into_pet((pet, owner): (PetRow, OwnerRow)) -> Result<Pet, RowMappingError> {
    let owner = Owner::try_from(owner)?;
    pet.into_pet(owner)
}
