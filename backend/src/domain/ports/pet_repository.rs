//! Port abstraction for pet persistence adapters and their errors.
//!
//! Reads return pets joined with their owner. Collection reads yield an empty
//! vector when nothing matches; single lookups yield `None`.

use async_trait::async_trait;

use crate::domain::{NewPet, Pet, PetHealth, PetId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
    }
}

/// Store of pet records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Persist pets in order and return them with their owners attached.
    async fn insert_pets(&self, pets: Vec<NewPet>) -> Result<Vec<Pet>, PetRepositoryError>;

    /// Pets belonging to the owner called `owner_name`.
    async fn find_by_owner_name(&self, owner_name: &str) -> Result<Vec<Pet>, PetRepositoryError>;

    /// The pet called `pet_name` belonging to `owner_name`, if any.
    async fn find_by_owner_and_pet_name(
        &self,
        owner_name: &str,
        pet_name: &str,
    ) -> Result<Option<Pet>, PetRepositoryError>;

    /// Pets of `owner_name` whose health equals `health`.
    async fn find_by_owner_and_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, PetRepositoryError>;

    /// Whether any stored pet has the given health.
    async fn exists_with_health(&self, health: PetHealth) -> Result<bool, PetRepositoryError>;

    /// Set the health of pet `id`. Returns `false` when no such pet exists.
    async fn update_health(&self, id: PetId, health: PetHealth)
    -> Result<bool, PetRepositoryError>;
}
