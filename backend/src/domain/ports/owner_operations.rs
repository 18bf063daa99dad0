//! Driving port for owner and pet use cases.
//!
//! Inbound adapters call this port without touching persistence. The
//! production implementation is [`crate::domain::OwnerService`]; tests can
//! substitute the generated mock.

use async_trait::async_trait;

use crate::domain::{Error, NewOwner, Owner, Pet, PetHealth};

/// Use cases exposed by the owners API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerOperations: Send + Sync {
    /// Every owner in store order.
    async fn list_owners(&self) -> Result<Vec<Owner>, Error>;

    /// Persist a validated owner and return the stored record.
    async fn add_owner(&self, owner: NewOwner) -> Result<Owner, Error>;

    /// A single pet, or a `not_found` error.
    async fn get_pet(&self, owner_name: &str, pet_name: &str) -> Result<Pet, Error>;

    /// All pets of an owner; empty when the owner is unknown.
    async fn get_pets(&self, owner_name: &str) -> Result<Vec<Pet>, Error>;

    /// Pets of an owner filtered by health.
    async fn get_pets_with_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, Error>;
}
