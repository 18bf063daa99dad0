//! Owner and pet domain service.
//!
//! Implements [`OwnerOperations`] on top of the owner and pet repositories and
//! translates persistence failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    OwnerOperations, OwnerRepository, OwnerRepositoryError, PetRepository, PetRepositoryError,
};
use crate::domain::{Error, NewOwner, Owner, Pet, PetHealth};

/// Owner service implementing the driving port.
#[derive(Clone)]
pub struct OwnerService<O, P> {
    owner_repo: Arc<O>,
    pet_repo: Arc<P>,
}

impl<O, P> OwnerService<O, P> {
    /// Create a new service with the given repositories.
    pub fn new(owner_repo: Arc<O>, pet_repo: Arc<P>) -> Self {
        Self {
            owner_repo,
            pet_repo,
        }
    }
}

impl<O, P> OwnerService<O, P>
where
    O: OwnerRepository,
    P: PetRepository,
{
    fn map_owner_error(error: OwnerRepositoryError) -> Error {
        match error {
            OwnerRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("owner repository unavailable: {message}"))
            }
            OwnerRepositoryError::Query { message } => {
                Error::internal(format!("owner repository error: {message}"))
            }
            OwnerRepositoryError::DuplicateName { name } => {
                Error::conflict(format!("owner already exists: {name}"))
            }
        }
    }

    fn map_pet_error(error: PetRepositoryError) -> Error {
        match error {
            PetRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("pet repository unavailable: {message}"))
            }
            PetRepositoryError::Query { message } => {
                Error::internal(format!("pet repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<O, P> OwnerOperations for OwnerService<O, P>
where
    O: OwnerRepository,
    P: PetRepository,
{
    async fn list_owners(&self) -> Result<Vec<Owner>, Error> {
        self.owner_repo
            .list_owners()
            .await
            .map_err(Self::map_owner_error)
    }

    async fn add_owner(&self, owner: NewOwner) -> Result<Owner, Error> {
        self.owner_repo
            .insert_owner(owner)
            .await
            .map_err(Self::map_owner_error)
    }

    async fn get_pet(&self, owner_name: &str, pet_name: &str) -> Result<Pet, Error> {
        self.pet_repo
            .find_by_owner_and_pet_name(owner_name, pet_name)
            .await
            .map_err(Self::map_pet_error)?
            .ok_or_else(|| Error::not_found(format!("pet {pet_name} not found for owner {owner_name}")))
    }

    async fn get_pets(&self, owner_name: &str) -> Result<Vec<Pet>, Error> {
        self.pet_repo
            .find_by_owner_name(owner_name)
            .await
            .map_err(Self::map_pet_error)
    }

    async fn get_pets_with_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, Error> {
        self.pet_repo
            .find_by_owner_and_health(owner_name, health)
            .await
            .map_err(Self::map_pet_error)
    }
}
