//! Owner seeding orchestration.
//!
//! Validates configured owner definitions into domain values, then delegates
//! the transactional insert to the seeding repository port.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{
    OwnerSeed, OwnerSeedRepository, OwnerSeedRepositoryError, OwnerSeedRequest, SeedingResult,
};
use crate::domain::{NewOwner, OwnerValidationError, PetName, PetValidationError};

/// A configured owner as read from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerSeedDefinition {
    /// Owner name.
    pub name: String,
    /// Owner age in years.
    pub age: i32,
    /// Names of the owner's pets.
    #[serde(default)]
    pub pets: Vec<String>,
}

/// Result of attempting to seed owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerSeedOutcome {
    /// Number of configured owners.
    pub owner_count: usize,
    /// Number of configured pets across all owners.
    pub pet_count: usize,
    /// Persistence outcome.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying owner seeds.
#[derive(Debug, Error)]
pub enum OwnerSeedingError {
    /// A configured owner failed validation.
    #[error("seed owner {name:?} is invalid: {field}: {source}")]
    InvalidOwner {
        /// Configured owner name.
        name: String,
        /// Offending field.
        field: &'static str,
        /// Underlying violation.
        #[source]
        source: OwnerValidationError,
    },
    /// A configured pet failed validation.
    #[error("seed pet of owner {owner:?} is invalid: {field}: {source}")]
    InvalidPet {
        /// Configured owner name.
        owner: String,
        /// Offending field.
        field: &'static str,
        /// Underlying violation.
        #[source]
        source: PetValidationError,
    },
    /// Persistence adapter failed while seeding.
    #[error("owner seed persistence error: {0}")]
    Persistence(#[from] OwnerSeedRepositoryError),
}

/// Service that seeds an empty store with configured owners.
#[derive(Clone)]
pub struct OwnerSeeder<R> {
    repository: Arc<R>,
}

impl<R> OwnerSeeder<R> {
    /// Create a new seeder with the given persistence adapter.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> OwnerSeeder<R>
where
    R: OwnerSeedRepository,
{
    /// Seed the given owners when the store is empty.
    ///
    /// Every definition is validated before the repository is called, so an
    /// invalid entry performs no writes.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerSeedingError`] if validation or persistence fails.
    pub async fn seed(
        &self,
        definitions: &[OwnerSeedDefinition],
    ) -> Result<OwnerSeedOutcome, OwnerSeedingError> {
        let owners = definitions
            .iter()
            .map(convert_definition)
            .collect::<Result<Vec<_>, _>>()?;
        let request = OwnerSeedRequest { owners };
        let owner_count = request.owners.len();
        let pet_count = request.pet_count();

        let result = self.repository.seed_owners(request).await?;

        Ok(OwnerSeedOutcome {
            owner_count,
            pet_count,
            result,
        })
    }
}

fn convert_definition(definition: &OwnerSeedDefinition) -> Result<OwnerSeed, OwnerSeedingError> {
    let owner = NewOwner::try_new(definition.name.clone(), definition.age).map_err(|source| {
        OwnerSeedingError::InvalidOwner {
            name: definition.name.clone(),
            field: source.field(),
            source,
        }
    })?;
    let pets = definition
        .pets
        .iter()
        .map(|pet| {
            PetName::try_new(pet.clone()).map_err(|source| OwnerSeedingError::InvalidPet {
                owner: definition.name.clone(),
                field: source.field(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OwnerSeed { owner, pets })
}
