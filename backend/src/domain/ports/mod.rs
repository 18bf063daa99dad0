//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod health_indicator;
mod owner_operations;
mod owner_repository;
mod owner_seed_repository;
mod pet_repository;

#[cfg(test)]
pub use health_indicator::MockHealthIndicator;
pub use health_indicator::HealthIndicator;
#[cfg(test)]
pub use owner_operations::MockOwnerOperations;
pub use owner_operations::OwnerOperations;
#[cfg(test)]
pub use owner_repository::MockOwnerRepository;
pub use owner_repository::{OwnerRepository, OwnerRepositoryError};
#[cfg(test)]
pub use owner_seed_repository::MockOwnerSeedRepository;
pub use owner_seed_repository::{
    OwnerSeed, OwnerSeedRepository, OwnerSeedRepositoryError, OwnerSeedRequest, SeedingResult,
};
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{PetRepository, PetRepositoryError};
