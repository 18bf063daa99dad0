//! Port abstraction for seeding owners and their pets.
//!
//! Adapters must perform the emptiness check and every insert inside one
//! transaction so a failed seed leaves the store untouched.

use async_trait::async_trait;

use crate::domain::{NewOwner, PetName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by owner seed repository adapters.
    pub enum OwnerSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "owner seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "owner seeding query failed: {message}",
    }
}

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The store was empty and the owners were inserted.
    Applied,
    /// The store already held owners; nothing was written.
    AlreadySeeded,
}

/// One owner to seed together with the names of its pets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSeed {
    /// Validated owner data.
    pub owner: NewOwner,
    /// Validated names of the owner's pets, inserted with default health.
    pub pets: Vec<PetName>,
}

/// Request payload for a seeding run. Owners are inserted in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerSeedRequest {
    /// Owners to insert.
    pub owners: Vec<OwnerSeed>,
}

impl OwnerSeedRequest {
    /// Total number of pets across every owner.
    #[must_use]
    pub fn pet_count(&self) -> usize {
        self.owners.iter().map(|seed| seed.pets.len()).sum()
    }
}

/// Port for seeding an empty store in a single transaction.
///
/// Implementations must:
/// - Count owners and return `AlreadySeeded` without writing when non-zero.
/// - Insert each owner, then its pets, in request order.
/// - Roll back all changes if any step fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerSeedRepository: Send + Sync {
    /// Apply the seed request when the store has no owners.
    async fn seed_owners(
        &self,
        request: OwnerSeedRequest,
    ) -> Result<SeedingResult, OwnerSeedRepositoryError>;
}
