//! Port abstraction for owner persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewOwner, Owner};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by owner repository adapters.
    pub enum OwnerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "owner repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "owner repository query failed: {message}",
        /// Another owner already uses the requested name.
        DuplicateName { name: String } => "owner name already exists: {name}",
    }
}

/// Store of owner records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Persist a new owner and return it with its assigned identifier.
    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, OwnerRepositoryError>;

    /// Every owner, ordered by ascending identifier.
    async fn list_owners(&self) -> Result<Vec<Owner>, OwnerRepositoryError>;

    /// Number of stored owners.
    async fn count_owners(&self) -> Result<u64, OwnerRepositoryError>;
}
