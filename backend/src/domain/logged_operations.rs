//! Call logging decorator for [`OwnerOperations`].
//!
//! Every call emits a trace-level `executing` event followed by either
//! `completed` with a short result summary or `failed` with the error.

use std::fmt::Display;

use async_trait::async_trait;
use tracing::trace;

use crate::domain::ports::OwnerOperations;
use crate::domain::{Error, NewOwner, Owner, Pet, PetHealth};

/// Wraps an [`OwnerOperations`] implementation with call tracing.
#[derive(Debug, Clone)]
pub struct LoggedOwnerOperations<T> {
    inner: T,
}

impl<T> LoggedOwnerOperations<T> {
    /// Decorate `inner`.
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the decorated implementation.
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

fn record<V>(
    operation: &'static str,
    result: Result<V, Error>,
    summary: impl FnOnce(&V) -> String,
) -> Result<V, Error> {
    match &result {
        Ok(value) => trace!(operation, result = %summary(value), "completed"),
        Err(err) => trace!(operation, code = ?err.code(), error = %err, "failed"),
    }
    result
}

fn count<V>(items: &[V]) -> String {
    format!("{} item(s)", items.len())
}

fn named(entity: &'static str, id: impl Display, name: &str) -> String {
    format!("{entity} {id} ({name})")
}

#[async_trait]
impl<T> OwnerOperations for LoggedOwnerOperations<T>
where
    T: OwnerOperations,
{
    async fn list_owners(&self) -> Result<Vec<Owner>, Error> {
        trace!(operation = "list_owners", "executing");
        record("list_owners", self.inner.list_owners().await, |owners| {
            count(owners)
        })
    }

    async fn add_owner(&self, owner: NewOwner) -> Result<Owner, Error> {
        trace!(
            operation = "add_owner",
            name = owner.name(),
            age = owner.age(),
            "executing"
        );
        record("add_owner", self.inner.add_owner(owner).await, |stored| {
            named("owner", stored.id(), stored.name())
        })
    }

    async fn get_pet(&self, owner_name: &str, pet_name: &str) -> Result<Pet, Error> {
        trace!(operation = "get_pet", owner_name, pet_name, "executing");
        record(
            "get_pet",
            self.inner.get_pet(owner_name, pet_name).await,
            |pet| named("pet", pet.id(), pet.name()),
        )
    }

    async fn get_pets(&self, owner_name: &str) -> Result<Vec<Pet>, Error> {
        trace!(operation = "get_pets", owner_name, "executing");
        record("get_pets", self.inner.get_pets(owner_name).await, |pets| {
            count(pets)
        })
    }

    async fn get_pets_with_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, Error> {
        trace!(
            operation = "get_pets_with_health",
            owner_name,
            health = %health,
            "executing"
        );
        record(
            "get_pets_with_health",
            self.inner.get_pets_with_health(owner_name, health).await,
            |pets| count(pets),
        )
    }
}
