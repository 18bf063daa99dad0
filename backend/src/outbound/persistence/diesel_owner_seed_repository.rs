//! PostgreSQL-backed owner seeding adapter.
//!
//! Counts owners and inserts the configured owners and pets inside one
//! transaction so a failed seed leaves the store untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::PetHealth;
use crate::domain::ports::{
    OwnerSeedRepository, OwnerSeedRepositoryError, OwnerSeedRequest, SeedingResult,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOwnerRow, NewPetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{owners, pets};

/// Diesel-backed implementation of the owner seeding repository.
#[derive(Clone)]
pub struct DieselOwnerSeedRepository {
    pool: DbPool,
}

impl DieselOwnerSeedRepository {
    /// Create a seeding repository over the given pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pets_api::outbound::persistence::{DbPool, DieselOwnerSeedRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/pets")).await?;
    /// let repository = DieselOwnerSeedRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OwnerSeedRepositoryError {
    map_basic_pool_error(error, OwnerSeedRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OwnerSeedRepositoryError {
    map_basic_diesel_error(
        error,
        OwnerSeedRepositoryError::query,
        OwnerSeedRepositoryError::connection,
    )
}

#[async_trait]
impl OwnerSeedRepository for DieselOwnerSeedRepository {
    async fn seed_owners(
        &self,
        request: OwnerSeedRequest,
    ) -> Result<SeedingResult, OwnerSeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let existing = owners::table.count().get_result::<i64>(conn).await?;
                if existing > 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                for seed in &request.owners {
                    let owner_id = diesel::insert_into(owners::table)
                        .values(NewOwnerRow::from(&seed.owner))
                        .returning(owners::id)
                        .get_result::<i64>(conn)
                        .await?;

                    if seed.pets.is_empty() {
                        continue;
                    }
                    let pet_rows: Vec<NewPetRow<'_>> = seed
                        .pets
                        .iter()
                        .map(|name| NewPetRow {
                            name: name.as_str(),
                            owner_id,
                            health: PetHealth::default().as_str(),
                        })
                        .collect();
                    diesel::insert_into(pets::table)
                        .values(&pet_rows)
                        .execute(conn)
                        .await?;
                }

                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
