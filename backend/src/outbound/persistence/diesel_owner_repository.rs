//! PostgreSQL-backed `OwnerRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OwnerRepository, OwnerRepositoryError};
use crate::domain::{NewOwner, Owner, OwnerId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewOwnerRow, OwnerRow};
use super::pool::{DbPool, PoolError};
use super::schema::owners;

/// Unique constraint guarding owner names.
pub(crate) const OWNER_NAME_CONSTRAINT: &str = "owners_name_key";

/// Diesel-backed owner repository.
#[derive(Clone)]
pub struct DieselOwnerRepository {
    pool: DbPool,
}

impl DieselOwnerRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OwnerRepositoryError {
    map_basic_pool_error(error, OwnerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OwnerRepositoryError {
    map_basic_diesel_error(
        error,
        OwnerRepositoryError::query,
        OwnerRepositoryError::connection,
    )
}

#[async_trait]
impl OwnerRepository for DieselOwnerRepository {
    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, OwnerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = diesel::insert_into(owners::table)
            .values(NewOwnerRow::from(&owner))
            .returning(owners::id)
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, OWNER_NAME_CONSTRAINT) {
                    OwnerRepositoryError::duplicate_name(owner.name())
                } else {
                    map_diesel_error(err)
                }
            })?;
        Ok(Owner::new(OwnerId::new(id), owner))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, OwnerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = owners::table
            .select(OwnerRow::as_select())
            .order(owners::id.asc())
            .load::<OwnerRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| {
                Owner::try_from(row).map_err(|err| OwnerRepositoryError::query(err.to_string()))
            })
            .collect()
    }

    async fn count_owners(&self) -> Result<u64, OwnerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count = owners::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| OwnerRepositoryError::query("negative owner count"))
    }
}
