//! PostgreSQL-backed `PetRepository` implementation using Diesel ORM.
//!
//! Reads join `pets` with `owners` so every returned pet carries its owner.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{NewPet, Owner, Pet, PetHealth, PetId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPetRow, OwnerRow, PetRow, RowMappingError, joined_into_pet};
use super::pool::{DbPool, PoolError};
use super::schema::{owners, pets};

/// Diesel-backed pet repository.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PetRepositoryError {
    map_basic_pool_error(error, PetRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PetRepositoryError {
    map_basic_diesel_error(
        error,
        PetRepositoryError::query,
        PetRepositoryError::connection,
    )
}

fn map_row_error(error: RowMappingError) -> PetRepositoryError {
    PetRepositoryError::query(error.to_string())
}

fn into_pets(rows: Vec<(PetRow, OwnerRow)>) -> Result<Vec<Pet>, PetRepositoryError> {
    rows.into_iter()
        .map(|row| joined_into_pet(row).map_err(map_row_error))
        .collect()
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn insert_pets(&self, new_pets: Vec<NewPet>) -> Result<Vec<Pet>, PetRepositoryError> {
        if new_pets.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<NewPetRow<'_>> = new_pets
            .iter()
            .map(|pet| NewPetRow {
                name: pet.name(),
                owner_id: pet.owner_id().get(),
                health: pet.health().as_str(),
            })
            .collect();
        let owner_ids: Vec<i64> = rows.iter().map(|row| row.owner_id).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (stored, owner_rows) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let stored = diesel::insert_into(pets::table)
                        .values(&rows)
                        .returning(PetRow::as_returning())
                        .get_results::<PetRow>(conn)
                        .await?;
                    let owner_rows = owners::table
                        .filter(owners::id.eq_any(owner_ids))
                        .select(OwnerRow::as_select())
                        .load::<OwnerRow>(conn)
                        .await?;
                    Ok((stored, owner_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let owners_by_id = owner_rows
            .into_iter()
            .map(|row| Owner::try_from(row).map(|owner| (owner.id().get(), owner)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(map_row_error)?;

        stored
            .into_iter()
            .map(|row| {
                let owner = owners_by_id.get(&row.owner_id).cloned().ok_or_else(|| {
                    PetRepositoryError::query(format!("owner {} vanished", row.owner_id))
                })?;
                row.into_pet(owner).map_err(map_row_error)
            })
            .collect()
    }

    async fn find_by_owner_name(&self, owner_name: &str) -> Result<Vec<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = pets::table
            .inner_join(owners::table)
            .filter(owners::name.eq(owner_name))
            .select((PetRow::as_select(), OwnerRow::as_select()))
            .order(pets::id.asc())
            .load::<(PetRow, OwnerRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_pets(rows)
    }

    async fn find_by_owner_and_pet_name(
        &self,
        owner_name: &str,
        pet_name: &str,
    ) -> Result<Option<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = pets::table
            .inner_join(owners::table)
            .filter(owners::name.eq(owner_name))
            .filter(pets::name.eq(pet_name))
            .select((PetRow::as_select(), OwnerRow::as_select()))
            .first::<(PetRow, OwnerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(joined_into_pet).transpose().map_err(map_row_error)
    }

    async fn find_by_owner_and_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = pets::table
            .inner_join(owners::table)
            .filter(owners::name.eq(owner_name))
            .filter(pets::health.eq(health.as_str()))
            .select((PetRow::as_select(), OwnerRow::as_select()))
            .order(pets::id.asc())
            .load::<(PetRow, OwnerRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_pets(rows)
    }

    async fn exists_with_health(&self, health: PetHealth) -> Result<bool, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(pets::table.filter(pets::health.eq(health.as_str()))))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update_health(
        &self,
        id: PetId,
        health: PetHealth,
    ) -> Result<bool, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(pets::table.find(id.get()))
            .set(pets::health.eq(health.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
