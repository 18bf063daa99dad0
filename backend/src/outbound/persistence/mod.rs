//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the owner, pet and seeding ports backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures map onto each
//!   port's error enum.
//!
//! # Example
//!
//! ```rust,no_run
//! use pets_api::outbound::persistence::{DbPool, DieselOwnerRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pets")).await?;
//! let owners = DieselOwnerRepository::new(pool);
//! # let _ = owners;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_owner_repository;
mod diesel_owner_seed_repository;
mod diesel_pet_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_owner_repository::DieselOwnerRepository;
pub use diesel_owner_seed_repository::DieselOwnerSeedRepository;
pub use diesel_pet_repository::DieselPetRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
