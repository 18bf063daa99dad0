//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed owner and pet entities plus the services
//! that orchestrate them behind the ports in [`ports`]. Types validate their
//! invariants on construction; adapters never see unchecked values.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Owner / NewOwner — persisted and pending owners.
//! - Pet / NewPet / PetHealth — persisted and pending pets.
//! - OwnerService — implementation of the owner driving port.
//! - OwnerSeeder — startup seeding of an empty store.
//! - PetHealthIndicator — vaccination-derived health signal.

pub mod error;
pub mod health;
pub mod logged_operations;
pub mod owner;
pub mod owner_seeding;
pub mod owner_service;
pub mod pet;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{
    ALL_PETS_VACCINATED, AggregateHealth, HealthDetails, HealthReport, HealthStatus,
    PETS_NEED_VACCINE, PetHealthIndicator, aggregate_health,
};
pub use self::logged_operations::LoggedOwnerOperations;
pub use self::owner::{
    MAX_NAME_LENGTH, MIN_OWNER_AGE, NewOwner, Owner, OwnerId, OwnerValidationError,
};
pub use self::owner_seeding::{
    OwnerSeedDefinition, OwnerSeedOutcome, OwnerSeeder, OwnerSeedingError,
};
pub use self::owner_service::OwnerService;
pub use self::pet::{NewPet, Pet, PetHealth, PetId, PetName, PetValidationError, UnknownPetHealth};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pets_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
