//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the owner, pet, health and error schemas. The document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{
    AggregateHealth, Error, ErrorCode, HealthDetails, HealthReport, HealthStatus, Owner, OwnerId,
    Pet, PetHealth, PetId,
};
use crate::inbound::http::owners::AddOwnerRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pets-api",
        version = "0.1.0",
        description = "Owners, their pets and a vaccination-derived health probe."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::owners::list_owners,
        crate::inbound::http::owners::add_owner,
        crate::inbound::http::owners::get_pets,
        crate::inbound::http::owners::get_pet,
        crate::inbound::http::health::health_check,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Owner,
        OwnerId,
        Pet,
        PetId,
        PetHealth,
        AddOwnerRequest,
        AggregateHealth,
        HealthReport,
        HealthDetails,
        HealthStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "owners", description = "Owners and their pets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
