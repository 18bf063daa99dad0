//! Owners API handlers.
//!
//! ```text
//! GET  /owners
//! POST /owners {"name":"Bob","age":35}
//! GET  /owners/Barney/pets?health=VACCINATED
//! GET  /owners/Barney/pets/Hoppy
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ApiResult, Error, NewOwner, Owner, Pet, PetHealth};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::owner_validation_error;

/// Request body for `POST /owners`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddOwnerRequest {
    /// Owner name; must not be blank.
    #[schema(example = "Bob")]
    pub name: String,
    /// Owner age; at least 18.
    #[schema(example = 35)]
    pub age: i32,
}

impl TryFrom<AddOwnerRequest> for NewOwner {
    type Error = Error;

    fn try_from(value: AddOwnerRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.age).map_err(|err| owner_validation_error(&err))
    }
}

/// Optional filter for `GET /owners/{owner}/pets`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PetsQuery {
    /// Only return pets with this vaccination status. An empty value is the
    /// same as omitting the filter.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub health: Option<PetHealth>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<PetHealth>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<PetHealth>().map_err(de::Error::custom))
        .transpose()
}

/// List every owner.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pets_api::inbound::http::owners::list_owners;
///
/// let app = App::new().service(list_owners);
/// ```
#[utoipa::path(
    get,
    path = "/owners",
    responses(
        (status = 200, description = "Owners", body = [Owner]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "listOwners"
)]
#[get("/owners")]
pub async fn list_owners(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Owner>>> {
    let owners = state.owners.list_owners().await?;
    Ok(web::Json(owners))
}

/// Create an owner.
#[utoipa::path(
    post,
    path = "/owners",
    request_body = AddOwnerRequest,
    responses(
        (status = 200, description = "Created owner", body = Owner),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Owner name already taken", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "addOwner"
)]
#[post("/owners")]
pub async fn add_owner(
    state: web::Data<HttpState>,
    payload: web::Json<AddOwnerRequest>,
) -> ApiResult<web::Json<Owner>> {
    let owner = NewOwner::try_from(payload.into_inner())?;
    let stored = state.owners.add_owner(owner).await?;
    Ok(web::Json(stored))
}

/// List an owner's pets, optionally filtered by health.
#[utoipa::path(
    get,
    path = "/owners/{owner}/pets",
    params(
        ("owner" = String, Path, description = "Owner name"),
        PetsQuery
    ),
    responses(
        (status = 200, description = "Pets of the owner", body = [Pet]),
        (status = 400, description = "Invalid health filter", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "getPets"
)]
#[get("/owners/{owner}/pets")]
pub async fn get_pets(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PetsQuery>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    let owner = path.into_inner();
    let pets = match query.into_inner().health {
        Some(health) => state.owners.get_pets_with_health(&owner, health).await?,
        None => state.owners.get_pets(&owner).await?,
    };
    Ok(web::Json(pets))
}

/// Fetch a single pet by owner and pet name.
#[utoipa::path(
    get,
    path = "/owners/{owner}/pets/{pet}",
    params(
        ("owner" = String, Path, description = "Owner name"),
        ("pet" = String, Path, description = "Pet name")
    ),
    responses(
        (status = 200, description = "Pet", body = Pet),
        (status = 404, description = "No such pet", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "getPet"
)]
#[get("/owners/{owner}/pets/{pet}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Pet>> {
    let (owner, pet) = path.into_inner();
    let pet = state.owners.get_pet(&owner, &pet).await?;
    Ok(web::Json(pet))
}
