//! End-to-end HTTP scenarios over the in-memory store.
//!
//! The store is seeded from the bundled registry, the handlers are mounted the
//! same way the server mounts them, and every request goes through the trace
//! middleware.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use pets_api::Trace;
use pets_api::domain::ports::PetRepository;
use pets_api::domain::{
    LoggedOwnerOperations, OwnerService, PetHealth, PetHealthIndicator, TRACE_ID_HEADER,
};
use pets_api::inbound::http::health::health_check;
use pets_api::inbound::http::owners::{add_owner, get_pet, get_pets, list_owners};
use pets_api::inbound::http::state::HttpState;
use pets_api::inbound::http::{json_config, query_config};
use pets_api::outbound::memory::InMemoryPetStore;
use pets_api::owner_seeds::{OwnerSeedSettings, seed_owners_on_startup};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
async fn store() -> Arc<InMemoryPetStore> {
    let store = Arc::new(InMemoryPetStore::new());
    seed_owners_on_startup(&OwnerSeedSettings::default(), Arc::clone(&store))
        .await
        .expect("bundled registry seeds");
    store
}

fn state_for(store: &Arc<InMemoryPetStore>) -> web::Data<HttpState> {
    let service = LoggedOwnerOperations::new(OwnerService::new(
        Arc::clone(store),
        Arc::clone(store),
    ));
    let indicator = PetHealthIndicator::new(Arc::clone(store));
    web::Data::new(HttpState::new(Arc::new(service), vec![Arc::new(indicator)]))
}

async fn app(
    store: &Arc<InMemoryPetStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(state_for(store))
            .app_data(json_config())
            .app_data(query_config())
            .wrap(Trace)
            .service(list_owners)
            .service(add_owner)
            .service(get_pets)
            .service(get_pet)
            .service(health_check),
    )
    .await
}

async fn get(store: &Arc<InMemoryPetStore>, uri: &str) -> (StatusCode, Value) {
    let app = app(store).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
        .await;
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

async fn post_owner(store: &Arc<InMemoryPetStore>, body: Value) -> (StatusCode, Value) {
    let app = app(store).await;
    let req = actix_test::TestRequest::post()
        .uri("/owners")
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["name"].as_str().expect("name"))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn added_owner_joins_seeded_owners(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;

    let (status, created) = post_owner(&store, json!({ "name": "Fred", "age": 45 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({ "id": 3, "name": "Fred", "age": 45 }));

    let (status, owners) = get(&store, "/owners").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&owners), ["Harry", "Barney", "Fred"]);
}

#[rstest]
#[case(json!({ "name": "Pebbles", "age": 17 }), "age: must be greater than or equal to 18")]
#[case(json!({ "name": "  ", "age": 30 }), "name: must not be blank")]
#[case(json!({ "name": "Bamm-Bamm".repeat(40), "age": 30 }), "name: size must be between 1 and 255")]
#[actix_web::test]
async fn invalid_owners_are_rejected(
    #[future] store: Arc<InMemoryPetStore>,
    #[case] body: Value,
    #[case] message: &str,
) {
    let store = store.await;

    let (status, error) = post_owner(&store, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["message"], message);

    let (_, owners) = get(&store, "/owners").await;
    assert_eq!(names(&owners).len(), 2);
}

#[rstest]
#[actix_web::test]
async fn duplicate_owner_name_conflicts(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;

    let (status, error) = post_owner(&store, json!({ "name": "Barney", "age": 50 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");
}

#[rstest]
#[case("/owners/Barney/pets", &["Hoppy"])]
#[case("/owners/Barney/pets?health=VACCINATED", &["Hoppy"])]
#[case("/owners/Barney/pets?health=REQUIRES_VACCINATION", &[])]
#[case("/owners/Barney/pets?health=", &["Hoppy"])]
#[case("/owners/Nobody/pets", &[])]
#[actix_web::test]
async fn pets_are_listed_per_owner(
    #[future] store: Arc<InMemoryPetStore>,
    #[case] uri: &str,
    #[case] expected: &[&str],
) {
    let store = store.await;

    let (status, pets) = get(&store, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&pets), expected);
}

#[rstest]
#[actix_web::test]
async fn single_pet_lookup_includes_owner(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;

    let (status, pet) = get(&store, "/owners/Barney/pets/Hoppy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["name"], "Hoppy");
    assert_eq!(pet["health"], "VACCINATED");
    assert_eq!(pet["owner"]["name"], "Barney");

    let (status, error) = get(&store, "/owners/Barney/pets/Dino").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn unknown_health_filter_is_a_bad_request(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;

    let (status, error) = get(&store, "/owners/Barney/pets?health=SICK").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn health_turns_down_once_a_pet_needs_vaccine(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;

    let (status, body) = get(&store, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(
        body["details"]["pets"]["details"]["description"],
        "All Pets Vaccinated"
    );

    let hoppy = store
        .find_by_owner_and_pet_name("Barney", "Hoppy")
        .await
        .expect("lookup")
        .expect("Hoppy seeded");
    let updated = store
        .update_health(hoppy.id(), PetHealth::RequiresVaccination)
        .await
        .expect("update");
    assert!(updated);

    let (status, body) = get(&store, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "DOWN");
    assert_eq!(body["details"]["pets"]["status"], "DOWN");
    assert_eq!(
        body["details"]["pets"]["details"]["description"],
        "Pets Need Vaccine"
    );
}

#[rstest]
#[actix_web::test]
async fn reseeding_a_populated_store_writes_nothing(#[future] store: Arc<InMemoryPetStore>) {
    let store = store.await;
    post_owner(&store, json!({ "name": "Fred", "age": 45 })).await;

    seed_owners_on_startup(&OwnerSeedSettings::default(), Arc::clone(&store))
        .await
        .expect("reseed");

    let (_, owners) = get(&store, "/owners").await;
    assert_eq!(names(&owners), ["Harry", "Barney", "Fred"]);
}
