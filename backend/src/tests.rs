//! Tests for the application bootstrap, covering the route table, readiness
//! signalling and metrics initialisation.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

use super::server::{ServerConfig, StoreBackend, build_app, build_http_state, create_server};
#[cfg(feature = "metrics")]
use super::{PrometheusMetricsBuilder, initialize_metrics};
use pets_api::domain::TRACE_ID_HEADER;
use pets_api::inbound::http::health::HealthState;
use pets_api::outbound::memory::InMemoryPetStore;
use pets_api::owner_seeds::{OwnerSeedSettings, seed_owners_on_startup};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    ServerConfig::new("127.0.0.1:0".parse().expect("socket addr"))
}

async fn seeded_store() -> StoreBackend {
    let store = InMemoryPetStore::new();
    seed_owners_on_startup(&OwnerSeedSettings::default(), Arc::new(store.clone()))
        .await
        .expect("bundled registry seeds");
    StoreBackend::Memory(store)
}

async fn call(
    health_state: web::Data<HealthState>,
    store: &StoreBackend,
    uri: &str,
) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(build_app(health_state, build_http_state(store))).await;
    actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");
    assert_eq!(config.bind_addr().ip().to_string(), "127.0.0.1");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[case("/owners")]
#[case("/owners/Barney/pets")]
#[case("/owners/Barney/pets?health=VACCINATED")]
#[case("/owners/Barney/pets/Hoppy")]
#[case("/health")]
#[case("/health/live")]
#[actix_web::test]
async fn route_table_serves_every_endpoint(
    health_state: web::Data<HealthState>,
    #[case] uri: &str,
) {
    let store = seeded_store().await;
    let res = call(health_state, &store, uri).await;

    assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn readiness_follows_health_state(health_state: web::Data<HealthState>) {
    let store = seeded_store().await;

    let before = call(health_state.clone(), &store, "/health/ready").await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let after = call(health_state, &store, "/health/ready").await;
    assert_eq!(after.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn aggregate_health_reports_pets_component(health_state: web::Data<HealthState>) {
    let store = seeded_store().await;
    let res = call(health_state, &store, "/health").await;
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body["status"], "UP");
    assert_eq!(body["details"]["pets"]["details"]["description"], "All Pets Vaccinated");
}

#[cfg(debug_assertions)]
#[rstest]
#[actix_web::test]
async fn openapi_document_is_served_in_debug_builds(health_state: web::Data<HealthState>) {
    let store = StoreBackend::Memory(InMemoryPetStore::new());
    let res = call(health_state, &store, "/api-docs/openapi.json").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["info"]["title"], "pets-api");
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_none_on_error() {
    let metrics = initialize_metrics(|| Err::<actix_web_prom::PrometheusMetrics, _>("boom"));
    assert!(metrics.is_none(), "expected metrics to be absent on error");
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
    });
    assert!(metrics.is_some(), "expected metrics to be present on success");
}
