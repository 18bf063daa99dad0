//! Health endpoints.
//!
//! - `/health` aggregates the domain health indicators (pets needing
//!   vaccination) and answers `503` when any of them is down.
//! - `/health/ready` and `/health/live` are orchestration probes driven by
//!   [`HealthState`].
//!
//! Every response carries `Cache-Control: no-store`.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::{AggregateHealth, aggregate_health};
use crate::inbound::http::state::HttpState;

/// Readiness and liveness flags shared with the server bootstrap.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether the service is ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the service is alive.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Aggregate health of the service's domain indicators.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Every indicator is up", body = AggregateHealth),
        (status = 503, description = "At least one indicator is down", body = AggregateHealth)
    )
)]
#[get("/health")]
pub async fn health_check(state: web::Data<HttpState>) -> HttpResponse {
    let aggregate = aggregate_health(&state.health_indicators).await;
    let mut response = if aggregate.is_up() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(aggregate)
}

/// Readiness probe. `200` once initialised, `503` before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. `200` while alive, `503` once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{HealthIndicator, MockHealthIndicator, MockOwnerOperations};
    use crate::domain::{HealthReport, PETS_NEED_VACCINE};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn indicator(report: HealthReport) -> Arc<dyn HealthIndicator> {
        let mut mock = MockHealthIndicator::new();
        mock.expect_name().return_const("pets");
        mock.expect_health().return_once(move || report);
        Arc::new(mock)
    }

    #[rstest]
    #[case(HealthReport::up("All Pets Vaccinated"), StatusCode::OK, "UP")]
    #[case(HealthReport::down(PETS_NEED_VACCINE), StatusCode::SERVICE_UNAVAILABLE, "DOWN")]
    #[actix_web::test]
    async fn aggregate_status_drives_http_status(
        #[case] report: HealthReport,
        #[case] status: StatusCode,
        #[case] label: &str,
    ) {
        let description = report.details.description.clone();
        let state = HttpState::new(Arc::new(MockOwnerOperations::new()), vec![indicator(report)]);
        let app =
            test::init_service(App::new().app_data(web::Data::new(state)).service(health_check)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), status);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], label);
        assert_eq!(body["details"]["pets"]["status"], label);
        assert_eq!(body["details"]["pets"]["details"]["description"], description.as_str());
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_follow_health_state() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(ready)
                .service(live),
        )
        .await;

        let probe = |uri: &'static str| test::TestRequest::get().uri(uri).to_request();
        assert_eq!(
            test::call_service(&app, probe("/health/ready")).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        state.mark_ready();
        assert_eq!(
            test::call_service(&app, probe("/health/ready")).await.status(),
            StatusCode::OK
        );
        assert_eq!(
            test::call_service(&app, probe("/health/live")).await.status(),
            StatusCode::OK
        );
        state.mark_unhealthy();
        assert_eq!(
            test::call_service(&app, probe("/health/live")).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
