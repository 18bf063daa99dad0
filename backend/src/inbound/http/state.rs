//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{HealthIndicator, OwnerOperations};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Owner and pet use cases.
    pub owners: Arc<dyn OwnerOperations>,
    /// Contributors to the aggregate `/health` endpoint.
    pub health_indicators: Arc<[Arc<dyn HealthIndicator>]>,
}

impl HttpState {
    /// Bundle the owner port with the registered health indicators.
    pub fn new(
        owners: Arc<dyn OwnerOperations>,
        health_indicators: Vec<Arc<dyn HealthIndicator>>,
    ) -> Self {
        Self {
            owners,
            health_indicators: health_indicators.into(),
        }
    }
}
