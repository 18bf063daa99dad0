//! Domain-derived health reporting.
//!
//! [`PetHealthIndicator`] turns the vaccination state of stored pets into an
//! up/down signal. [`aggregate_health`] folds any number of indicators into
//! the body served by the aggregate health endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PetHealth;
use crate::domain::ports::{HealthIndicator, PetRepository};

/// Description reported when at least one pet requires vaccination.
pub const PETS_NEED_VACCINE: &str = "Pets Need Vaccine";
/// Description reported when every pet is vaccinated.
pub const ALL_PETS_VACCINATED: &str = "All Pets Vaccinated";

/// Up/down signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// Component is healthy.
    Up,
    /// Component is unhealthy.
    Down,
}

/// Free-form details attached to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthDetails {
    /// Human-readable explanation of the status.
    pub description: String,
}

/// Health of a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthReport {
    /// Component status.
    pub status: HealthStatus,
    /// Supporting details.
    pub details: HealthDetails,
}

impl HealthReport {
    /// Healthy report with a description.
    pub fn up(description: impl Into<String>) -> Self {
        Self::with_status(HealthStatus::Up, description)
    }

    /// Unhealthy report with a description.
    pub fn down(description: impl Into<String>) -> Self {
        Self::with_status(HealthStatus::Down, description)
    }

    fn with_status(status: HealthStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            details: HealthDetails {
                description: description.into(),
            },
        }
    }

    /// Whether the report is `UP`.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

/// Combined health of every registered indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AggregateHealth {
    /// `UP` only when every component is `UP`.
    pub status: HealthStatus,
    /// Component reports keyed by indicator name.
    pub details: BTreeMap<String, HealthReport>,
}

impl AggregateHealth {
    /// Whether the aggregate is `UP`.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

/// Evaluate every indicator and combine the results.
///
/// An empty indicator list is `UP`.
pub async fn aggregate_health(indicators: &[Arc<dyn HealthIndicator>]) -> AggregateHealth {
    let mut details = BTreeMap::new();
    for indicator in indicators {
        details.insert(indicator.name().to_owned(), indicator.health().await);
    }
    let status = if details.values().all(HealthReport::is_up) {
        HealthStatus::Up
    } else {
        HealthStatus::Down
    };
    AggregateHealth { status, details }
}

/// Reports `DOWN` while any pet requires vaccination.
#[derive(Clone)]
pub struct PetHealthIndicator<P> {
    pets: Arc<P>,
}

impl<P> PetHealthIndicator<P> {
    /// Create an indicator over the given pet repository.
    pub fn new(pets: Arc<P>) -> Self {
        Self { pets }
    }
}

#[async_trait]
impl<P> HealthIndicator for PetHealthIndicator<P>
where
    P: PetRepository,
{
    fn name(&self) -> &'static str {
        "pets"
    }

    async fn health(&self) -> HealthReport {
        match self
            .pets
            .exists_with_health(PetHealth::RequiresVaccination)
            .await
        {
            Ok(true) => HealthReport::down(PETS_NEED_VACCINE),
            Ok(false) => HealthReport::up(ALL_PETS_VACCINATED),
            Err(err) => {
                tracing::warn!(error = %err, "pet health check failed");
                HealthReport::down(err.to_string())
            }
        }
    }
}
