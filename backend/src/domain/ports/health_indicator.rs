//! Port for named health contributors feeding the aggregate health endpoint.

use async_trait::async_trait;

use crate::domain::HealthReport;

/// A component that can report its own health.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Key under which the report appears in the aggregate response.
    fn name(&self) -> &'static str;

    /// Evaluate the component. Failures are folded into a `DOWN` report.
    async fn health(&self) -> HealthReport;
}
