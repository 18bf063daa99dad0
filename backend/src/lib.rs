//! Owners and pets REST service.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP onto the driving port; [`outbound`]
//! implements the driven ports over PostgreSQL or process memory.
//! [`owner_seeds`] populates an empty store at startup.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod owner_seeds;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
