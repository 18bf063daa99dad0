//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use pets_api::outbound::memory::InMemoryPetStore;
use pets_api::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Store backing the owner and pet ports.
#[derive(Clone)]
pub enum StoreBackend {
    /// PostgreSQL via the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store, used when no database is configured.
    Memory(InMemoryPetStore),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreBackend,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration backed by an empty in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            store: StoreBackend::Memory(InMemoryPetStore::new()),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Replace the store backing the HTTP ports.
    #[must_use]
    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by bootstrap tests only")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
