//! pets-api entry-point: loads settings, prepares the store, seeds owners and
//! serves the REST API.

mod server;
#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pets_api::inbound::http::health::HealthState;
use pets_api::outbound::memory::InMemoryPetStore;
use pets_api::outbound::persistence::{
    DbPool, DieselOwnerSeedRepository, PoolConfig, run_pending_migrations,
};
use pets_api::owner_seeds::{OwnerSeedSettings, seed_owners_on_startup};
use pets_api::settings::PetsSettings;
use server::{ServerConfig, StoreBackend, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let program = [OsString::from("pets-api")];
    let settings = PetsSettings::load_from_iter(program.clone())
        .map_err(|e| eyre!("failed to load server settings: {e}"))?;
    let seed_settings = OwnerSeedSettings::load_from_iter(program)
        .map_err(|e| eyre!("failed to load owner seed settings: {e}"))?;

    let store = prepare_store(&settings).await?;
    seed_store(&seed_settings, &store).await?;

    let bind_addr = settings
        .bind_addr()
        .wrap_err("failed to resolve bind address")?;
    let config = ServerConfig::new(bind_addr).with_store(store);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("pets_api")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    info!(%bind_addr, "pets-api listening");
    server.await.wrap_err("HTTP server terminated with an error")
}

/// Run migrations and open the pool when a database is configured, otherwise
/// fall back to the in-memory store.
async fn prepare_store(settings: &PetsSettings) -> color_eyre::Result<StoreBackend> {
    let Some(database_url) = settings.database_url() else {
        warn!("PETS_DATABASE_URL is not set; using the in-memory store");
        return Ok(StoreBackend::Memory(InMemoryPetStore::new()));
    };

    let applied = run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations complete");

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max) = settings.db_max_connections {
        pool_config = pool_config.with_max_size(max);
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    Ok(StoreBackend::Postgres(pool))
}

async fn seed_store(settings: &OwnerSeedSettings, store: &StoreBackend) -> color_eyre::Result<()> {
    match store {
        StoreBackend::Postgres(pool) => {
            seed_owners_on_startup(settings, Arc::new(DieselOwnerSeedRepository::new(pool.clone())))
                .await
        }
        StoreBackend::Memory(store) => {
            seed_owners_on_startup(settings, Arc::new(store.clone())).await
        }
    }
    .wrap_err("owner seeding failed")?;
    Ok(())
}

/// Build the Prometheus middleware, logging and disabling metrics on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "Prometheus metrics disabled");
            None
        }
    }
}
