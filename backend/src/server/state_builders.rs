//! Builders for the HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;

use pets_api::domain::ports::{HealthIndicator, OwnerRepository, PetRepository};
use pets_api::domain::{LoggedOwnerOperations, OwnerService, PetHealthIndicator};
use pets_api::inbound::http::state::HttpState;
use pets_api::outbound::persistence::{DieselOwnerRepository, DieselPetRepository};

use super::config::StoreBackend;

/// Wire the owner service and the pet health indicator over one pair of
/// repositories.
fn owner_state<O, P>(owners: Arc<O>, pets: Arc<P>) -> HttpState
where
    O: OwnerRepository + 'static,
    P: PetRepository + 'static,
{
    let service = LoggedOwnerOperations::new(OwnerService::new(owners, Arc::clone(&pets)));
    let indicators: Vec<Arc<dyn HealthIndicator>> = vec![Arc::new(PetHealthIndicator::new(pets))];
    HttpState::new(Arc::new(service), indicators)
}

/// Build HTTP state backed by the configured store.
pub(crate) fn build_http_state(store: &StoreBackend) -> web::Data<HttpState> {
    let state = match store {
        StoreBackend::Postgres(pool) => owner_state(
            Arc::new(DieselOwnerRepository::new(pool.clone())),
            Arc::new(DieselPetRepository::new(pool.clone())),
        ),
        StoreBackend::Memory(store) => {
            let store = Arc::new(store.clone());
            owner_state(Arc::clone(&store), store)
        }
    };
    web::Data::new(state)
}
