//! Builders choosing the adapters behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use marketplace::domain::ListingService;
use marketplace::domain::ports::{FixtureLoginService, ListingRepository, LoginService, UserDirectory};
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::memory::{InMemoryListingRepository, InMemoryUserDirectory};
use marketplace::outbound::persistence::{DieselListingRepository, DieselUserDirectory};

use super::ServerConfig;

fn listing_state<R, D>(login: Arc<dyn LoginService>, repo: R, directory: D) -> HttpState
where
    R: ListingRepository + 'static,
    D: UserDirectory + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = ListingService::new(Arc::new(repo), Arc::new(directory), clock);
    HttpState::with_listing_service(login, Arc::new(service))
}

/// Diesel adapters when a pool is configured, in-memory adapters otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("listings backed by PostgreSQL");
            listing_state(
                login,
                DieselListingRepository::new(pool.clone()),
                DieselUserDirectory::new(pool.clone()),
            )
        }
        None => {
            info!("no database configured; listings kept in memory");
            listing_state(
                login,
                InMemoryListingRepository::new(),
                InMemoryUserDirectory::with_fixture_users(),
            )
        }
    };
    web::Data::new(state)
}
