//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod feed;
pub mod health;
pub mod listings;
mod listings_dto;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler and the extractor error configuration.
///
/// Callers mount this inside a scope that carries the session middleware:
///
/// ```
/// use actix_web::{App, web};
/// use marketplace::inbound::http;
///
/// let app = App::new().service(web::scope("/api/v1").configure(http::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(users::login)
        .service(users::logout)
        .service(listings::create_listing)
        .service(listings::list_listings)
        .service(listings::express_interest)
        .service(listings::my_listings)
        .service(listings::my_interests)
        .service(listings::interest_received)
        .service(feed::combined_feed);
}
