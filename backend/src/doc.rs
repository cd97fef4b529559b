//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the wire
//! schemas they exchange and the session cookie security scheme. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, ListingKind, UserContact};
use crate::inbound::http::listings::{
    CreateListingRequest, InterestMatchResponse, ListingResponse, ListingWithOwnerResponse,
};
use crate::inbound::http::users::LoginRequest;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the marketplace API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus marketplace API",
        description = "Goods and service listings, interest tracking and the combined feed."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::express_interest,
        crate::inbound::http::listings::my_listings,
        crate::inbound::http::listings::my_interests,
        crate::inbound::http::listings::interest_received,
        crate::inbound::http::feed::combined_feed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ListingKind,
        UserContact,
        LoginRequest,
        CreateListingRequest,
        ListingResponse,
        ListingWithOwnerResponse,
        InterestMatchResponse,
    )),
    tags(
        (name = "users", description = "Session management"),
        (name = "listings", description = "Goods and service listings"),
        (name = "feed", description = "Combined activity feed"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
