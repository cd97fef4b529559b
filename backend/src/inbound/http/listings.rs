//! Listing HTTP handlers.
//!
//! ```text
//! POST /api/v1/listings/{kind}
//! GET  /api/v1/listings/{kind}
//! POST /api/v1/listings/{kind}/{id}/interest
//! GET  /api/v1/listings/{kind}/mine
//! GET  /api/v1/listings/{kind}/interested
//! GET  /api/v1/listings/{kind}/interest-received
//! ```
//!
//! `{kind}` is `goods` or `services`. Caller-scoped endpoints resolve the
//! session before any port is called.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{Error, ListingId, ListingKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub use super::listings_dto::{
    CreateListingRequest, InterestMatchResponse, KindSegment, ListingResponse,
    ListingWithOwnerResponse,
};

#[derive(Debug, Deserialize)]
struct KindPath {
    kind: KindSegment,
}

impl KindPath {
    fn kind(&self) -> ListingKind {
        self.kind.into()
    }
}

#[derive(Debug, Deserialize)]
struct InterestPath {
    kind: KindSegment,
    id: String,
}

/// A malformed id cannot name a stored listing.
fn parse_listing_id(raw: &str) -> Result<ListingId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("listing {raw} not found")))
}

/// Create a listing owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{kind}",
    params(("kind" = String, Path, description = "`goods` or `services`")),
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown listing kind", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings/{kind}")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<KindPath>,
    payload: web::Json<CreateListingRequest>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let kind = path.kind();
    let draft = payload.into_inner().into_draft(kind)?;
    let listing = state.listings.create_listing(&owner_id, kind, draft).await?;
    Ok(HttpResponse::Created().json(ListingResponse::from(listing)))
}

/// Every listing of a kind with its owner's contact details.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{kind}",
    params(("kind" = String, Path, description = "`goods` or `services`")),
    responses(
        (status = 200, description = "Listings", body = [ListingWithOwnerResponse]),
        (status = 404, description = "Unknown listing kind", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "listListings",
    security([])
)]
#[get("/listings/{kind}")]
pub async fn list_listings(
    state: web::Data<HttpState>,
    path: web::Path<KindPath>,
) -> ApiResult<web::Json<Vec<ListingWithOwnerResponse>>> {
    let views = state.listings_query.list_all(path.kind()).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Record the caller's interest in a listing. Repeats are no-ops.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{kind}/{id}/interest",
    params(
        ("kind" = String, Path, description = "`goods` or `services`"),
        ("id" = String, Path, description = "Listing id")
    ),
    responses(
        (status = 200, description = "Updated listing", body = ListingResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Listing not found", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "expressInterest"
)]
#[post("/listings/{kind}/{id}/interest")]
pub async fn express_interest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InterestPath>,
) -> ApiResult<web::Json<ListingResponse>> {
    let user_id = session.require_user_id()?;
    let InterestPath { kind, id } = path.into_inner();
    let listing_id = parse_listing_id(&id)?;
    let listing = state
        .listings
        .express_interest(kind.into(), &listing_id, &user_id)
        .await?;
    Ok(web::Json(listing.into()))
}

/// Listings the caller owns.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{kind}/mine",
    params(("kind" = String, Path, description = "`goods` or `services`")),
    responses(
        (status = 200, description = "Caller's listings", body = [ListingResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "myListings"
)]
#[get("/listings/{kind}/mine")]
pub async fn my_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<KindPath>,
) -> ApiResult<web::Json<Vec<ListingResponse>>> {
    let caller = session.require_user_id()?;
    let listings = state
        .listings_query
        .my_listings(path.kind(), &caller)
        .await?;
    Ok(web::Json(listings.into_iter().map(Into::into).collect()))
}

/// Listings the caller has expressed interest in.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{kind}/interested",
    params(("kind" = String, Path, description = "`goods` or `services`")),
    responses(
        (status = 200, description = "Listings of interest", body = [ListingWithOwnerResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "myInterests"
)]
#[get("/listings/{kind}/interested")]
pub async fn my_interests(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<KindPath>,
) -> ApiResult<web::Json<Vec<ListingWithOwnerResponse>>> {
    let caller = session.require_user_id()?;
    let views = state
        .listings_query
        .my_interests(path.kind(), &caller)
        .await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Who is interested in the caller's listings.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{kind}/interest-received",
    params(("kind" = String, Path, description = "`goods` or `services`")),
    responses(
        (status = 200, description = "Interest in caller's listings", body = [InterestMatchResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "interestInMyListings"
)]
#[get("/listings/{kind}/interest-received")]
pub async fn interest_received(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<KindPath>,
) -> ApiResult<web::Json<Vec<InterestMatchResponse>>> {
    let caller = session.require_user_id()?;
    let matches = state
        .listings_query
        .interest_in_my_listings(path.kind(), &caller)
        .await?;
    Ok(web::Json(matches.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
