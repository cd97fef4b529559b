//! Combined feed handler.
//!
//! ```text
//! GET /api/v1/feed
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::listings::ListingWithOwnerResponse;
use crate::inbound::http::state::HttpState;

/// Goods and service listings merged, most recent first.
///
/// Each item is a listing with its owner and a `type` tag.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Feed items", body = [ListingWithOwnerResponse]),
        (status = 503, description = "Listing store unavailable", body = Error)
    ),
    tags = ["feed"],
    operation_id = "combinedFeed",
    security([])
)]
#[get("/feed")]
pub async fn combined_feed(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ListingWithOwnerResponse>>> {
    let items = state.feed.combined_feed().await?;
    Ok(web::Json(items.into_iter().map(Into::into).collect()))
}
