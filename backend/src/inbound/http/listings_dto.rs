//! Wire shapes for the listing endpoints.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, FeedItem, InterestMatch, Listing, ListingDetails, ListingDetailsDraft, ListingDraft,
    ListingKind, ListingView, UserContact,
};

/// Route segment naming a listing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum KindSegment {
    #[serde(rename = "goods")]
    Goods,
    #[serde(rename = "services")]
    Services,
}

impl From<KindSegment> for ListingKind {
    fn from(value: KindSegment) -> Self {
        match value {
            KindSegment::Goods => ListingKind::Goods,
            KindSegment::Services => ListingKind::Service,
        }
    }
}

/// Request body for `POST /api/v1/listings/{kind}`.
///
/// `price` and `images` apply to goods; `deadline` and `payment` to
/// services. Supplying a field of the other variant is rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[serde(default)]
    #[schema(example = "Bike")]
    pub title: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    #[schema(example = 100.0)]
    pub price: Option<f64>,
    /// References returned by the media store.
    pub images: Option<Vec<String>>,
    /// `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
    #[serde(default, deserialize_with = "deserialize_deadline")]
    #[schema(value_type = Option<String>, example = "2026-05-01")]
    pub deadline: Option<DateTime<Utc>>,
    pub payment: Option<f64>,
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| format!("deadline `{raw}` must be YYYY-MM-DD or an RFC 3339 timestamp"))
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_deadline(&raw))
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn not_applicable(field: &'static str, kind: ListingKind) -> Error {
    Error::invalid_request(format!("{field} does not apply to {kind} listings"))
        .with_details(json!({ "field": field, "code": "not_applicable" }))
}

impl CreateListingRequest {
    /// Split the flat body into a draft for `kind`.
    pub fn into_draft(self, kind: ListingKind) -> Result<ListingDraft, Error> {
        let details = match kind {
            ListingKind::Goods => {
                if self.deadline.is_some() {
                    return Err(not_applicable("deadline", kind));
                }
                if self.payment.is_some() {
                    return Err(not_applicable("payment", kind));
                }
                ListingDetailsDraft::Goods {
                    price: self.price,
                    images: self.images.unwrap_or_default(),
                }
            }
            ListingKind::Service => {
                if self.price.is_some() {
                    return Err(not_applicable("price", kind));
                }
                if self.images.is_some() {
                    return Err(not_applicable("images", kind));
                }
                ListingDetailsDraft::Service {
                    deadline: self.deadline,
                    payment: self.payment,
                }
            }
        };
        Ok(ListingDraft {
            title: self.title,
            description: self.description,
            contact_number: self.contact_number,
            details,
        })
    }
}

/// A listing as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub interested_user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfilled: Option<bool>,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        let mut response = Self {
            id: listing.id().to_string(),
            kind: listing.kind(),
            title: listing.title().to_owned(),
            description: listing.description().map(str::to_owned),
            contact_number: listing.contact_number().map(str::to_owned),
            owner_id: listing.owner_id().to_string(),
            created_at: listing.created_at().to_rfc3339(),
            interested_user_ids: listing
                .interested_user_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
            price: None,
            images: None,
            deadline: None,
            payment: None,
            fulfilled: None,
        };
        match listing.details() {
            ListingDetails::Goods { price, images } => {
                response.price = *price;
                response.images = Some(images.clone());
            }
            ListingDetails::Service {
                deadline,
                payment,
                fulfilled,
            } => {
                response.deadline = deadline.map(|at| at.to_rfc3339());
                response.payment = *payment;
                response.fulfilled = Some(*fulfilled);
            }
        }
        response
    }
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self::from(&listing)
    }
}

/// A listing with its owner's contact details. Also the feed item shape.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingWithOwnerResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub owner: UserContact,
}

impl From<ListingView> for ListingWithOwnerResponse {
    fn from(view: ListingView) -> Self {
        Self {
            listing: ListingResponse::from(&view.listing),
            owner: view.owner,
        }
    }
}

impl From<FeedItem> for ListingWithOwnerResponse {
    fn from(item: FeedItem) -> Self {
        let mut response = Self::from(item.view);
        response.listing.kind = item.kind;
        response
    }
}

/// Somebody interested in one of the caller's listings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestMatchResponse {
    pub interested_user: UserContact,
    pub listing: ListingResponse,
}

impl From<InterestMatch> for InterestMatchResponse {
    fn from(entry: InterestMatch) -> Self {
        Self {
            interested_user: entry.interested_user,
            listing: ListingResponse::from(&entry.listing),
        }
    }
}
