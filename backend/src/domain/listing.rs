//! Marketplace listings: goods for sale and requested services.
//!
//! Both variants share one [`Listing`] shape and differ only in their
//! [`ListingDetails`] payload. A listing is created once by its owner and
//! afterwards only grows its interested-user sequence.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Error, UserId};

/// Maximum number of image references attached to a goods listing.
pub const MAX_IMAGES: usize = 5;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 120;

/// Listing variant discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ListingKind {
    /// An item offered for sale.
    Goods,
    /// A service somebody wants done.
    Service,
}

impl ListingKind {
    /// Every variant, in feed tagging order.
    pub const ALL: [ListingKind; 2] = [ListingKind::Goods, ListingKind::Service];

    /// Wire name, also used as the feed tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goods => "Goods",
            Self::Service => "Service",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique listing identifier assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ListingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Variant-specific listing payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingDetails {
    /// Goods carry an asking price and up to [`MAX_IMAGES`] image references.
    Goods {
        price: Option<f64>,
        images: Vec<String>,
    },
    /// Services carry an optional deadline, an offered payment and a
    /// fulfilment flag that no current operation transitions.
    Service {
        deadline: Option<DateTime<Utc>>,
        payment: Option<f64>,
        fulfilled: bool,
    },
}

impl ListingDetails {
    /// Variant of this payload.
    pub fn kind(&self) -> ListingKind {
        match self {
            Self::Goods { .. } => ListingKind::Goods,
            Self::Service { .. } => ListingKind::Service,
        }
    }
}

/// Variant-specific fields supplied at creation.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingDetailsDraft {
    /// Goods fields; `images` are opaque references from the media store.
    Goods {
        price: Option<f64>,
        images: Vec<String>,
    },
    /// Service fields.
    Service {
        deadline: Option<DateTime<Utc>>,
        payment: Option<f64>,
    },
}

impl ListingDetailsDraft {
    /// Variant of this draft.
    pub fn kind(&self) -> ListingKind {
        match self {
            Self::Goods { .. } => ListingKind::Goods,
            Self::Service { .. } => ListingKind::Service,
        }
    }
}

/// Unvalidated creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub details: ListingDetailsDraft,
}

/// Validation failures raised while building a [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("at most {max} images may be attached")]
    TooManyImages { max: usize },
    #[error("image reference {index} must not be empty")]
    EmptyImageReference { index: usize },
    #[error("{field} must be a non-negative number")]
    InvalidAmount { field: &'static str },
    #[error("{actual} fields supplied for a {expected} listing")]
    DetailsMismatch {
        expected: ListingKind,
        actual: ListingKind,
    },
    #[error("user {user_id} appears more than once among interested users")]
    DuplicateInterest { user_id: UserId },
}

impl ListingValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::TooManyImages { .. } | Self::EmptyImageReference { .. } => "images",
            Self::InvalidAmount { field } => field,
            Self::DetailsMismatch { .. } => "kind",
            Self::DuplicateInterest { .. } => "interestedUserIds",
        }
    }

    /// Stable snake_case code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::TooManyImages { .. } => "too_many_images",
            Self::EmptyImageReference { .. } => "empty_image_reference",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::DetailsMismatch { .. } => "details_mismatch",
            Self::DuplicateInterest { .. } => "duplicate_interest",
        }
    }
}

/// Result of [`Listing::record_interest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestOutcome {
    /// The user was appended to the interested sequence.
    Recorded,
    /// The user was already present; nothing changed.
    AlreadyPresent,
}

/// Stored field values used to rebuild a listing from persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub id: ListingId,
    pub title: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub interested_user_ids: Vec<UserId>,
    pub details: ListingDetails,
}

/// A goods or service listing.
///
/// ## Invariants
/// - `title` is trimmed, non-empty and at most [`TITLE_MAX`] characters.
/// - `interested_user_ids` holds each user at most once, in the order
///   interest was expressed.
/// - `owner_id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    id: ListingId,
    title: String,
    description: Option<String>,
    contact_number: Option<String>,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    interested_user_ids: Vec<UserId>,
    details: ListingDetails,
}

impl Listing {
    /// Validate a draft into a new listing with no interested users.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use marketplace::domain::{
    ///     Listing, ListingDetailsDraft, ListingDraft, ListingId, ListingKind, UserId,
    /// };
    ///
    /// let draft = ListingDraft {
    ///     title: "Bike".to_owned(),
    ///     description: None,
    ///     contact_number: None,
    ///     details: ListingDetailsDraft::Goods { price: Some(100.0), images: vec![] },
    /// };
    /// let listing = Listing::create(
    ///     ListingKind::Goods,
    ///     draft,
    ///     UserId::random(),
    ///     ListingId::random(),
    ///     Utc::now(),
    /// )
    /// .expect("valid draft");
    /// assert!(listing.interested_user_ids().is_empty());
    /// ```
    pub fn create(
        kind: ListingKind,
        draft: ListingDraft,
        owner_id: UserId,
        id: ListingId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ListingValidationError> {
        let ListingDraft {
            title,
            description,
            contact_number,
            details,
        } = draft;

        if details.kind() != kind {
            return Err(ListingValidationError::DetailsMismatch {
                expected: kind,
                actual: details.kind(),
            });
        }

        let details = match details {
            ListingDetailsDraft::Goods { price, images } => {
                validate_amount(price, "price")?;
                validate_images(&images)?;
                ListingDetails::Goods { price, images }
            }
            ListingDetailsDraft::Service { deadline, payment } => {
                validate_amount(payment, "payment")?;
                ListingDetails::Service {
                    deadline,
                    payment,
                    fulfilled: false,
                }
            }
        };

        Ok(Self {
            id,
            title: validate_title(&title)?,
            description: non_blank(description),
            contact_number: non_blank(contact_number),
            owner_id,
            created_at,
            interested_user_ids: Vec::new(),
            details,
        })
    }

    /// Rebuild a listing from stored values, re-checking invariants.
    pub fn from_snapshot(snapshot: ListingSnapshot) -> Result<Self, ListingValidationError> {
        let ListingSnapshot {
            id,
            title,
            description,
            contact_number,
            owner_id,
            created_at,
            interested_user_ids,
            details,
        } = snapshot;

        let mut seen = std::collections::HashSet::with_capacity(interested_user_ids.len());
        if let Some(duplicate) = interested_user_ids.iter().find(|id| !seen.insert(*id)) {
            return Err(ListingValidationError::DuplicateInterest {
                user_id: duplicate.clone(),
            });
        }

        Ok(Self {
            id,
            title: validate_title(&title)?,
            description,
            contact_number,
            owner_id,
            created_at,
            interested_user_ids,
            details,
        })
    }

    /// Append `user_id` to the interested sequence unless already present.
    pub fn record_interest(&mut self, user_id: UserId) -> InterestOutcome {
        if self.has_interest_from(&user_id) {
            return InterestOutcome::AlreadyPresent;
        }
        self.interested_user_ids.push(user_id);
        InterestOutcome::Recorded
    }

    /// Whether `user_id` has already expressed interest.
    pub fn has_interest_from(&self, user_id: &UserId) -> bool {
        self.interested_user_ids.contains(user_id)
    }

    /// Whether `user_id` owns this listing.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn kind(&self) -> ListingKind {
        self.details.kind()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn contact_number(&self) -> Option<&str> {
        self.contact_number.as_deref()
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Interested users in the order they expressed interest.
    pub fn interested_user_ids(&self) -> &[UserId] {
        &self.interested_user_ids
    }

    pub fn details(&self) -> &ListingDetails {
        &self.details
    }
}

impl From<ListingValidationError> for Error {
    fn from(err: ListingValidationError) -> Self {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

fn validate_title(title: &str) -> Result<String, ListingValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ListingValidationError::EmptyTitle);
    }
    if trimmed.chars().count() > TITLE_MAX {
        return Err(ListingValidationError::TitleTooLong { max: TITLE_MAX });
    }
    Ok(trimmed.to_owned())
}

fn validate_images(images: &[String]) -> Result<(), ListingValidationError> {
    if images.len() > MAX_IMAGES {
        return Err(ListingValidationError::TooManyImages { max: MAX_IMAGES });
    }
    match images.iter().position(|image| image.trim().is_empty()) {
        Some(index) => Err(ListingValidationError::EmptyImageReference { index }),
        None => Ok(()),
    }
}

fn validate_amount(amount: Option<f64>, field: &'static str) -> Result<(), ListingValidationError> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(ListingValidationError::InvalidAmount { field })
        }
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
