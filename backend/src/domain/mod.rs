//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed marketplace entities and the use-cases
//! that operate on them, independent of HTTP and storage. Adapters talk to
//! the domain through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic failure payload.
//! - Listing (alias to `listing::Listing`) — a goods or service listing.
//! - ListingService — implements the listing and feed driving ports.
//! - merge_feed — tags and orders listings for the combined feed.

pub mod auth;
pub mod error;
pub mod feed;
pub mod listing;
pub mod listing_service;
pub mod listing_view;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::feed::{FeedItem, merge_feed};
pub use self::listing::{
    InterestOutcome, Listing, ListingDetails, ListingDetailsDraft, ListingDraft, ListingId,
    ListingKind, ListingSnapshot, ListingValidationError, MAX_IMAGES, TITLE_MAX,
};
pub use self::listing_service::ListingService;
pub use self::listing_view::{InterestMatch, ListingView};
pub use self::trace_id::TraceId;
pub use self::user::{UNKNOWN_USER_NAME, UserContact, UserId, UserValidationError};
