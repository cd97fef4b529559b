//! Port for listing persistence.
//!
//! Adapters store both listing variants and must provide `append_interest`
//! as a single atomic append-if-absent step.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId, ListingKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "listing repository query failed: {message}",
    }
}

/// Port for storing and filtering listings of either variant.
///
/// Sequence-returning methods yield listings in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a freshly created listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Every listing of `kind`.
    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Fetch one listing of `kind` by id.
    async fn find_by_id(
        &self,
        kind: ListingKind,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Listings of `kind` owned by `owner_id`.
    async fn list_by_owner(
        &self,
        kind: ListingKind,
        owner_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Listings of `kind` whose interested users include `user_id`.
    async fn list_by_interested_user(
        &self,
        kind: ListingKind,
        user_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Append `user_id` to the listing's interested users unless present.
    ///
    /// Returns the listing as stored after the call, or `None` when no
    /// listing of `kind` has that id. Concurrent calls for the same pair
    /// must never store the user twice.
    async fn append_interest(
        &self,
        kind: ListingKind,
        id: &ListingId,
        user_id: &UserId,
    ) -> Result<Option<Listing>, ListingRepositoryError>;
}
