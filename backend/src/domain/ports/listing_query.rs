//! Driving port for listing reads scoped by variant and caller.

use async_trait::async_trait;

use crate::domain::{Error, InterestMatch, Listing, ListingId, ListingKind, ListingView, UserId};

use super::{FIXTURE_LISTING_ID, fixture_contacts, fixture_listing};

/// Domain use-case port for listing queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Every listing of `kind` with its owner resolved.
    async fn list_all(&self, kind: ListingKind) -> Result<Vec<ListingView>, Error>;

    /// Listings of `kind` owned by `caller_id`.
    async fn my_listings(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<Listing>, Error>;

    /// Listings of `kind` the caller is interested in, owners resolved.
    async fn my_interests(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<ListingView>, Error>;

    /// One entry per (owned listing, interested user) pair.
    ///
    /// Ordered by the caller's listings, then by the order in which users
    /// expressed interest.
    async fn interest_in_my_listings(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<InterestMatch>, Error>;
}

/// Fixture query returning the single fixture listing for `list_all`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingQuery;

#[async_trait]
impl ListingQuery for FixtureListingQuery {
    async fn list_all(&self, kind: ListingKind) -> Result<Vec<ListingView>, Error> {
        let listing = fixture_listing(kind, ListingId::from_uuid(FIXTURE_LISTING_ID))?;
        let owner = fixture_contacts()
            .into_iter()
            .find(|contact| &contact.id == listing.owner_id())
            .ok_or_else(|| Error::internal("fixture owner missing from directory"))?;
        Ok(vec![ListingView { listing, owner }])
    }

    async fn my_listings(
        &self,
        _kind: ListingKind,
        _caller_id: &UserId,
    ) -> Result<Vec<Listing>, Error> {
        Ok(Vec::new())
    }

    async fn my_interests(
        &self,
        _kind: ListingKind,
        _caller_id: &UserId,
    ) -> Result<Vec<ListingView>, Error> {
        Ok(Vec::new())
    }

    async fn interest_in_my_listings(
        &self,
        _kind: ListingKind,
        _caller_id: &UserId,
    ) -> Result<Vec<InterestMatch>, Error> {
        Ok(Vec::new())
    }
}
