//! In-memory `ListingRepository` guarded by a single async lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingId, ListingKind, UserId};

/// Listings per kind, in insertion order.
///
/// `append_interest` checks membership and appends under one write guard,
/// so concurrent requests for the same pair record the user once.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<HashMap<ListingKind, Vec<Listing>>>,
}

impl InMemoryListingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, kind: ListingKind, keep: F) -> Vec<Listing>
    where
        F: Fn(&Listing) -> bool,
    {
        let guard = self.listings.read().await;
        guard
            .get(&kind)
            .map(|listings| listings.iter().filter(|l| keep(l)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut guard = self.listings.write().await;
        let bucket = guard.entry(listing.kind()).or_default();
        if bucket.iter().any(|existing| existing.id() == listing.id()) {
            return Err(ListingRepositoryError::query(format!(
                "listing {} already exists",
                listing.id()
            )));
        }
        bucket.push(listing.clone());
        Ok(())
    }

    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self.filtered(kind, |_| true).await)
    }

    async fn find_by_id(
        &self,
        kind: ListingKind,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(self
            .filtered(kind, |listing| listing.id() == *id)
            .await
            .into_iter()
            .next())
    }

    async fn list_by_owner(
        &self,
        kind: ListingKind,
        owner_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self
            .filtered(kind, |listing| listing.is_owned_by(owner_id))
            .await)
    }

    async fn list_by_interested_user(
        &self,
        kind: ListingKind,
        user_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self
            .filtered(kind, |listing| listing.has_interest_from(user_id))
            .await)
    }

    async fn append_interest(
        &self,
        kind: ListingKind,
        id: &ListingId,
        user_id: &UserId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut guard = self.listings.write().await;
        let Some(listing) = guard
            .get_mut(&kind)
            .and_then(|listings| listings.iter_mut().find(|l| l.id() == *id))
        else {
            return Ok(None);
        };
        listing.record_interest(user_id.clone());
        Ok(Some(listing.clone()))
    }
}
