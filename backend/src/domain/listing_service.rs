//! Listing domain service.
//!
//! Implements the listing command, listing query and feed driving ports on
//! top of a [`ListingRepository`] and a [`UserDirectory`]. Each query makes
//! at most one directory lookup, with ids de-duplicated.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    FeedQuery, ListingCommand, ListingQuery, ListingRepository, ListingRepositoryError,
    UserDirectory, UserDirectoryError,
};
use crate::domain::{
    Error, FeedItem, InterestMatch, Listing, ListingDraft, ListingId, ListingKind, ListingView,
    UserContact, UserId, merge_feed,
};

fn map_repository_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Contacts keyed by id; misses resolve to a placeholder.
struct ContactBook(HashMap<UserId, UserContact>);

impl ContactBook {
    fn resolve(&self, id: &UserId) -> UserContact {
        self.0
            .get(id)
            .cloned()
            .unwrap_or_else(|| UserContact::unknown(id.clone()))
    }
}

/// Listing service implementing the listing and feed driving ports.
#[derive(Clone)]
pub struct ListingService<R, D> {
    listing_repo: Arc<R>,
    directory: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<R, D> ListingService<R, D> {
    /// Create a new service over the given adapters.
    pub fn new(listing_repo: Arc<R>, directory: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listing_repo,
            directory,
            clock,
        }
    }
}

impl<R, D> ListingService<R, D>
where
    R: ListingRepository,
    D: UserDirectory,
{
    async fn contact_book<'a, I>(&self, ids: I) -> Result<ContactBook, Error>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let mut unique: Vec<UserId> = Vec::new();
        for id in ids {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        if unique.is_empty() {
            return Ok(ContactBook(HashMap::new()));
        }

        let contacts = self
            .directory
            .find_contacts(&unique)
            .await
            .map_err(map_directory_error)?;
        Ok(ContactBook(
            contacts
                .into_iter()
                .map(|contact| (contact.id.clone(), contact))
                .collect(),
        ))
    }

    async fn with_owners(&self, listings: Vec<Listing>) -> Result<Vec<ListingView>, Error> {
        let book = self
            .contact_book(listings.iter().map(Listing::owner_id))
            .await?;
        Ok(listings
            .into_iter()
            .map(|listing| ListingView {
                owner: book.resolve(listing.owner_id()),
                listing,
            })
            .collect())
    }
}

#[async_trait]
impl<R, D> ListingCommand for ListingService<R, D>
where
    R: ListingRepository,
    D: UserDirectory,
{
    async fn create_listing(
        &self,
        owner_id: &UserId,
        kind: ListingKind,
        draft: ListingDraft,
    ) -> Result<Listing, Error> {
        let listing = Listing::create(
            kind,
            draft,
            owner_id.clone(),
            ListingId::random(),
            self.clock.utc(),
        )?;

        self.listing_repo
            .insert(&listing)
            .await
            .map_err(map_repository_error)?;
        Ok(listing)
    }

    async fn express_interest(
        &self,
        kind: ListingKind,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<Listing, Error> {
        self.listing_repo
            .append_interest(kind, listing_id, user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("{kind} listing {listing_id} not found")))
    }
}

#[async_trait]
impl<R, D> ListingQuery for ListingService<R, D>
where
    R: ListingRepository,
    D: UserDirectory,
{
    async fn list_all(&self, kind: ListingKind) -> Result<Vec<ListingView>, Error> {
        let listings = self
            .listing_repo
            .list_all(kind)
            .await
            .map_err(map_repository_error)?;
        self.with_owners(listings).await
    }

    async fn my_listings(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<Listing>, Error> {
        let listings = self
            .listing_repo
            .list_by_owner(kind, caller_id)
            .await
            .map_err(map_repository_error)?;
        Ok(listings
            .into_iter()
            .filter(|listing| listing.is_owned_by(caller_id))
            .collect())
    }

    async fn my_interests(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<ListingView>, Error> {
        let listings = self
            .listing_repo
            .list_by_interested_user(kind, caller_id)
            .await
            .map_err(map_repository_error)?;
        self.with_owners(listings).await
    }

    async fn interest_in_my_listings(
        &self,
        kind: ListingKind,
        caller_id: &UserId,
    ) -> Result<Vec<InterestMatch>, Error> {
        let listings = self.my_listings(kind, caller_id).await?;
        let book = self
            .contact_book(
                listings
                    .iter()
                    .flat_map(|listing| listing.interested_user_ids()),
            )
            .await?;

        let book = &book;
        Ok(listings
            .iter()
            .flat_map(|listing| {
                listing
                    .interested_user_ids()
                    .iter()
                    .map(move |user_id| InterestMatch {
                        interested_user: book.resolve(user_id),
                        listing: listing.clone(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl<R, D> FeedQuery for ListingService<R, D>
where
    R: ListingRepository,
    D: UserDirectory,
{
    async fn combined_feed(&self) -> Result<Vec<FeedItem>, Error> {
        let mut sources = Vec::with_capacity(ListingKind::ALL.len());
        for kind in ListingKind::ALL {
            let listings = self
                .listing_repo
                .list_all(kind)
                .await
                .map_err(map_repository_error)?;
            sources.push((kind, listings));
        }

        let book = self
            .contact_book(
                sources
                    .iter()
                    .flat_map(|(_, listings)| listings.iter().map(Listing::owner_id)),
            )
            .await?;
        Ok(merge_feed(sources.into_iter().map(|(kind, listings)| {
            let views = listings
                .into_iter()
                .map(|listing| ListingView {
                    owner: book.resolve(listing.owner_id()),
                    listing,
                })
                .collect();
            (kind, views)
        })))
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
