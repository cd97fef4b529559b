//! Driving port for listing mutations: creation and interest.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Error, Listing, ListingDetailsDraft, ListingDraft, ListingId, ListingKind, UserId,
};

use super::FIXTURE_USERS;

/// Domain use-case port for creating listings and recording interest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Validate `draft` and store it as a new listing owned by `owner_id`.
    async fn create_listing(
        &self,
        owner_id: &UserId,
        kind: ListingKind,
        draft: ListingDraft,
    ) -> Result<Listing, Error>;

    /// Record that `user_id` is interested in a listing.
    ///
    /// Repeating the call for the same user succeeds without changing the
    /// listing. Fails with `not_found` when the listing does not exist.
    async fn express_interest(
        &self,
        kind: ListingKind,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<Listing, Error>;
}

/// Id assigned to every listing produced by the fixture ports.
pub const FIXTURE_LISTING_ID: Uuid = Uuid::from_u128(0x5e1f_0000_0000_4000_8000_0000_0000_0001);

const FIXTURE_CREATED_AT_SECS: i64 = 1_767_225_600;

/// Creation timestamp used by fixture listings (2026-01-01T00:00:00Z).
pub fn fixture_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXTURE_CREATED_AT_SECS, 0).unwrap_or_default()
}

/// Owner of fixture listings: the first fixture account.
pub fn fixture_owner_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USERS[0].0)
        .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
}

/// Deterministic listing of `kind` used by the fixture ports.
pub fn fixture_listing(kind: ListingKind, id: ListingId) -> Result<Listing, Error> {
    let (title, details) = match kind {
        ListingKind::Goods => (
            "Bike",
            ListingDetailsDraft::Goods {
                price: Some(100.0),
                images: Vec::new(),
            },
        ),
        ListingKind::Service => (
            "Move a sofa",
            ListingDetailsDraft::Service {
                deadline: None,
                payment: Some(20.0),
            },
        ),
    };
    let draft = ListingDraft {
        title: title.to_owned(),
        description: None,
        contact_number: None,
        details,
    };
    Ok(Listing::create(
        kind,
        draft,
        fixture_owner_id()?,
        id,
        fixture_created_at(),
    )?)
}

/// Fixture command: validates input but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingCommand;

#[async_trait]
impl ListingCommand for FixtureListingCommand {
    async fn create_listing(
        &self,
        owner_id: &UserId,
        kind: ListingKind,
        draft: ListingDraft,
    ) -> Result<Listing, Error> {
        Ok(Listing::create(
            kind,
            draft,
            owner_id.clone(),
            ListingId::from_uuid(FIXTURE_LISTING_ID),
            fixture_created_at(),
        )?)
    }

    async fn express_interest(
        &self,
        kind: ListingKind,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<Listing, Error> {
        if listing_id.as_uuid() != &FIXTURE_LISTING_ID {
            return Err(Error::not_found(format!("listing {listing_id} not found")));
        }
        let mut listing = fixture_listing(kind, *listing_id)?;
        listing.record_interest(user_id.clone());
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    //! Checks the fixture command validates drafts and echoes interest.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_rejects_empty_title() {
        let draft = ListingDraft {
            title: "  ".to_owned(),
            description: None,
            contact_number: None,
            details: ListingDetailsDraft::Goods {
                price: None,
                images: Vec::new(),
            },
        };
        let err = FixtureListingCommand
            .create_listing(&UserId::random(), ListingKind::Goods, draft)
            .await
            .expect_err("empty title must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_interest_appends_caller() {
        let user = UserId::random();
        let listing = FixtureListingCommand
            .express_interest(
                ListingKind::Service,
                &ListingId::from_uuid(FIXTURE_LISTING_ID),
                &user,
            )
            .await
            .expect("fixture listing exists");

        assert_eq!(listing.interested_user_ids(), &[user]);
        assert_eq!(listing.kind(), ListingKind::Service);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_interest_in_unknown_listing_is_not_found() {
        let err = FixtureListingCommand
            .express_interest(ListingKind::Goods, &ListingId::random(), &UserId::random())
            .await
            .expect_err("unknown listing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
