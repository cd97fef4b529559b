//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! Both listing variants live in the `listings` table and are told apart by
//! the `kind` column. Interest is recorded with a single conditional
//! `UPDATE` so concurrent requests cannot store a user twice.

use async_trait::async_trait;
use diesel::dsl::not;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{
    Listing, ListingDetails, ListingId, ListingKind, ListingSnapshot, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ListingRow, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

diesel::define_sql_function! {
    /// PostgreSQL `array_append` specialised to uuid arrays.
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

/// Diesel-backed implementation of the listing repository port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListingRepositoryError {
    map_basic_pool_error(error, |message| ListingRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_basic_diesel_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

/// Value stored in the `kind` column.
fn kind_column(kind: ListingKind) -> &'static str {
    match kind {
        ListingKind::Goods => "goods",
        ListingKind::Service => "service",
    }
}

fn parse_kind_column(raw: &str) -> Result<ListingKind, ListingRepositoryError> {
    match raw {
        "goods" => Ok(ListingKind::Goods),
        "service" => Ok(ListingKind::Service),
        other => Err(ListingRepositoryError::query(format!(
            "unknown listing kind `{other}`"
        ))),
    }
}

/// Convert a database row into a validated domain listing.
fn row_to_listing(row: ListingRow) -> Result<Listing, ListingRepositoryError> {
    let ListingRow {
        id,
        kind,
        title,
        description,
        contact_number,
        owner_id,
        created_at,
        price,
        images,
        deadline,
        payment,
        fulfilled,
        interested_user_ids,
    } = row;

    let details = match parse_kind_column(&kind)? {
        ListingKind::Goods => ListingDetails::Goods { price, images },
        ListingKind::Service => ListingDetails::Service {
            deadline,
            payment,
            fulfilled,
        },
    };

    Listing::from_snapshot(ListingSnapshot {
        id: ListingId::from_uuid(id),
        title,
        description,
        contact_number,
        owner_id: UserId::from_uuid(owner_id),
        created_at,
        interested_user_ids: interested_user_ids
            .into_iter()
            .map(UserId::from_uuid)
            .collect(),
        details,
    })
    .map_err(|err| ListingRepositoryError::query(format!("invalid stored listing {id}: {err}")))
}

fn rows_to_listings(rows: Vec<ListingRow>) -> Result<Vec<Listing>, ListingRepositoryError> {
    rows.into_iter().map(row_to_listing).collect()
}

fn new_row(listing: &Listing) -> NewListingRow<'_> {
    let (price, images, deadline, payment, fulfilled) = match listing.details() {
        ListingDetails::Goods { price, images } => (*price, images.as_slice(), None, None, false),
        ListingDetails::Service {
            deadline,
            payment,
            fulfilled,
        } => (None, <&[String]>::default(), *deadline, *payment, *fulfilled),
    };

    NewListingRow {
        id: *listing.id().as_uuid(),
        kind: kind_column(listing.kind()),
        title: listing.title(),
        description: listing.description(),
        contact_number: listing.contact_number(),
        owner_id: *listing.owner_id().as_uuid(),
        created_at: listing.created_at(),
        price,
        images,
        deadline,
        payment,
        fulfilled,
        interested_user_ids: listing
            .interested_user_ids()
            .iter()
            .map(|id| *id.as_uuid())
            .collect(),
    }
}

async fn find_row(
    conn: &mut AsyncPgConnection,
    kind: ListingKind,
    id: &ListingId,
) -> Result<Option<Listing>, ListingRepositoryError> {
    let row = listings::table
        .filter(listings::id.eq(id.as_uuid()))
        .filter(listings::kind.eq(kind_column(kind)))
        .select(ListingRow::as_select())
        .first::<ListingRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    row.map(row_to_listing).transpose()
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(listings::table)
            .values(&new_row(listing))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::kind.eq(kind_column(kind)))
            .order(listings::seq.asc())
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_listings(rows)
    }

    async fn find_by_id(
        &self,
        kind: ListingKind,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_row(&mut conn, kind, id).await
    }

    async fn list_by_owner(
        &self,
        kind: ListingKind,
        owner_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::kind.eq(kind_column(kind)))
            .filter(listings::owner_id.eq(owner_id.as_uuid()))
            .order(listings::seq.asc())
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_listings(rows)
    }

    async fn list_by_interested_user(
        &self,
        kind: ListingKind,
        user_id: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::kind.eq(kind_column(kind)))
            .filter(listings::interested_user_ids.contains(vec![*user_id.as_uuid()]))
            .order(listings::seq.asc())
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_listings(rows)
    }

    async fn append_interest(
        &self,
        kind: ListingKind,
        id: &ListingId,
        user_id: &UserId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user: Uuid = *user_id.as_uuid();

        // Row locking re-evaluates the membership filter, so a racing
        // duplicate update matches zero rows.
        let updated = diesel::update(
            listings::table
                .filter(listings::id.eq(id.as_uuid()))
                .filter(listings::kind.eq(kind_column(kind)))
                .filter(not(listings::interested_user_ids.contains(vec![user]))),
        )
        .set(listings::interested_user_ids.eq(array_append(listings::interested_user_ids, user)))
        .returning(ListingRow::as_returning())
        .get_result::<ListingRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match updated {
            Some(row) => row_to_listing(row).map(Some),
            None => find_row(&mut conn, kind, id).await,
        }
    }
}
