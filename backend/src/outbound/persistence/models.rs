//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{listings, users};

/// Row struct for reading contact projections from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserContactRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
}

/// Row struct for reading from the listings table.
///
/// Omits `seq`, which only orders reads.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub price: Option<f64>,
    pub images: Vec<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub payment: Option<f64>,
    pub fulfilled: bool,
    pub interested_user_ids: Vec<Uuid>,
}

/// Insertable struct for creating new listing records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub price: Option<f64>,
    pub images: &'a [String],
    pub deadline: Option<DateTime<Utc>>,
    pub payment: Option<f64>,
    pub fulfilled: bool,
    pub interested_user_ids: Vec<Uuid>,
}
