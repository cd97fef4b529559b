//! Port for resolving user ids to contact projections.
//!
//! The identity collaborator owns user records; the marketplace only reads
//! the name and contact details shown next to listings.

use async_trait::async_trait;

use crate::domain::{UserContact, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// Port for batch contact lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Contacts for the given ids. Unknown ids are omitted from the result;
    /// order is unspecified.
    async fn find_contacts(&self, ids: &[UserId]) -> Result<Vec<UserContact>, UserDirectoryError>;
}

/// Accounts known to the fixture adapters: `(id, name, email, contact number)`.
pub const FIXTURE_USERS: [(&str, &str, &str, Option<&str>); 3] = [
    (
        "11111111-1111-1111-1111-111111111111",
        "Ada Lovelace",
        "ada@campus.example",
        Some("+44 20 7946 0001"),
    ),
    (
        "22222222-2222-2222-2222-222222222222",
        "Grace Hopper",
        "grace@campus.example",
        None,
    ),
    (
        "33333333-3333-3333-3333-333333333333",
        "Alan Turing",
        "alan@campus.example",
        Some("+44 20 7946 0003"),
    ),
];

/// Contacts built from [`FIXTURE_USERS`].
pub fn fixture_contacts() -> Vec<UserContact> {
    FIXTURE_USERS
        .iter()
        .filter_map(|(id, name, email, number)| {
            let id = UserId::new(id).ok()?;
            Some(UserContact::new(
                id,
                *name,
                *email,
                number.map(str::to_owned),
            ))
        })
        .collect()
}
