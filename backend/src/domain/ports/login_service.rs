//! Driving port for login/authentication use-cases.
//!
//! Credential checks belong to the identity collaborator. Inbound adapters
//! call this port so handler tests can substitute a deterministic double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

use super::FIXTURE_USERS;

/// Password accepted for every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// In-memory authenticator for the fixture accounts.
///
/// Any email listed in [`FIXTURE_USERS`] authenticates with
/// [`FIXTURE_PASSWORD`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_USERS
            .iter()
            .find(|(_, _, email, _)| *email == credentials.email());
        match account {
            Some((id, ..)) if credentials.password() == FIXTURE_PASSWORD => UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
