//! In-memory `UserDirectory` seeded with known contacts.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{UserDirectory, UserDirectoryError, fixture_contacts};
use crate::domain::{UserContact, UserId};

/// Read-only directory over a fixed contact set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    contacts: HashMap<UserId, UserContact>,
}

impl InMemoryUserDirectory {
    /// Directory holding exactly `contacts`.
    pub fn new(contacts: impl IntoIterator<Item = UserContact>) -> Self {
        Self {
            contacts: contacts
                .into_iter()
                .map(|contact| (contact.id.clone(), contact))
                .collect(),
        }
    }

    /// Directory holding the development accounts accepted at login.
    pub fn with_fixture_users() -> Self {
        Self::new(fixture_contacts())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_contacts(&self, ids: &[UserId]) -> Result<Vec<UserContact>, UserDirectoryError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.contacts.get(id).cloned())
            .collect())
    }
}
