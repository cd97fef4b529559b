//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod feed_query;
mod listing_command;
mod listing_query;
mod listing_repository;
mod login_service;
mod user_directory;

#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{FeedQuery, FixtureFeedQuery};
#[cfg(test)]
pub use listing_command::MockListingCommand;
pub use listing_command::{
    FIXTURE_LISTING_ID, FixtureListingCommand, ListingCommand, fixture_created_at,
    fixture_listing, fixture_owner_id,
};
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::{FixtureListingQuery, ListingQuery};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_PASSWORD, FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{
    FIXTURE_USERS, UserDirectory, UserDirectoryError, fixture_contacts,
};
