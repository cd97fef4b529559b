//! Process-local adapters used when no database is configured.
//!
//! Data lives for the lifetime of the process. Useful for development and
//! for HTTP integration tests.

mod listing_repository;
mod user_directory;

pub use listing_repository::InMemoryListingRepository;
pub use user_directory::InMemoryUserDirectory;
