//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FeedQuery, FixtureFeedQuery, FixtureListingCommand, FixtureListingQuery, FixtureLoginService,
    ListingCommand, ListingQuery, LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
    pub feed: Arc<dyn FeedQuery>,
}

impl HttpState {
    /// Construct state from individual ports.
    pub fn new(
        login: Arc<dyn LoginService>,
        listings: Arc<dyn ListingCommand>,
        listings_query: Arc<dyn ListingQuery>,
        feed: Arc<dyn FeedQuery>,
    ) -> Self {
        Self {
            login,
            listings,
            listings_query,
            feed,
        }
    }

    /// Construct state where one service backs every listing port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::ListingService;
    /// use marketplace::domain::ports::FixtureLoginService;
    /// use marketplace::inbound::http::state::HttpState;
    /// use marketplace::outbound::memory::{InMemoryListingRepository, InMemoryUserDirectory};
    ///
    /// let service = ListingService::new(
    ///     Arc::new(InMemoryListingRepository::default()),
    ///     Arc::new(InMemoryUserDirectory::with_fixture_users()),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let state = HttpState::with_listing_service(Arc::new(FixtureLoginService), Arc::new(service));
    /// let _feed = state.feed.clone();
    /// ```
    pub fn with_listing_service<S>(login: Arc<dyn LoginService>, service: Arc<S>) -> Self
    where
        S: ListingCommand + ListingQuery + FeedQuery + 'static,
    {
        Self::new(login, service.clone(), service.clone(), service)
    }

    /// State backed entirely by fixture ports.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureListingCommand),
            Arc::new(FixtureListingQuery),
            Arc::new(FixtureFeedQuery),
        )
    }
}
