//! Driving port for the combined activity feed.

use async_trait::async_trait;

use crate::domain::{Error, FeedItem, ListingKind, merge_feed};

use super::{FixtureListingQuery, ListingQuery};

/// Domain use-case port for reading the merged feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Listings of every variant, most recent first.
    async fn combined_feed(&self) -> Result<Vec<FeedItem>, Error>;
}

/// Fixture feed built from [`FixtureListingQuery`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedQuery;

#[async_trait]
impl FeedQuery for FixtureFeedQuery {
    async fn combined_feed(&self) -> Result<Vec<FeedItem>, Error> {
        let mut sources = Vec::with_capacity(ListingKind::ALL.len());
        for kind in ListingKind::ALL {
            sources.push((kind, FixtureListingQuery.list_all(kind).await?));
        }
        Ok(merge_feed(sources))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_feed_tags_both_kinds() {
        let feed = FixtureFeedQuery.combined_feed().await.expect("feed");
        let kinds: Vec<ListingKind> = feed.iter().map(|item| item.kind).collect();

        assert_eq!(kinds, vec![ListingKind::Goods, ListingKind::Service]);
    }
}
