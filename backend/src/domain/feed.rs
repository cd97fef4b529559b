//! Combined activity feed across listing variants.
//!
//! The feed is recomputed from the current store contents on every request.
//! Ordering is a single rule: most recent `created_at` first, with ties kept
//! in source order.

use super::{ListingKind, ListingView};

/// A listing tagged with its variant for the combined feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub kind: ListingKind,
    pub view: ListingView,
}

/// Tag, concatenate and sort listing sources into one feed.
///
/// Sources are concatenated in the order given; the stable sort keeps that
/// relative order for listings created at the same instant.
///
/// # Examples
/// ```
/// use marketplace::domain::{merge_feed, ListingKind};
///
/// let feed = merge_feed([(ListingKind::Goods, vec![]), (ListingKind::Service, vec![])]);
/// assert!(feed.is_empty());
/// ```
pub fn merge_feed<I>(sources: I) -> Vec<FeedItem>
where
    I: IntoIterator<Item = (ListingKind, Vec<ListingView>)>,
{
    let mut feed: Vec<FeedItem> = sources
        .into_iter()
        .flat_map(|(kind, views)| views.into_iter().map(move |view| FeedItem { kind, view }))
        .collect();
    feed.sort_by(|a, b| b.view.listing.created_at().cmp(&a.view.listing.created_at()));
    feed
}
