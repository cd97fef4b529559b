//! Read models combining listings with resolved user contacts.

use super::{Listing, UserContact};

/// A listing with its owner resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub listing: Listing,
    pub owner: UserContact,
}

/// One (interested user, listing) pair for a listing the caller owns.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestMatch {
    pub interested_user: UserContact,
    pub listing: Listing,
}
