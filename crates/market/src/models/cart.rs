//! Cart domain types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use craftify_core::{ListingId, UserId};

use super::Listing;

/// A (listing, quantity) pair in one buyer's cart.
///
/// Rows never hold a zero quantity; mutations prune them instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    /// Listing in the cart.
    pub item_id: ListingId,
    /// Quantity, always at least 1.
    pub qty: u32,
}

/// Every buyer's cart, keyed by user ID.
pub type Carts = BTreeMap<UserId, Vec<CartRow>>;

/// A cart row joined with its listing.
///
/// Used both for rendering the cart and as the immutable line snapshot stored
/// inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Listing ID at the time of the snapshot.
    pub item_id: ListingId,
    /// Quantity.
    pub qty: u32,
    /// Listing snapshot.
    pub item: Listing,
}

impl OrderLine {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.item.price.times(self.qty)
    }
}

/// Sum of line totals.
#[must_use]
pub fn lines_total(lines: &[OrderLine]) -> u64 {
    lines.iter().map(OrderLine::line_total).sum()
}
