//! Cart repository.
//!
//! Quantities are clamped at zero and zero-quantity rows are pruned. A user
//! whose last row was removed keeps an empty sequence in the carts map rather
//! than losing the key.

use craftify_core::{ListingId, UserId};

use super::Db;
use crate::models::{CartRow, OrderLine, lines_total};

/// Repository for per-user cart operations.
pub struct CartRepository<'a> {
    db: &'a Db,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// The user's cart rows in insertion order.
    #[must_use]
    pub fn rows(&self, user_id: &UserId) -> Vec<CartRow> {
        self.db.carts().remove(user_id).unwrap_or_default()
    }

    /// Add one unit of a listing, returning the new quantity.
    pub fn add(&self, user_id: &UserId, item_id: &ListingId) -> u32 {
        let mut carts = self.db.carts();
        let rows = carts.entry(user_id.clone()).or_default();
        let qty = if let Some(row) = rows.iter_mut().find(|r| &r.item_id == item_id) {
            row.qty = row.qty.saturating_add(1);
            row.qty
        } else {
            rows.push(CartRow {
                item_id: item_id.clone(),
                qty: 1,
            });
            1
        };
        self.db.set_carts(&carts);
        qty
    }

    /// Change a row's quantity by `delta`, clamping at zero.
    ///
    /// Rows that reach zero are removed. Returns the new quantity, or `None`
    /// (without writing) if the row doesn't exist.
    pub fn change_qty(&self, user_id: &UserId, item_id: &ListingId, delta: i64) -> Option<u32> {
        let mut carts = self.db.carts();
        let rows = carts.get_mut(user_id)?;
        let row = rows.iter_mut().find(|r| &r.item_id == item_id)?;

        let next = i64::from(row.qty).saturating_add(delta).max(0);
        row.qty = u32::try_from(next).unwrap_or(u32::MAX);
        let qty = row.qty;
        rows.retain(|r| r.qty > 0);

        self.db.set_carts(&carts);
        Some(qty)
    }

    /// Remove a row entirely. Returns whether a row was removed.
    pub fn remove(&self, user_id: &UserId, item_id: &ListingId) -> bool {
        let mut carts = self.db.carts();
        let Some(rows) = carts.get_mut(user_id) else {
            return false;
        };
        let before = rows.len();
        rows.retain(|r| &r.item_id != item_id);
        if rows.len() == before {
            return false;
        }
        self.db.set_carts(&carts);
        true
    }

    /// Empty the user's cart.
    pub fn clear(&self, user_id: &UserId) {
        let mut carts = self.db.carts();
        carts.insert(user_id.clone(), Vec::new());
        self.db.set_carts(&carts);
    }

    /// Cart rows joined with their listings.
    ///
    /// Rows whose listing has since been deleted are skipped.
    #[must_use]
    pub fn detailed(&self, user_id: &UserId) -> Vec<OrderLine> {
        let listings = self.db.listings();
        self.rows(user_id)
            .into_iter()
            .filter_map(|row| {
                listings
                    .iter()
                    .find(|l| l.id == row.item_id)
                    .map(|item| OrderLine {
                        item_id: row.item_id,
                        qty: row.qty,
                        item: item.clone(),
                    })
            })
            .collect()
    }

    /// Total number of units in the cart (the header badge).
    #[must_use]
    pub fn item_count(&self, user_id: &UserId) -> u32 {
        self.rows(user_id).iter().map(|r| r.qty).sum()
    }

    /// Sum of price x quantity over rows with an existing listing.
    #[must_use]
    pub fn subtotal(&self, user_id: &UserId) -> u64 {
        lines_total(&self.detailed(user_id))
    }
}
