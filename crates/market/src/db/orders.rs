//! Order repository.
//!
//! Orders are stored most recent first and never modified after creation.

use chrono::Utc;

use craftify_core::{OrderId, OrderStatus, UserId};

use super::Db;
use crate::models::{Address, Order, OrderLine, lines_total};

/// Repository for order operations.
pub struct OrderRepository<'a> {
    db: &'a Db,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Get an order by ID.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.db.orders().into_iter().find(|o| &o.id == id)
    }

    /// The most recently placed order.
    #[must_use]
    pub fn latest(&self) -> Option<Order> {
        self.db.orders().into_iter().next()
    }

    /// A user's orders, most recent first.
    #[must_use]
    pub fn for_user(&self, user_id: &UserId) -> Vec<Order> {
        self.db
            .orders()
            .into_iter()
            .filter(|o| &o.user_id == user_id)
            .collect()
    }

    /// Record a new order from a cart snapshot.
    ///
    /// The total is computed from `lines`; the caller is responsible for
    /// clearing the buyer's cart.
    pub fn create(&self, user_id: &UserId, lines: Vec<OrderLine>, address: Address) -> Order {
        let order = Order {
            id: OrderId::generate(),
            user_id: user_id.clone(),
            total: lines_total(&lines),
            items: lines,
            address,
            created_at: Utc::now(),
            status: OrderStatus::ArrivingSoon,
        };

        let mut orders = self.db.orders();
        orders.insert(0, order.clone());
        self.db.set_orders(&orders);

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = order.total,
            lines = order.items.len(),
            "Order placed"
        );
        order
    }
}
