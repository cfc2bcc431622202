//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use craftify_core::{OrderId, OrderStatus, PaymentMethod, UserId};

use super::OrderLine;

/// An immutable snapshot of a checked-out cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Buyer.
    pub user_id: UserId,
    /// Cart lines with embedded listing snapshots.
    pub items: Vec<OrderLine>,
    /// Sum of price x quantity over `items` at creation.
    pub total: u64,
    /// Delivery address and payment details.
    pub address: Address,
    /// When the order was placed.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Delivery status, fixed at creation.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Invoice number shown to the buyer.
    #[must_use]
    pub fn invoice_number(&self) -> String {
        self.id.as_str().to_uppercase()
    }

    /// Image of the first line, used as the booking thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        self.items.first().map_or("", |line| line.item.img.as_str())
    }
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

impl Address {
    /// Label of the first required field that is blank, if any.
    #[must_use]
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("Full name", &self.full_name),
            ("Phone", &self.phone),
            ("Street address", &self.street),
            ("City", &self.city),
            ("State/Province", &self.state),
            ("Postal code", &self.zip),
            ("Country", &self.country),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
    }
}
