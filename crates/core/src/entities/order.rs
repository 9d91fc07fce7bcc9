//! Marketplace orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    Disputed,
    Refunded,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Disputed => "disputed",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A buyer's order for a single card listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub buyer_email: String,
    pub seller_email: String,
    pub card_name: String,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub platform_fee: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub shipping_carrier: Option<String>,
    pub shipping_address: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
