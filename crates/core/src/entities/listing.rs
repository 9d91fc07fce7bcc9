//! Card listings offered for sale.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Moderation / sale state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Sold,
}

impl ListingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Sold => "sold",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single card listing.
///
/// `market_price` is the external reference price used by the pricing
/// comparison views; `price` is what the seller asks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Listing {
    pub id: String,
    pub card_name: String,
    pub card_set: String,
    pub tcg_category: String,
    pub price: Decimal,
    pub market_price: Decimal,
    pub condition: String,
    pub quantity: u32,
    pub seller_email: String,
    pub status: ListingStatus,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
