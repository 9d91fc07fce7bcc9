//! Seller payouts: scheduled transfers of net sale proceeds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Processing state of a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Delayed,
}

impl PayoutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        }
    }
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled transfer of net proceeds to a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Payout {
    pub id: String,
    pub seller_email: String,
    pub order_id: String,
    pub amount: Decimal,
    pub platform_fee: Decimal,
    pub net_amount: Decimal,
    pub payout_method: String,
    pub status: PayoutStatus,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub delay_reason: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
