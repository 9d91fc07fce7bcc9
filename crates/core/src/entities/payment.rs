//! Buyer payment transactions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Processing state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Authorized,
    Captured,
    Failed,
    Chargeback,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Failed => "failed",
            Self::Chargeback => "chargeback",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment transaction attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Payment {
    pub id: String,
    pub transaction_id: String,
    pub order_id: String,
    pub buyer_email: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: PaymentStatus,
    /// Upstream fraud score in `[0, 100]`; display-only here.
    pub fraud_score: Option<u32>,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
