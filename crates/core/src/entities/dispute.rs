//! Buyer/seller disputes requiring admin resolution.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisputeType {
    ItemNotReceived,
    ItemNotAsDescribed,
    Damaged,
    Counterfeit,
    WrongItem,
    #[default]
    Other,
}

impl DisputeType {
    /// Display label shown in the console.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ItemNotReceived => "Item Not Received",
            Self::ItemNotAsDescribed => "Not As Described",
            Self::Damaged => "Damaged Item",
            Self::Counterfeit => "Counterfeit",
            Self::WrongItem => "Wrong Item",
            Self::Other => "Other",
        }
    }
}

/// Resolution state of a dispute.
///
/// Admin flow: open -> under_review -> one of the terminal states. The
/// server does not enforce this ordering; only the console's affordances do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[default]
    Open,
    UnderReview,
    ResolvedBuyer,
    ResolvedSeller,
    Closed,
}

impl DisputeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::UnderReview => "under_review",
            Self::ResolvedBuyer => "resolved_buyer",
            Self::ResolvedSeller => "resolved_seller",
            Self::Closed => "closed",
        }
    }

    /// Whether the dispute has reached a terminal resolved/closed state.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::ResolvedBuyer | Self::ResolvedSeller | Self::Closed)
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence submitted by either party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisputeEvidence {
    pub submitted_by: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A buyer vs seller disagreement requiring admin resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Dispute {
    pub id: String,
    pub buyer_email: String,
    pub seller_email: String,
    pub order_id: String,
    #[serde(rename = "type")]
    pub kind: DisputeType,
    pub status: DisputeStatus,
    pub description: String,
    pub evidence: Vec<DisputeEvidence>,
    pub resolution: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub created_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_states() {
        assert!(DisputeStatus::ResolvedBuyer.is_resolved());
        assert!(DisputeStatus::ResolvedSeller.is_resolved());
        assert!(DisputeStatus::Closed.is_resolved());
        assert!(!DisputeStatus::Open.is_resolved());
        assert!(!DisputeStatus::UnderReview.is_resolved());
    }

    #[test]
    fn test_type_field_rename() {
        let dispute: Dispute =
            serde_json::from_str(r#"{"id":"d1","type":"counterfeit","status":"open"}"#)
                .expect("dispute should deserialize");
        assert_eq!(dispute.kind, DisputeType::Counterfeit);
    }
}
