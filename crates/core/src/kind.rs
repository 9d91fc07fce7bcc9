//! The registry of entity collections behind the uniform CRUD facade.

use serde::{Deserialize, Serialize};

/// A named entity collection exposed by the marketplace API.
///
/// Each kind maps to one REST collection (`/api/{path}`) and one snapshot
/// file (`{Name}s.json`) in static-data mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Seller,
    Listing,
    Order,
    Payment,
    Payout,
    Dispute,
    FraudAlert,
    Announcement,
    SupportTicket,
    AdminLog,
    CardCategory,
    PlatformSetting,
}

impl EntityKind {
    /// Every entity collection the console knows about.
    pub const ALL: [Self; 13] = [
        Self::User,
        Self::Seller,
        Self::Listing,
        Self::Order,
        Self::Payment,
        Self::Payout,
        Self::Dispute,
        Self::FraudAlert,
        Self::Announcement,
        Self::SupportTicket,
        Self::AdminLog,
        Self::CardCategory,
        Self::PlatformSetting,
    ];

    /// Canonical entity name as used by the upstream registry.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Seller => "Seller",
            Self::Listing => "Listing",
            Self::Order => "Order",
            Self::Payment => "Payment",
            Self::Payout => "Payout",
            Self::Dispute => "Dispute",
            Self::FraudAlert => "FraudAlert",
            Self::Announcement => "Announcement",
            Self::SupportTicket => "SupportTicket",
            Self::AdminLog => "AdminLog",
            Self::CardCategory => "CardCategory",
            Self::PlatformSetting => "PlatformSettings",
        }
    }

    /// REST path segment: the lower-cased entity name.
    #[must_use]
    pub const fn api_path(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
            Self::Listing => "listing",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Payout => "payout",
            Self::Dispute => "dispute",
            Self::FraudAlert => "fraudalert",
            Self::Announcement => "announcement",
            Self::SupportTicket => "supportticket",
            Self::AdminLog => "adminlog",
            Self::CardCategory => "cardcategory",
            Self::PlatformSetting => "platformsettings",
        }
    }

    /// File name of the read-only JSON snapshot for this collection.
    ///
    /// `PlatformSettings` is already plural upstream and keeps its name as-is.
    #[must_use]
    pub const fn snapshot_file(self) -> &'static str {
        match self {
            Self::User => "Users.json",
            Self::Seller => "Sellers.json",
            Self::Listing => "Listings.json",
            Self::Order => "Orders.json",
            Self::Payment => "Payments.json",
            Self::Payout => "Payouts.json",
            Self::Dispute => "Disputes.json",
            Self::FraudAlert => "FraudAlerts.json",
            Self::Announcement => "Announcements.json",
            Self::SupportTicket => "SupportTickets.json",
            Self::AdminLog => "AdminLogs.json",
            Self::CardCategory => "CardCategories.json",
            Self::PlatformSetting => "PlatformSettings.json",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_paths_are_lowercased_names() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.api_path(), kind.name().to_lowercase());
        }
    }

    #[test]
    fn test_snapshot_files_end_in_json() {
        for kind in EntityKind::ALL {
            assert!(kind.snapshot_file().ends_with(".json"));
        }
    }

    #[test]
    fn test_platform_settings_snapshot_not_double_pluralized() {
        assert_eq!(
            EntityKind::PlatformSetting.snapshot_file(),
            "PlatformSettings.json"
        );
    }
}
