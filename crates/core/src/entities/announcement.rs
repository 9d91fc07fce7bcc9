//! Platform announcements shown to marketplace users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Announcement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementType {
    #[default]
    Info,
    Warning,
    Promotion,
    Maintenance,
    Update,
}

impl AnnouncementType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Promotion => "promotion",
            Self::Maintenance => "maintenance",
            Self::Update => "update",
        }
    }
}

impl std::fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which user segment sees the announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    #[default]
    All,
    Buyers,
    Sellers,
    VerifiedSellers,
}

impl TargetAudience {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Buyers => "buyers",
            Self::Sellers => "sellers",
            Self::VerifiedSellers => "verified_sellers",
        }
    }
}

impl std::fmt::Display for TargetAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform-wide announcement or banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementType,
    pub target_audience: TargetAudience,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub banner_url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
