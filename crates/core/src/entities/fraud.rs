//! Fraud alerts flagged for investigation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a fraud alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investigation state of a fraud alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    New,
    Investigating,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }

    /// Terminal states: the alert needs no further attention.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged event requiring investigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FraudAlert {
    pub id: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub user_email: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
    pub status: AlertStatus,
    pub resolution_notes: Option<String>,
    pub related_entity_id: Option<String>,
    pub related_entity_type: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
