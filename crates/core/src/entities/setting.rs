//! Platform configuration settings stored as key/value records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a setting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    Fee,
    #[default]
    Threshold,
    FeatureFlag,
}

impl SettingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fee => "fee",
            Self::Threshold => "threshold",
            Self::FeatureFlag => "feature_flag",
        }
    }

    /// Derive the type from a setting key, mirroring the console's save
    /// logic: fee/commission keys are fees, enabled/required keys are
    /// feature flags, everything else is a threshold.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        if key.contains("fee") || key.contains("commission") {
            Self::Fee
        } else if key.contains("enabled") || key.contains("required") {
            Self::FeatureFlag
        } else {
            Self::Threshold
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform setting. Values are stringified regardless of type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlatformSetting {
    pub id: String,
    pub setting_key: String,
    pub setting_value: String,
    pub setting_type: SettingType,
    pub created_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_type_for_key() {
        assert_eq!(SettingType::for_key("marketplace_commission"), SettingType::Fee);
        assert_eq!(SettingType::for_key("transaction_fee"), SettingType::Fee);
        assert_eq!(SettingType::for_key("ai_scanning_enabled"), SettingType::FeatureFlag);
        assert_eq!(
            SettingType::for_key("seller_verification_required"),
            SettingType::FeatureFlag
        );
        assert_eq!(SettingType::for_key("min_payout_amount"), SettingType::Threshold);
    }
}
