//! Pure status-string to display-tone mapping for status badges.
//!
//! Statuses arrive as free-form strings from the API; the badge lookup is
//! case- and whitespace-insensitive and falls back to a neutral tone for
//! anything it does not recognize.

use serde::{Deserialize, Serialize};

/// Display tone for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Emerald,
    #[default]
    Slate,
    Amber,
    Blue,
    Red,
    Purple,
    Orange,
}

impl Tone {
    /// CSS class applied to the badge element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Emerald => "badge-emerald",
            Self::Slate => "badge-slate",
            Self::Amber => "badge-amber",
            Self::Blue => "badge-blue",
            Self::Red => "badge-red",
            Self::Purple => "badge-purple",
            Self::Orange => "badge-orange",
        }
    }
}

/// Normalize a status string: lower-cased, whitespace collapsed to `_`.
fn normalize(status: &str) -> String {
    status
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Map a status string to its badge tone.
///
/// Unknown statuses fall back to [`Tone::Slate`].
#[must_use]
pub fn badge_tone(status: &str) -> Tone {
    match normalize(status).as_str() {
        // General
        "active" | "approved" | "verified" => Tone::Emerald,
        "admin" => Tone::Purple,
        "inactive" | "cancelled" | "closed" | "dismissed" | "expired" | "logout" => Tone::Slate,
        "pending" | "delayed" | "open" | "unverified" | "waiting_response" | "medium" => {
            Tone::Amber
        }
        // Orders and payments
        "paid" | "delivered" | "captured" | "completed" | "sold" | "resolved"
        | "resolved_buyer" | "resolved_seller" | "login_success" => Tone::Emerald,
        "shipped" | "authorized" | "processing" | "under_review" | "in_progress"
        | "investigating" | "password_reset" => Tone::Blue,
        "refunded" => Tone::Purple,
        "disputed" | "failed" | "chargeback" | "rejected" | "new" | "critical" | "urgent"
        | "suspended" | "flagged" | "login_failed" | "account_locked" => Tone::Red,
        "high" => Tone::Orange,
        "low" => Tone::Slate,
        _ => Tone::Slate,
    }
}

/// Human-readable badge label: underscores to spaces, words title-cased.
#[must_use]
pub fn badge_label(status: &str) -> String {
    status
        .replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(badge_tone("approved"), Tone::Emerald);
        assert_eq!(badge_tone("pending"), Tone::Amber);
        assert_eq!(badge_tone("chargeback"), Tone::Red);
        assert_eq!(badge_tone("refunded"), Tone::Purple);
        assert_eq!(badge_tone("shipped"), Tone::Blue);
        assert_eq!(badge_tone("high"), Tone::Orange);
    }

    #[test]
    fn test_normalization_is_case_and_space_insensitive() {
        assert_eq!(badge_tone("Under Review"), Tone::Blue);
        assert_eq!(badge_tone("  RESOLVED  Buyer "), Tone::Emerald);
    }

    #[test]
    fn test_unknown_status_falls_back_to_slate() {
        assert_eq!(badge_tone("quantum_flux"), Tone::Slate);
        assert_eq!(badge_tone(""), Tone::Slate);
    }

    #[test]
    fn test_badge_label_title_cases() {
        assert_eq!(badge_label("under_review"), "Under Review");
        assert_eq!(badge_label("resolved_buyer"), "Resolved Buyer");
        assert_eq!(badge_label("paid"), "Paid");
        assert_eq!(badge_label(""), "");
    }
}
