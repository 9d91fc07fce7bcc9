//! Platform settings: fee, threshold, and feature-flag configuration
//! persisted as key/value records.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use serde_json::json;

use cardvault_core::{EntityKind, PlatformSetting, SettingType};

use crate::components::cards::PageHeader;
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{back_to, fetch_or_empty, render};

const PAGE: &str = "PlatformSettings";

/// How a setting renders and parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Number,
    Toggle,
}

struct SettingField {
    key: &'static str,
    label: &'static str,
    help: &'static str,
    kind: FieldKind,
    default: &'static str,
}

struct SettingSection {
    name: &'static str,
    icon: &'static str,
    fields: &'static [SettingField],
}

/// The full settings catalog with platform defaults. Stored records
/// override these defaults key by key.
const SECTIONS: &[SettingSection] = &[
    SettingSection {
        name: "Fees & Commissions",
        icon: "ph-currency-dollar",
        fields: &[
            SettingField {
                key: "marketplace_commission",
                label: "Marketplace Commission (%)",
                help: "Percentage taken from each sale",
                kind: FieldKind::Number,
                default: "10",
            },
            SettingField {
                key: "transaction_fee",
                label: "Transaction Fee ($)",
                help: "Flat fee per transaction",
                kind: FieldKind::Number,
                default: "0.5",
            },
            SettingField {
                key: "listing_fee",
                label: "Listing Fee ($)",
                help: "Fee to create a listing",
                kind: FieldKind::Number,
                default: "0",
            },
            SettingField {
                key: "boosted_listing_fee",
                label: "Boosted Listing Fee ($)",
                help: "Fee for promoted placement",
                kind: FieldKind::Number,
                default: "5",
            },
        ],
    },
    SettingSection {
        name: "Thresholds & Limits",
        icon: "ph-sliders",
        fields: &[
            SettingField {
                key: "min_listing_price",
                label: "Minimum Listing Price ($)",
                help: "Lowest allowed listing price",
                kind: FieldKind::Number,
                default: "0.99",
            },
            SettingField {
                key: "max_listing_price",
                label: "Maximum Listing Price ($)",
                help: "Highest allowed listing price",
                kind: FieldKind::Number,
                default: "100000",
            },
            SettingField {
                key: "payout_delay_days",
                label: "Payout Delay (days)",
                help: "Days before funds are released to sellers",
                kind: FieldKind::Number,
                default: "3",
            },
            SettingField {
                key: "min_payout_amount",
                label: "Minimum Payout ($)",
                help: "Smallest payout the platform will issue",
                kind: FieldKind::Number,
                default: "10",
            },
        ],
    },
    SettingSection {
        name: "Features",
        icon: "ph-toggle-right",
        fields: &[
            SettingField {
                key: "ai_scanning_enabled",
                label: "AI Card Scanning",
                help: "Automatic card recognition on upload",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "auto_price_sync",
                label: "Auto Price Sync",
                help: "Sync market prices from pricing APIs",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "fraud_detection_enabled",
                label: "Fraud Detection",
                help: "Automatic fraud alerts on suspicious activity",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "seller_verification_required",
                label: "Seller Verification Required",
                help: "Require KYC before selling",
                kind: FieldKind::Toggle,
                default: "true",
            },
        ],
    },
    SettingSection {
        name: "Notifications",
        icon: "ph-bell",
        fields: &[
            SettingField {
                key: "email_notifications",
                label: "Email Notifications",
                help: "Send admin alert emails",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "push_notifications",
                label: "Push Notifications",
                help: "Send admin push notifications",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "order_alerts",
                label: "Order Alerts",
                help: "Notify on new orders",
                kind: FieldKind::Toggle,
                default: "true",
            },
            SettingField {
                key: "dispute_alerts",
                label: "Dispute Alerts",
                help: "Notify on new disputes",
                kind: FieldKind::Toggle,
                default: "true",
            },
        ],
    },
];

/// One rendered setting input.
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub value: String,
    pub is_toggle: bool,
    pub enabled: bool,
}

/// One rendered settings card.
pub struct SectionView {
    pub name: &'static str,
    pub icon: &'static str,
    pub fields: Vec<FieldView>,
}

fn section_views(stored: &[PlatformSetting]) -> Vec<SectionView> {
    SECTIONS
        .iter()
        .map(|section| SectionView {
            name: section.name,
            icon: section.icon,
            fields: section
                .fields
                .iter()
                .map(|field| {
                    let value = stored
                        .iter()
                        .find(|s| s.setting_key == field.key)
                        .map_or_else(|| field.default.to_string(), |s| s.setting_value.clone());
                    FieldView {
                        key: field.key,
                        label: field.label,
                        help: field.help,
                        enabled: value == "true",
                        is_toggle: field.kind == FieldKind::Toggle,
                        value,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Settings form across all sections, saved with one submit.
#[derive(Template)]
#[template(path = "settings/index.html")]
pub struct SettingsPage {
    pub shell: Shell,
    pub header: PageHeader,
    pub sections: Vec<SectionView>,
    pub save_href: String,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stored: Vec<PlatformSetting> = fetch_or_empty(
        state.entity(EntityKind::PlatformSetting).list_as().await,
        "platform settings",
    );

    let page = SettingsPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Platform Settings",
            "Configure marketplace fees, thresholds, and features",
        ),
        sections: section_views(&stored),
        save_href: format!("{}/save", page_url(PAGE)),
    };
    render(&page)
}

/// Resolve the submitted value for a field. Toggles submit nothing when
/// unchecked, so absence means `false`.
fn submitted_value(field: &SettingField, form: &HashMap<String, String>) -> String {
    match field.kind {
        FieldKind::Toggle => form.contains_key(field.key).to_string(),
        FieldKind::Number => form
            .get(field.key)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| field.default.to_string(), |v| v.trim().to_string()),
    }
}

/// Upsert every cataloged key: update the stored record when one exists,
/// otherwise create it with its type derived from the key.
pub async fn save(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let api = state.entity(EntityKind::PlatformSetting);
    let stored: Vec<PlatformSetting> = api.list_as().await?;

    for field in SECTIONS.iter().flat_map(|s| s.fields) {
        let value = submitted_value(field, &form);
        match stored.iter().find(|s| s.setting_key == field.key) {
            Some(existing) => {
                if existing.setting_value != value {
                    api.update(&existing.id, json!({ "setting_value": value }))
                        .await?;
                }
            }
            None => {
                api.create(json!({
                    "setting_key": field.key,
                    "setting_value": value,
                    "setting_type": SettingType::for_key(field.key),
                }))
                .await?;
            }
        }
    }
    Ok(back_to(PAGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn field(key: &'static str, kind: FieldKind) -> SettingField {
        SettingField {
            key,
            label: "",
            help: "",
            kind,
            default: "7",
        }
    }

    #[test]
    fn test_absent_toggle_means_false() {
        let form = HashMap::new();
        let toggle = field("email_notifications", FieldKind::Toggle);
        assert_eq!(submitted_value(&toggle, &form), "false");

        let form: HashMap<String, String> =
            [("email_notifications".to_string(), "on".to_string())].into();
        assert_eq!(submitted_value(&toggle, &form), "true");
    }

    #[test]
    fn test_blank_number_keeps_default() {
        let number = field("payout_delay_days", FieldKind::Number);
        let form: HashMap<String, String> =
            [("payout_delay_days".to_string(), "  ".to_string())].into();
        assert_eq!(submitted_value(&number, &form), "7");

        let form: HashMap<String, String> =
            [("payout_delay_days".to_string(), "5".to_string())].into();
        assert_eq!(submitted_value(&number, &form), "5");
    }

    #[test]
    fn test_stored_values_override_defaults() {
        let stored = vec![PlatformSetting {
            id: "st-1".to_string(),
            setting_key: "marketplace_commission".to_string(),
            setting_value: "12.5".to_string(),
            ..PlatformSetting::default()
        }];
        let sections = section_views(&stored);
        let commission = &sections[0].fields[0];
        assert_eq!(commission.value, "12.5");
        // Everything else falls back to its default.
        assert_eq!(sections[0].fields[1].value, "0.5");
    }
}
