//! Fraud alert triage and the static security log page.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{AlertSeverity, AlertStatus, EntityKind, FraudAlert};

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "FraudMonitoring";

/// Known alert types and their display labels.
pub const ALERT_TYPES: &[(&str, &str)] = &[
    ("suspicious_listing", "Suspicious Listing"),
    ("price_anomaly", "Price Anomaly"),
    ("multiple_accounts", "Multiple Accounts"),
    ("scan_anomaly", "Scan Anomaly"),
    ("volume_spike", "Volume Spike"),
    ("chargeback", "Chargeback"),
    ("ip_mismatch", "IP Mismatch"),
];

fn alert_type_label(slug: &str) -> String {
    ALERT_TYPES
        .iter()
        .find(|(value, _)| *value == slug)
        .map_or_else(
            || cardvault_core::badge_label(slug),
            |(_, label)| (*label).to_string(),
        )
}

fn is_critical(alert: &FraudAlert) -> bool {
    matches!(alert.severity, AlertSeverity::Critical | AlertSeverity::High)
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("alert", "Alert Type"))
        .column(TableColumn::new("severity", "Severity").kind(CellKind::Badge))
        .column(TableColumn::new("user_email", "User"))
        .column(TableColumn::new("description", "Description"))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("created_date", "Detected").kind(CellKind::Date))
        .filter(TableFilter::select(
            "severity",
            "Severity",
            vec![
                FilterOption::new("critical", "Critical"),
                FilterOption::new("high", "High"),
                FilterOption::new("medium", "Medium"),
                FilterOption::new("low", "Low"),
            ],
        ))
        .filter(TableFilter::select(
            "alert_type",
            "Type",
            ALERT_TYPES
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        ))
        .action(RowAction::post("investigate", "Investigate", "ph-magnifying-glass"))
        .action(RowAction::post("resolve", "Mark Resolved", "ph-check-circle"))
        .action(RowAction::post("dismiss", "Dismiss", "ph-x-circle").destructive())
        .search_placeholder("Search by user or description...")
        .empty_message("No fraud alerts")
}

fn to_row(alert: &FraudAlert) -> Value {
    json!({
        "id": alert.id,
        "alert": alert_type_label(&alert.alert_type),
        "alert_type": alert.alert_type,
        "severity": alert.severity,
        "user_email": alert.user_email,
        "description": alert.description,
        "status": alert.status,
        "created_date": alert.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let alerts: Vec<FraudAlert> = fetch_or_empty(
        state.entity(EntityKind::FraudAlert).list_as().await,
        "fraud alerts",
    );

    let new = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::New)
        .count();
    let investigating = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::Investigating)
        .count();
    let critical = alerts.iter().filter(|a| is_critical(a)).count();
    let resolved = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::Resolved)
        .count();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // Triage opens on the new-alert queue.
    let tab = query.tab.clone().unwrap_or_else(|| "new".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "new" => alerts
            .iter()
            .filter(|a| a.status == AlertStatus::New)
            .map(to_row)
            .collect(),
        "investigating" => alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Investigating)
            .map(to_row)
            .collect(),
        "critical" => alerts.iter().filter(|a| is_critical(a)).map(to_row).collect(),
        "resolved" => alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Resolved)
            .map(to_row)
            .collect(),
        _ => alerts.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("New Alerts", new, "ph-bell-ringing", Accent::Red),
        StatCard::new("Investigating", investigating, "ph-magnifying-glass", Accent::Orange),
        StatCard::new("Critical/High", critical, "ph-warning", Accent::Purple),
        StatCard::new("Resolved", resolved, "ph-check-circle", Accent::Green),
    ];
    let tabs = vec![
        Tab::new(PAGE, "new", "New", new, &tab),
        Tab::new(PAGE, "investigating", "Investigating", investigating, &tab),
        Tab::new(PAGE, "critical", "Critical", critical, &tab),
        Tab::new(PAGE, "resolved", "Resolved", resolved, &tab),
        Tab::new(PAGE, "all", "All", alerts.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("Fraud Monitoring", "Monitor and investigate suspicious activity"),
        stats,
        tabs,
        table,
    };
    render(&page)
}

pub async fn investigate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::FraudAlert)
        .update(&id, json!({ "status": "investigating" }))
        .await?;
    Ok(back_to(PAGE))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResolveForm {
    pub notes: String,
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ResolveForm>,
) -> Result<Redirect, AppError> {
    let mut payload = json!({ "status": "resolved" });
    if !form.notes.trim().is_empty() {
        payload["resolution_notes"] = json!(form.notes);
    }
    state.entity(EntityKind::FraudAlert).update(&id, payload).await?;
    Ok(back_to(PAGE))
}

pub async fn dismiss(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::FraudAlert)
        .update(&id, json!({ "status": "dismissed" }))
        .await?;
    Ok(back_to(PAGE))
}

/// Static sample of auth-provider security events. Real login telemetry
/// stays with the auth provider and is not ingested here.
fn security_events() -> Vec<Value> {
    let now = chrono::Utc::now();
    let hour = chrono::Duration::hours(1);
    json!([
        {
            "id": "1",
            "event": "login_success",
            "user_email": "user@example.com",
            "ip_address": "192.168.1.1",
            "device": "Chrome on Windows",
            "location": "New York, US",
            "created_date": now,
        },
        {
            "id": "2",
            "event": "login_failed",
            "user_email": "test@example.com",
            "ip_address": "10.0.0.1",
            "device": "Firefox on Mac",
            "location": "London, UK",
            "created_date": now - hour,
        },
        {
            "id": "3",
            "event": "account_locked",
            "user_email": "blocked@example.com",
            "ip_address": "172.16.0.1",
            "device": "Mobile Safari",
            "location": "Unknown",
            "created_date": now - hour - hour,
        }
    ])
    .as_array()
    .cloned()
    .unwrap_or_default()
}

fn security_config() -> DataTableConfig {
    DataTableConfig::new(&page_url("SecurityLogs"))
        .column(TableColumn::new("event", "Event").kind(CellKind::Badge))
        .column(TableColumn::new("user_email", "User"))
        .column(TableColumn::new("ip_address", "IP Address").kind(CellKind::Mono))
        .column(TableColumn::new("device", "Device"))
        .column(TableColumn::new("location", "Location"))
        .column(TableColumn::new("created_date", "Timestamp").kind(CellKind::Date))
        .search_placeholder("Search by user or IP...")
        .empty_message("No security events")
}

pub async fn security_logs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let events = security_events();
    let config = security_config();
    let query = TableQuery::from_params(&config, &params);
    let table = config.apply(&events, &query);

    let page = EntityPage {
        shell: Shell::new("SecurityLogs", !state.writable()),
        header: PageHeader::new(
            "Security Logs",
            "Monitor login attempts, IP addresses, and device activity",
        ),
        stats: vec![
            StatCard::new("Login Attempts (24h)", "1,234", "ph-sign-in", Accent::Blue),
            StatCard::new("Failed Logins (24h)", 23, "ph-warning", Accent::Red),
            StatCard::new("Unique IPs (24h)", 456, "ph-globe", Accent::Purple),
            StatCard::new("Locked Accounts", 3, "ph-lock", Accent::Orange),
        ],
        tabs: vec![],
        table,
    };
    render(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_type_label_falls_back_to_title_case() {
        assert_eq!(alert_type_label("price_anomaly"), "Price Anomaly");
        assert_eq!(alert_type_label("brand_new_vector"), "Brand New Vector");
    }

    #[test]
    fn test_critical_bucket_includes_high() {
        let high = FraudAlert {
            severity: AlertSeverity::High,
            ..FraudAlert::default()
        };
        let medium = FraudAlert {
            severity: AlertSeverity::Medium,
            ..FraudAlert::default()
        };
        assert!(is_critical(&high));
        assert!(!is_critical(&medium));
    }

    #[test]
    fn test_security_events_are_wellformed() {
        let events = security_events();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.get("id").is_some()));
    }
}
