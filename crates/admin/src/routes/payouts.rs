//! Seller payout processing and the fee settings pointer page.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{EntityKind, Payout, PayoutStatus, badge_label};
use rust_decimal::Decimal;

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, RowAction, TableColumn, TableQuery,
};
use crate::error::AppError;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, NoticePage, back_to, fetch_or_empty, render};

const PAGE: &str = "PayoutManagement";

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("seller_email", "Seller"))
        .column(TableColumn::new("order_id", "Order").kind(CellKind::Mono))
        .column(TableColumn::new("amount", "Gross").kind(CellKind::Money))
        .column(TableColumn::new("platform_fee", "Fee").kind(CellKind::Money))
        .column(TableColumn::new("net_amount", "Net Payout").kind(CellKind::Money))
        .column(TableColumn::new("payout_method", "Method"))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("scheduled_date", "Scheduled").kind(CellKind::Date))
        .action(RowAction::post("release", "Release Payout", "ph-paper-plane-tilt"))
        .action(RowAction::post("complete", "Mark Completed", "ph-check-circle"))
        .action(RowAction::post("delay", "Delay", "ph-pause-circle").destructive())
        .search_placeholder("Search by seller or order...")
        .empty_message("No payouts found")
}

fn to_row(payout: &Payout) -> Value {
    json!({
        "id": payout.id,
        "seller_email": payout.seller_email,
        "order_id": payout.order_id,
        "amount": payout.amount,
        "platform_fee": payout.platform_fee,
        "net_amount": payout.net_amount,
        "payout_method": badge_label(&payout.payout_method),
        "status": payout.status,
        "scheduled_date": payout.scheduled_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let payouts: Vec<Payout> =
        fetch_or_empty(state.entity(EntityKind::Payout).list_as().await, "payouts");

    let by_status = |status: PayoutStatus| payouts.iter().filter(move |p| p.status == status);
    let pending = by_status(PayoutStatus::Pending).count();
    let processing = by_status(PayoutStatus::Processing).count();
    let completed = by_status(PayoutStatus::Completed).count();
    let delayed = by_status(PayoutStatus::Delayed).count();
    let total_pending: Decimal = by_status(PayoutStatus::Pending).map(|p| p.net_amount).sum();
    let total_completed: Decimal = by_status(PayoutStatus::Completed)
        .map(|p| p.net_amount)
        .sum();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // Payout queue opens on the pending tab.
    let tab = query.tab.clone().unwrap_or_else(|| "pending".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "pending" => by_status(PayoutStatus::Pending).map(to_row).collect(),
        "processing" => by_status(PayoutStatus::Processing).map(to_row).collect(),
        "completed" => by_status(PayoutStatus::Completed).map(to_row).collect(),
        "delayed" => by_status(PayoutStatus::Delayed).map(to_row).collect(),
        _ => payouts.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new(
            "Pending Payouts",
            format!("${total_pending:.2}"),
            "ph-clock",
            Accent::Orange,
        )
        .subtitle(&format!("{pending} sellers")),
        StatCard::new("Processing", processing, "ph-arrows-clockwise", Accent::Blue),
        StatCard::new(
            "Completed",
            format!("${total_completed:.2}"),
            "ph-check-circle",
            Accent::Green,
        ),
        StatCard::new("Delayed", delayed, "ph-pause-circle", Accent::Red),
        StatCard::new("Total Payouts", payouts.len(), "ph-currency-dollar", Accent::Purple),
    ];
    let tabs = vec![
        Tab::new(PAGE, "pending", "Pending", pending, &tab),
        Tab::new(PAGE, "processing", "Processing", processing, &tab),
        Tab::new(PAGE, "completed", "Completed", completed, &tab),
        Tab::new(PAGE, "delayed", "Delayed", delayed, &tab),
        Tab::new(PAGE, "all", "All", payouts.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("Payout Management", "Manage seller payouts and release funds"),
        stats,
        tabs,
        table,
    };
    render(&page)
}

pub async fn release(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Payout)
        .update(&id, json!({ "status": "processing" }))
        .await?;
    Ok(back_to(PAGE))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    state
        .entity(EntityKind::Payout)
        .update(&id, json!({ "status": "completed", "completed_date": today }))
        .await?;
    Ok(back_to(PAGE))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DelayForm {
    pub reason: String,
}

pub async fn delay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DelayForm>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Payout)
        .update(&id, json!({ "status": "delayed", "delay_reason": form.reason }))
        .await?;
    Ok(back_to(PAGE))
}

/// Fee configuration moved to the platform settings page.
pub async fn fees(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = NoticePage {
        shell: Shell::new("FeeSettings", !state.writable()),
        title: "Fee & Commission Settings".to_string(),
        message: "Fee settings have been moved to the main Platform Settings page \
                  for easier management."
            .to_string(),
        link_label: "Go to Platform Settings".to_string(),
        link_href: page_url("PlatformSettings"),
    };
    render(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_method_is_title_cased() {
        let payout = Payout {
            payout_method: "bank_transfer".to_string(),
            ..Payout::default()
        };
        assert_eq!(to_row(&payout)["payout_method"], "Bank Transfer");
    }
}
