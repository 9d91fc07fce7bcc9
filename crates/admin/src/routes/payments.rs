//! Payment transaction monitoring and the refunds pointer page.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde_json::{Value, json};

use cardvault_core::{EntityKind, Payment, PaymentStatus};
use rust_decimal::Decimal;

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, NoticePage, back_to, fetch_or_empty, render, to_rows};

const PAGE: &str = "PaymentManagement";

fn is_pending(payment: &Payment) -> bool {
    matches!(
        payment.status,
        PaymentStatus::Pending | PaymentStatus::Authorized
    )
}

fn is_failed(payment: &Payment) -> bool {
    matches!(
        payment.status,
        PaymentStatus::Failed | PaymentStatus::Chargeback
    )
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("transaction_id", "Transaction").kind(CellKind::Mono))
        .column(TableColumn::new("order_id", "Order").kind(CellKind::Mono))
        .column(TableColumn::new("buyer_email", "Buyer"))
        .column(TableColumn::new("amount", "Amount").kind(CellKind::Money))
        .column(TableColumn::new("payment_method", "Method"))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("fraud_score", "Risk"))
        .column(TableColumn::new("is_flagged", "Flag").kind(CellKind::Flag {
            on: "flagged",
            off: "clean",
        }))
        .column(TableColumn::new("created_date", "Date").kind(CellKind::Date))
        .filter(TableFilter::select(
            "payment_method",
            "Method",
            vec![
                FilterOption::new("card", "Card"),
                FilterOption::new("paypal", "PayPal"),
                FilterOption::new("bank_transfer", "Bank Transfer"),
            ],
        ))
        .action(RowAction::post("flag", "Flag for Review", "ph-flag"))
        .action(RowAction::post("unflag", "Clear Flag", "ph-flag-slash"))
        .search_placeholder("Search by transaction id or buyer...")
        .empty_message("No payments found")
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let payments: Vec<Payment> =
        fetch_or_empty(state.entity(EntityKind::Payment).list_as().await, "payments");

    let pending = payments.iter().filter(|p| is_pending(p)).count();
    let captured: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Captured)
        .collect();
    let failed = payments.iter().filter(|p| is_failed(p)).count();
    let flagged = payments.iter().filter(|p| p.is_flagged).count();
    let total_processed: Decimal = captured.iter().map(|p| p.amount).sum();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    let tab = query.tab.clone().unwrap_or_else(|| "all".to_string());

    let filter_tab = |keep: &dyn Fn(&Payment) -> bool| -> Vec<Payment> {
        payments.iter().filter(|p| keep(p)).cloned().collect()
    };
    let subset = match tab.as_str() {
        "pending" => filter_tab(&is_pending),
        "captured" => filter_tab(&|p: &Payment| p.status == PaymentStatus::Captured),
        "failed" => filter_tab(&is_failed),
        "flagged" => filter_tab(&|p: &Payment| p.is_flagged),
        _ => payments.clone(),
    };
    let table = config.apply(&to_rows(&subset), &query);

    let stats = vec![
        StatCard::new("Total Transactions", payments.len(), "ph-credit-card", Accent::Blue),
        StatCard::new("Pending", pending, "ph-clock", Accent::Orange),
        StatCard::new(
            "Captured",
            format!("${total_processed:.2}"),
            "ph-check-circle",
            Accent::Green,
        ),
        StatCard::new("Failed/Chargeback", failed, "ph-x-circle", Accent::Red),
        StatCard::new("Flagged", flagged, "ph-warning", Accent::Purple),
    ];
    let tabs = vec![
        Tab::new(PAGE, "all", "All", payments.len(), &tab),
        Tab::new(PAGE, "pending", "Pending", pending, &tab),
        Tab::new(PAGE, "captured", "Captured", captured.len(), &tab),
        Tab::new(PAGE, "failed", "Failed", failed, &tab),
        Tab::new(PAGE, "flagged", "Flagged", flagged, &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Payment Management",
            "Monitor and manage all payment transactions",
        ),
        stats,
        tabs,
        table,
    };
    render(&page)
}

pub async fn flag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Payment)
        .update(
            &id,
            json!({ "is_flagged": true, "flag_reason": "Flagged for manual review" }),
        )
        .await?;
    Ok(back_to(PAGE))
}

pub async fn unflag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Payment)
        .update(&id, json!({ "is_flagged": false, "flag_reason": Value::Null }))
        .await?;
    Ok(back_to(PAGE))
}

/// Refunds are issued through dispute resolution, not here.
pub async fn refunds(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = NoticePage {
        shell: Shell::new("RefundManagement", !state.writable()),
        title: "Refund Management".to_string(),
        message: "Refunds are handled through the Dispute Management system. \
                  Open a dispute to process refunds."
            .to_string(),
        link_label: "Go to Dispute Management".to_string(),
        link_href: page_url("DisputeManagement"),
    };
    render(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_buckets() {
        let authorized = Payment {
            status: PaymentStatus::Authorized,
            ..Payment::default()
        };
        let chargeback = Payment {
            status: PaymentStatus::Chargeback,
            ..Payment::default()
        };
        assert!(is_pending(&authorized));
        assert!(!is_failed(&authorized));
        assert!(is_failed(&chargeback));
    }
}
