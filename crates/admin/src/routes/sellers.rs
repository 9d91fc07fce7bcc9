//! Seller KYC review: verification queue and per-seller detail page.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{EntityKind, RiskLevel, Seller, VerificationStatus};

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, RowAction, TableColumn, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "SellerVerification";

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("business_name", "Seller"))
        .column(TableColumn::new("user_email", "Email"))
        .column(TableColumn::new("verification_status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("risk_level", "Risk Level").kind(CellKind::Badge))
        .column(TableColumn::new("documents", "Documents"))
        .column(TableColumn::new("total_sales", "Total Sales").kind(CellKind::Money))
        .column(TableColumn::new("created_date", "Applied").kind(CellKind::Date))
        .action(RowAction::link("view", "View Details", "ph-eye"))
        .action(RowAction::post("approve", "Approve", "ph-check-circle"))
        .action(RowAction::post("reject", "Reject", "ph-x-circle").destructive())
        .search_placeholder("Search sellers...")
        .empty_message("No pending verifications")
}

fn to_row(seller: &Seller) -> Value {
    json!({
        "id": seller.id,
        "business_name": seller.business_name,
        "user_email": seller.user_email,
        "verification_status": seller.verification_status,
        "risk_level": seller.risk_level,
        "documents": format!("{} files", seller.kyc_documents.len()),
        "total_sales": seller.total_sales,
        "created_date": seller.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let sellers: Vec<Seller> =
        fetch_or_empty(state.entity(EntityKind::Seller).list_as().await, "sellers");

    let by_status = |status: VerificationStatus| {
        sellers
            .iter()
            .filter(move |s| s.verification_status == status)
    };
    let pending = by_status(VerificationStatus::Pending).count();
    let approved = by_status(VerificationStatus::Approved).count();
    let rejected = by_status(VerificationStatus::Rejected).count();
    let high_risk = sellers
        .iter()
        .filter(|s| s.risk_level == RiskLevel::High)
        .count();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // The verification queue opens on the pending tab.
    let tab = query.tab.clone().unwrap_or_else(|| "pending".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "pending" => by_status(VerificationStatus::Pending).map(to_row).collect(),
        "approved" => by_status(VerificationStatus::Approved).map(to_row).collect(),
        "rejected" => by_status(VerificationStatus::Rejected).map(to_row).collect(),
        "high-risk" => sellers
            .iter()
            .filter(|s| s.risk_level == RiskLevel::High)
            .map(to_row)
            .collect(),
        _ => sellers.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("Pending Review", pending, "ph-clock", Accent::Orange),
        StatCard::new("Approved Sellers", approved, "ph-check-circle", Accent::Green),
        StatCard::new("Rejected", rejected, "ph-x-circle", Accent::Red),
        StatCard::new("High Risk", high_risk, "ph-warning", Accent::Purple),
    ];
    let tabs = vec![
        Tab::new(PAGE, "pending", "Pending", pending, &tab),
        Tab::new(PAGE, "approved", "Approved", approved, &tab),
        Tab::new(PAGE, "rejected", "Rejected", rejected, &tab),
        Tab::new(PAGE, "high-risk", "High Risk", high_risk, &tab),
        Tab::new(PAGE, "all", "All", sellers.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("Seller Verification", "Review and verify seller KYC documents"),
        stats,
        tabs,
        table,
    };
    render(&page)
}

/// Per-seller review page: account info, risk assessment, submitted
/// documents, and the approve/reject form for pending applications.
#[derive(Template)]
#[template(path = "sellers/detail.html")]
pub struct SellerDetailPage {
    pub shell: Shell,
    pub seller: Seller,
    pub is_pending: bool,
    pub approve_href: String,
    pub reject_href: String,
    pub back_href: String,
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let seller: Seller = state
        .entity(EntityKind::Seller)
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("seller {id}")))?;

    let page = SellerDetailPage {
        shell: Shell::new(PAGE, !state.writable()),
        is_pending: seller.verification_status == VerificationStatus::Pending,
        approve_href: format!("{}/{id}/approve", page_url(PAGE)),
        reject_href: format!("{}/{id}/reject", page_url(PAGE)),
        back_href: page_url(PAGE),
        seller,
    };
    render(&page)
}

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Seller)
        .update(&id, json!({ "verification_status": "approved" }))
        .await?;
    Ok(back_to(PAGE))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RejectForm {
    pub reason: String,
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RejectForm>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Seller)
        .update(
            &id,
            json!({
                "verification_status": "rejected",
                "notes": form.reason,
            }),
        )
        .await?;
    Ok(back_to(PAGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_counts_documents() {
        let seller = Seller {
            id: "s-1".to_string(),
            kyc_documents: vec![cardvault_core::KycDocument::default(); 3],
            ..Seller::default()
        };
        let row = to_row(&seller);
        assert_eq!(row["documents"], "3 files");
    }
}
