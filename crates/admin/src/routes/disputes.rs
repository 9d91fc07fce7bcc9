//! Dispute resolution: queue, detail page, and the resolution form.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{Dispute, DisputeStatus, EntityKind};

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, RowAction, TableColumn, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "DisputeManagement";

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("type", "Dispute Type"))
        .column(TableColumn::new("buyer_email", "Buyer"))
        .column(TableColumn::new("seller_email", "Seller"))
        .column(TableColumn::new("order_id", "Order").kind(CellKind::Mono))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("refund_amount", "Refund").kind(CellKind::Money))
        .column(TableColumn::new("created_date", "Opened").kind(CellKind::Date))
        .action(RowAction::link("view", "View Details", "ph-eye"))
        .action(RowAction::post("review", "Start Review", "ph-magnifying-glass"))
        .search_placeholder("Search by buyer, seller, or order...")
        .empty_message("No disputes found")
}

fn to_row(dispute: &Dispute) -> Value {
    json!({
        "id": dispute.id,
        "type": dispute.kind.label(),
        "buyer_email": dispute.buyer_email,
        "seller_email": dispute.seller_email,
        "order_id": dispute.order_id,
        "status": dispute.status,
        "refund_amount": dispute.refund_amount,
        "created_date": dispute.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let disputes: Vec<Dispute> =
        fetch_or_empty(state.entity(EntityKind::Dispute).list_as().await, "disputes");

    let open = disputes
        .iter()
        .filter(|d| d.status == DisputeStatus::Open)
        .count();
    let under_review = disputes
        .iter()
        .filter(|d| d.status == DisputeStatus::UnderReview)
        .count();
    let resolved = disputes.iter().filter(|d| d.status.is_resolved()).count();
    let total_refunded: Decimal = disputes.iter().filter_map(|d| d.refund_amount).sum();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // Disputes open on the open queue.
    let tab = query.tab.clone().unwrap_or_else(|| "open".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "open" => disputes
            .iter()
            .filter(|d| d.status == DisputeStatus::Open)
            .map(to_row)
            .collect(),
        "review" => disputes
            .iter()
            .filter(|d| d.status == DisputeStatus::UnderReview)
            .map(to_row)
            .collect(),
        "resolved" => disputes
            .iter()
            .filter(|d| d.status.is_resolved())
            .map(to_row)
            .collect(),
        _ => disputes.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("Open Disputes", open, "ph-warning", Accent::Red),
        StatCard::new("Under Review", under_review, "ph-magnifying-glass", Accent::Orange),
        StatCard::new("Resolved", resolved, "ph-check-circle", Accent::Green),
        StatCard::new(
            "Total Refunded",
            format!("${total_refunded:.2}"),
            "ph-currency-dollar",
            Accent::Purple,
        ),
    ];
    let tabs = vec![
        Tab::new(PAGE, "open", "Open", open, &tab),
        Tab::new(PAGE, "review", "Under Review", under_review, &tab),
        Tab::new(PAGE, "resolved", "Resolved", resolved, &tab),
        Tab::new(PAGE, "all", "All", disputes.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Dispute Management",
            "Resolve buyer vs seller disputes and issue refunds",
        ),
        stats,
        tabs,
        table,
    };
    render(&page)
}

/// Dispute detail: parties, description, evidence, and the resolution
/// form while the dispute is still open or under review.
#[derive(Template)]
#[template(path = "disputes/detail.html")]
pub struct DisputeDetailPage {
    pub shell: Shell,
    pub dispute: Dispute,
    pub kind_label: &'static str,
    pub can_resolve: bool,
    pub resolve_href: String,
    pub back_href: String,
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let dispute: Dispute = state
        .entity(EntityKind::Dispute)
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("dispute {id}")))?;

    let page = DisputeDetailPage {
        shell: Shell::new(PAGE, !state.writable()),
        kind_label: dispute.kind.label(),
        can_resolve: matches!(
            dispute.status,
            DisputeStatus::Open | DisputeStatus::UnderReview
        ),
        resolve_href: format!("{}/{id}/resolve", page_url(PAGE)),
        back_href: page_url(PAGE),
        dispute,
    };
    render(&page)
}

pub async fn start_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Dispute)
        .update(&id, json!({ "status": "under_review" }))
        .await?;
    Ok(back_to(PAGE))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResolveForm {
    pub decision: String,
    pub resolution: String,
    pub refund_amount: String,
}

impl ResolveForm {
    /// The refund only applies when the buyer wins; any other decision
    /// zeroes it out.
    fn payload(&self) -> Result<Value, AppError> {
        match self.decision.as_str() {
            "resolved_buyer" | "resolved_seller" | "closed" => {}
            other => {
                return Err(AppError::BadRequest(format!(
                    "unknown dispute decision: {other}"
                )));
            }
        }
        // Closing without resolution needs no notes; resolving does.
        if self.decision != "closed" && self.resolution.trim().is_empty() {
            return Err(AppError::BadRequest(
                "resolution notes are required".to_string(),
            ));
        }
        let refund = if self.decision == "resolved_buyer" {
            self.refund_amount.trim().parse::<Decimal>().unwrap_or_default()
        } else {
            Decimal::ZERO
        };
        Ok(json!({
            "status": self.decision,
            "resolution": self.resolution,
            "refund_amount": refund,
        }))
    }
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ResolveForm>,
) -> Result<Redirect, AppError> {
    let payload = form.payload()?;
    state.entity(EntityKind::Dispute).update(&id, payload).await?;
    Ok(back_to(PAGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_only_issued_to_buyer() {
        let form = ResolveForm {
            decision: "resolved_seller".to_string(),
            resolution: "Tracking shows delivery".to_string(),
            refund_amount: "45.00".to_string(),
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload["refund_amount"], json!(0.0));

        let form = ResolveForm {
            decision: "resolved_buyer".to_string(),
            resolution: "Item never arrived".to_string(),
            refund_amount: "45.00".to_string(),
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload["status"], "resolved_buyer");
        assert_eq!(payload["refund_amount"], json!(45.0));
    }

    #[test]
    fn test_resolution_notes_required_unless_closing() {
        let form = ResolveForm {
            decision: "resolved_buyer".to_string(),
            ..ResolveForm::default()
        };
        assert!(form.payload().is_err());

        let form = ResolveForm {
            decision: "closed".to_string(),
            ..ResolveForm::default()
        };
        assert!(form.payload().is_ok());
    }

    #[test]
    fn test_unknown_decision_rejected() {
        let form = ResolveForm {
            decision: "split_the_difference".to_string(),
            resolution: "half each".to_string(),
            refund_amount: String::new(),
        };
        assert!(form.payload().is_err());
    }
}
