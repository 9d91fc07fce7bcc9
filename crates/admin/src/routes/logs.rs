//! Admin activity audit log.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::{Value, json};

use cardvault_core::{AdminLog, EntityKind, badge_label};

use crate::components::cards::PageHeader;
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, fetch_or_empty, render};

const PAGE: &str = "AdminActivityLogs";

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("action_label", "Action"))
        .column(TableColumn::new("admin_email", "Admin"))
        .column(TableColumn::new("entity_type", "Entity"))
        .column(TableColumn::new("entity_id", "Record").kind(CellKind::Mono))
        .column(TableColumn::new("description", "Description"))
        .column(TableColumn::new("ip_address", "IP Address").kind(CellKind::Mono))
        .column(TableColumn::new("created_date", "Timestamp").kind(CellKind::Date))
        .filter(TableFilter::select(
            "action",
            "Action",
            vec![
                FilterOption::new("create", "Create"),
                FilterOption::new("update", "Update"),
                FilterOption::new("delete", "Delete"),
                FilterOption::new("approve", "Approve"),
                FilterOption::new("reject", "Reject"),
                FilterOption::new("suspend", "Suspend"),
                FilterOption::new("refund", "Refund"),
                FilterOption::new("payout", "Payout"),
            ],
        ))
        .search_placeholder("Search logs...")
        .empty_message("No activity logs")
}

fn to_row(log: &AdminLog) -> Value {
    json!({
        "id": log.id,
        "action": log.action,
        "action_label": badge_label(&log.action),
        "admin_email": log.admin_email,
        "entity_type": log.entity_type,
        "entity_id": log.entity_id,
        "description": log.description,
        "ip_address": log.ip_address,
        "created_date": log.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let mut logs: Vec<AdminLog> = fetch_or_empty(
        state.entity(EntityKind::AdminLog).list_as().await,
        "admin logs",
    );
    // Most recent first.
    logs.sort_by(|a, b| b.created_date.cmp(&a.created_date));

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    let rows: Vec<Value> = logs.iter().map(to_row).collect();
    let table = config.apply(&rows, &query);

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Admin Activity Logs",
            "Track all administrative actions for auditing",
        ),
        stats: vec![],
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
    fn test_action_label_title_cased() {
        let log = AdminLog {
            action: "resolve_dispute".to_string(),
            ..AdminLog::default()
        };
        assert_eq!(to_row(&log)["action_label"], "Resolve Dispute");
    }
}
