//! Order tracking and fulfillment status updates.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{EntityKind, Order, OrderStatus};
use rust_decimal::Decimal;

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "OrderManagement";

/// Processing covers orders that are paid for but not yet shipped.
fn is_processing(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Pending | OrderStatus::Paid)
}

/// Problem orders need admin attention.
fn is_problem(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Disputed | OrderStatus::Cancelled)
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("order_number", "Order"))
        .column(TableColumn::new("card_name", "Card"))
        .column(TableColumn::new("buyer_email", "Buyer"))
        .column(TableColumn::new("seller_email", "Seller"))
        .column(TableColumn::new("total", "Total").kind(CellKind::Money))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("tracking", "Tracking"))
        .column(TableColumn::new("created_date", "Date").kind(CellKind::Date))
        .filter(TableFilter::select(
            "status",
            "Status",
            vec![
                FilterOption::new("pending", "Pending"),
                FilterOption::new("paid", "Paid"),
                FilterOption::new("shipped", "Shipped"),
                FilterOption::new("delivered", "Delivered"),
                FilterOption::new("cancelled", "Cancelled"),
                FilterOption::new("disputed", "Disputed"),
            ],
        ))
        .action(RowAction::post("ship", "Mark Shipped", "ph-truck"))
        .action(RowAction::post("deliver", "Mark Delivered", "ph-check-circle"))
        .search_placeholder("Search by order number, card, or email...")
        .empty_message("No orders found")
}

fn to_row(order: &Order) -> Value {
    let tracking = match (&order.tracking_number, &order.shipping_carrier) {
        (Some(number), Some(carrier)) => format!("{number} ({carrier})"),
        (Some(number), None) => number.clone(),
        _ => "Not shipped".to_string(),
    };
    json!({
        "id": order.id,
        "order_number": order.order_number,
        "card_name": order.card_name,
        "buyer_email": order.buyer_email,
        "seller_email": order.seller_email,
        "total": order.total,
        "status": order.status,
        "tracking": tracking,
        "created_date": order.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let orders: Vec<Order> =
        fetch_or_empty(state.entity(EntityKind::Order).list_as().await, "orders");

    let processing = orders.iter().filter(|o| is_processing(o)).count();
    let shipped = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Shipped)
        .count();
    let delivered = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .count();
    let problems = orders.iter().filter(|o| is_problem(o)).count();
    let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    let tab = query.tab.clone().unwrap_or_else(|| "all".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "processing" => orders.iter().filter(|o| is_processing(o)).map(to_row).collect(),
        "shipped" => orders
            .iter()
            .filter(|o| o.status == OrderStatus::Shipped)
            .map(to_row)
            .collect(),
        "delivered" => orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(to_row)
            .collect(),
        "problems" => orders.iter().filter(|o| is_problem(o)).map(to_row).collect(),
        _ => orders.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("Total Orders", orders.len(), "ph-package", Accent::Blue),
        StatCard::new("Processing", processing, "ph-clock", Accent::Orange),
        StatCard::new("Shipped", shipped, "ph-truck", Accent::Cyan),
        StatCard::new("Delivered", delivered, "ph-check-circle", Accent::Green),
        StatCard::new(
            "Total Revenue",
            format!("${total_revenue:.2}"),
            "ph-currency-dollar",
            Accent::Purple,
        ),
    ];
    let tabs = vec![
        Tab::new(PAGE, "all", "All Orders", orders.len(), &tab),
        Tab::new(PAGE, "processing", "Processing", processing, &tab),
        Tab::new(PAGE, "shipped", "Shipped", shipped, &tab),
        Tab::new(PAGE, "delivered", "Delivered", delivered, &tab),
        Tab::new(PAGE, "problems", "Problems", problems, &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("Order Management", "Track and manage all marketplace orders"),
        stats,
        tabs,
        table,
    };
    render(&page)
}

pub async fn mark_shipped(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Order)
        .update(&id, json!({ "status": "shipped" }))
        .await?;
    Ok(back_to(PAGE))
}

pub async fn mark_delivered(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Order)
        .update(&id, json!({ "status": "delivered" }))
        .await?;
    Ok(back_to(PAGE))
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

fn parse_status(raw: &str) -> Result<OrderStatus, AppError> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| AppError::BadRequest(format!("unknown order status: {raw}")))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let status = parse_status(&form.status)?;
    state
        .entity(EntityKind::Order)
        .update(&id, json!({ "status": status }))
        .await?;
    Ok(back_to(PAGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_wire_values() {
        assert_eq!(parse_status("shipped").unwrap(), OrderStatus::Shipped);
        assert!(parse_status("teleported").is_err());
    }

    #[test]
    fn test_tracking_cell_falls_back_when_unshipped() {
        let order = Order::default();
        assert_eq!(to_row(&order)["tracking"], "Not shipped");

        let order = Order {
            tracking_number: Some("1Z999".to_string()),
            shipping_carrier: Some("UPS".to_string()),
            ..Order::default()
        };
        assert_eq!(to_row(&order)["tracking"], "1Z999 (UPS)");
    }

    #[test]
    fn test_processing_and_problem_buckets() {
        let paid = Order {
            status: OrderStatus::Paid,
            ..Order::default()
        };
        let disputed = Order {
            status: OrderStatus::Disputed,
            ..Order::default()
        };
        assert!(is_processing(&paid));
        assert!(!is_problem(&paid));
        assert!(is_problem(&disputed));
        assert!(!is_processing(&disputed));
    }
}
