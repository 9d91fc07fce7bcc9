//! Support ticket queue, conversation view, and admin replies.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{EntityKind, SupportTicket, TicketStatus};

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "SupportTickets";

/// Address stamped on admin replies.
const ADMIN_SENDER: &str = "admin@cardvault.io";

/// Ticket categories with display labels.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("account", "Account"),
    ("order", "Order"),
    ("payment", "Payment"),
    ("listing", "Listing"),
    ("shipping", "Shipping"),
    ("technical", "Technical"),
    ("other", "Other"),
];

fn category_label(slug: &str) -> String {
    CATEGORIES
        .iter()
        .find(|(value, _)| *value == slug)
        .map_or_else(|| slug.to_string(), |(_, label)| (*label).to_string())
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("subject", "Subject"))
        .column(TableColumn::new("user_email", "User"))
        .column(TableColumn::new("category_label", "Category"))
        .column(TableColumn::new("priority", "Priority").kind(CellKind::Badge))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("messages", "Messages"))
        .column(TableColumn::new("created_date", "Created").kind(CellKind::Date))
        .filter(TableFilter::select(
            "category",
            "Category",
            CATEGORIES
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        ))
        .filter(TableFilter::select(
            "priority",
            "Priority",
            vec![
                FilterOption::new("urgent", "Urgent"),
                FilterOption::new("high", "High"),
                FilterOption::new("medium", "Medium"),
                FilterOption::new("low", "Low"),
            ],
        ))
        .action(RowAction::link("view", "View & Reply", "ph-chat-circle"))
        .search_placeholder("Search by subject or user...")
        .empty_message("No support tickets")
}

fn to_row(ticket: &SupportTicket) -> Value {
    json!({
        "id": ticket.id,
        "subject": ticket.subject,
        "user_email": ticket.user_email,
        "category": ticket.category,
        "category_label": category_label(&ticket.category),
        "priority": ticket.priority,
        "status": ticket.status,
        "messages": format!("{} messages", ticket.messages.len()),
        "created_date": ticket.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let tickets: Vec<SupportTicket> = fetch_or_empty(
        state.entity(EntityKind::SupportTicket).list_as().await,
        "support tickets",
    );

    let open = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Open)
        .count();
    let in_progress = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::InProgress)
        .count();
    let waiting = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::WaitingResponse)
        .count();
    let resolved = tickets.iter().filter(|t| t.status.is_settled()).count();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // The support queue opens on unanswered tickets.
    let tab = query.tab.clone().unwrap_or_else(|| "open".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "open" => tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Open)
            .map(to_row)
            .collect(),
        "in_progress" => tickets
            .iter()
            .filter(|t| t.status == TicketStatus::InProgress)
            .map(to_row)
            .collect(),
        "waiting" => tickets
            .iter()
            .filter(|t| t.status == TicketStatus::WaitingResponse)
            .map(to_row)
            .collect(),
        "resolved" => tickets
            .iter()
            .filter(|t| t.status.is_settled())
            .map(to_row)
            .collect(),
        _ => tickets.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("Open", open, "ph-chat-circle", Accent::Blue),
        StatCard::new("In Progress", in_progress, "ph-clock", Accent::Orange),
        StatCard::new("Awaiting Response", waiting, "ph-hourglass", Accent::Purple),
        StatCard::new("Resolved", resolved, "ph-check-circle", Accent::Green),
    ];
    let tabs = vec![
        Tab::new(PAGE, "open", "Open", open, &tab),
        Tab::new(PAGE, "in_progress", "In Progress", in_progress, &tab),
        Tab::new(PAGE, "waiting", "Awaiting Response", waiting, &tab),
        Tab::new(PAGE, "resolved", "Resolved", resolved, &tab),
        Tab::new(PAGE, "all", "All", tickets.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("Support Tickets", "Manage and respond to user support requests"),
        stats,
        tabs,
        table,
    };
    render(&page)
}

/// Conversation view with the reply box and a status selector.
#[derive(Template)]
#[template(path = "tickets/detail.html")]
pub struct TicketDetailPage {
    pub shell: Shell,
    pub ticket: SupportTicket,
    pub category: String,
    pub reply_href: String,
    pub status_href: String,
    pub back_href: String,
    pub statuses: Vec<(&'static str, &'static str, bool)>,
}

fn status_options(current: TicketStatus) -> Vec<(&'static str, &'static str, bool)> {
    [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::WaitingResponse,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ]
    .into_iter()
    .map(|status| {
        (
            status.as_str(),
            match status {
                TicketStatus::Open => "Open",
                TicketStatus::InProgress => "In Progress",
                TicketStatus::WaitingResponse => "Waiting Response",
                TicketStatus::Resolved => "Resolved",
                TicketStatus::Closed => "Closed",
            },
            status == current,
        )
    })
    .collect()
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let ticket: SupportTicket = state
        .entity(EntityKind::SupportTicket)
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("ticket {id}")))?;

    let page = TicketDetailPage {
        shell: Shell::new(PAGE, !state.writable()),
        category: category_label(&ticket.category),
        reply_href: format!("{}/{id}/reply", page_url(PAGE)),
        status_href: format!("{}/{id}/status", page_url(PAGE)),
        back_href: page_url(PAGE),
        statuses: status_options(ticket.status),
        ticket,
    };
    render(&page)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReplyForm {
    pub content: String,
}

/// Appends the admin message to the thread and hands the ticket back to
/// the user (`waiting_response`).
pub async fn reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReplyForm>,
) -> Result<Redirect, AppError> {
    if form.content.trim().is_empty() {
        return Err(AppError::BadRequest("reply cannot be empty".to_string()));
    }

    let api = state.entity(EntityKind::SupportTicket);
    let ticket: SupportTicket = api
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("ticket {id}")))?;

    let mut messages: Vec<Value> = ticket
        .messages
        .iter()
        .filter_map(|m| serde_json::to_value(m).ok())
        .collect();
    messages.push(json!({
        "sender": ADMIN_SENDER,
        "content": form.content,
        "timestamp": chrono::Utc::now(),
        "is_admin": true,
    }));

    api.update(
        &id,
        json!({ "messages": messages, "status": "waiting_response" }),
    )
    .await?;
    Ok(Redirect::to(&format!("{}/{id}/view", page_url(PAGE))))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StatusForm {
    pub status: String,
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let known = [
        "open",
        "in_progress",
        "waiting_response",
        "resolved",
        "closed",
    ];
    if !known.contains(&form.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unknown ticket status: {}",
            form.status
        )));
    }
    state
        .entity(EntityKind::SupportTicket)
        .update(&id, json!({ "status": form.status }))
        .await?;
    Ok(Redirect::to(&format!("{}/{id}/view", page_url(PAGE))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_falls_back_to_slug() {
        assert_eq!(category_label("shipping"), "Shipping");
        assert_eq!(category_label("billing"), "billing");
    }

    #[test]
    fn test_status_options_mark_current() {
        let options = status_options(TicketStatus::InProgress);
        let selected: Vec<&str> = options
            .iter()
            .filter(|(_, _, selected)| *selected)
            .map(|(value, _, _)| *value)
            .collect();
        assert_eq!(selected, vec!["in_progress"]);
    }

    #[test]
    fn test_row_counts_messages() {
        let ticket = SupportTicket {
            messages: vec![cardvault_core::TicketMessage::default(); 2],
            ..SupportTicket::default()
        };
        assert_eq!(to_row(&ticket)["messages"], "2 messages");
    }
}
