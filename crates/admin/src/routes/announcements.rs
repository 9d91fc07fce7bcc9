//! Platform announcements: list, create/edit forms, delete.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{Announcement, EntityKind};

use crate::components::cards::PageHeader;
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "Announcements";

/// Announcement types with display labels.
pub const ANNOUNCEMENT_TYPES: &[(&str, &str)] = &[
    ("info", "Info"),
    ("warning", "Warning"),
    ("promotion", "Promotion"),
    ("maintenance", "Maintenance"),
    ("update", "Update"),
];

/// Audience segments with display labels.
pub const TARGET_AUDIENCES: &[(&str, &str)] = &[
    ("all", "All Users"),
    ("buyers", "Buyers Only"),
    ("sellers", "Sellers Only"),
    ("verified_sellers", "Verified Sellers"),
];

fn lookup(table: &[(&str, &str)], slug: &str) -> String {
    table
        .iter()
        .find(|(value, _)| *value == slug)
        .map_or_else(|| slug.to_string(), |(_, label)| (*label).to_string())
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("title", "Title"))
        .column(TableColumn::new("type", "Type").kind(CellKind::Badge))
        .column(TableColumn::new("audience", "Audience"))
        .column(TableColumn::new("is_active", "Status").kind(CellKind::Flag {
            on: "active",
            off: "inactive",
        }))
        .column(TableColumn::new("start_date", "Starts").kind(CellKind::Date))
        .column(TableColumn::new("end_date", "Ends").kind(CellKind::Date))
        .column(TableColumn::new("created_date", "Created").kind(CellKind::Date))
        .filter(TableFilter::select(
            "type",
            "Type",
            ANNOUNCEMENT_TYPES
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        ))
        .filter(TableFilter::select(
            "target_audience",
            "Audience",
            TARGET_AUDIENCES
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        ))
        .action(RowAction::link("edit", "Edit", "ph-pencil"))
        .action(RowAction::post("delete", "Delete", "ph-trash").destructive())
        .search_placeholder("Search announcements...")
        .empty_message("No announcements yet")
}

fn to_row(a: &Announcement) -> Value {
    json!({
        "id": a.id,
        "title": a.title,
        "type": a.kind,
        "target_audience": a.target_audience,
        "audience": lookup(TARGET_AUDIENCES, a.target_audience.as_str()),
        "is_active": a.is_active,
        "start_date": a.start_date,
        "end_date": a.end_date,
        "created_date": a.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let announcements: Vec<Announcement> = fetch_or_empty(
        state.entity(EntityKind::Announcement).list_as().await,
        "announcements",
    );

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    let rows: Vec<Value> = announcements.iter().map(to_row).collect();
    let table = config.apply(&rows, &query);

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Announcements",
            "Manage platform announcements and notifications",
        )
        .action("New Announcement", &format!("{}/new", page_url(PAGE))),
        stats: vec![],
        tabs: vec![],
        table,
    };
    render(&page)
}

/// Create/edit form for one announcement.
#[derive(Template)]
#[template(path = "announcements/form.html")]
pub struct AnnouncementFormPage {
    pub shell: Shell,
    pub title: String,
    pub submit_label: String,
    pub action_href: String,
    pub announcement: Announcement,
    pub types: &'static [(&'static str, &'static str)],
    pub audiences: &'static [(&'static str, &'static str)],
}

pub async fn form_new(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = AnnouncementFormPage {
        shell: Shell::new(PAGE, !state.writable()),
        title: "New Announcement".to_string(),
        submit_label: "Create Announcement".to_string(),
        action_href: format!("{}/create", page_url(PAGE)),
        announcement: Announcement {
            is_active: true,
            ..Announcement::default()
        },
        types: ANNOUNCEMENT_TYPES,
        audiences: TARGET_AUDIENCES,
    };
    render(&page)
}

pub async fn form_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let announcement: Announcement = state
        .entity(EntityKind::Announcement)
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("announcement {id}")))?;

    let page = AnnouncementFormPage {
        shell: Shell::new(PAGE, !state.writable()),
        title: "Edit Announcement".to_string(),
        submit_label: "Update Announcement".to_string(),
        action_href: format!("{}/{id}/update", page_url(PAGE)),
        announcement,
        types: ANNOUNCEMENT_TYPES,
        audiences: TARGET_AUDIENCES,
    };
    render(&page)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AnnouncementForm {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target_audience: String,
    pub start_date: String,
    pub end_date: String,
    pub banner_url: String,
    pub is_active: Option<String>,
}

/// Date inputs submit `YYYY-MM-DD`; stored timestamps are RFC 3339.
fn to_timestamp(date: &str) -> Option<String> {
    if date.is_empty() {
        None
    } else {
        Some(format!("{date}T00:00:00Z"))
    }
}

impl AnnouncementForm {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "announcement title and content are required".to_string(),
            ));
        }
        Ok(())
    }

    fn payload(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "content": self.content,
            "type": self.kind,
            "target_audience": self.target_audience,
            "is_active": self.is_active.is_some(),
            "start_date": to_timestamp(&self.start_date),
            "end_date": to_timestamp(&self.end_date),
            "banner_url": (!self.banner_url.is_empty()).then_some(self.banner_url.as_str()),
        })
    }
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AnnouncementForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;
    state
        .entity(EntityKind::Announcement)
        .create(form.payload())
        .await?;
    Ok(back_to(PAGE))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AnnouncementForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;
    state
        .entity(EntityKind::Announcement)
        .update(&id, form.payload())
        .await?;
    Ok(back_to(PAGE))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.entity(EntityKind::Announcement).delete(&id).await?;
    Ok(back_to(PAGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_date_inputs_become_timestamps() {
        assert_eq!(
            to_timestamp("2024-06-01").as_deref(),
            Some("2024-06-01T00:00:00Z")
        );
        assert_eq!(to_timestamp(""), None);
    }

    #[test]
    fn test_payload_checkbox_semantics() {
        let form = AnnouncementForm {
            title: "Maintenance window".to_string(),
            content: "Saturday 02:00 UTC".to_string(),
            kind: "maintenance".to_string(),
            target_audience: "all".to_string(),
            ..AnnouncementForm::default()
        };
        form.validate().unwrap();
        let payload = form.payload();
        // Unchecked checkbox is simply absent from the form body.
        assert_eq!(payload["is_active"], false);
        assert!(payload["start_date"].is_null());
    }
}
