//! Marketplace listing moderation, category management, and the pricing
//! engine reference page.

use std::collections::HashMap;

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use cardvault_core::{CardCategory, EntityKind, Listing, ListingStatus, badge_label};
use rust_decimal::Decimal;

use crate::components::cards::{Accent, PageHeader, StatCard, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "ListingManagement";

/// Supported trading-card game categories and their display labels.
pub const TCG_CATEGORIES: &[(&str, &str)] = &[
    ("pokemon", "Pokémon"),
    ("mtg", "Magic: The Gathering"),
    ("yugioh", "Yu-Gi-Oh!"),
    ("one_piece", "One Piece"),
    ("disney_lorcana", "Disney Lorcana"),
    ("other", "Other"),
];

fn category_label(slug: &str) -> String {
    TCG_CATEGORIES
        .iter()
        .find(|(value, _)| *value == slug)
        .map_or_else(|| slug.to_string(), |(_, label)| (*label).to_string())
}

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("card_name", "Card"))
        .column(TableColumn::new("card_set", "Set"))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::new("price", "Price").kind(CellKind::Money))
        .column(TableColumn::new("market_price", "Market").kind(CellKind::Money))
        .column(TableColumn::new("condition", "Condition"))
        .column(TableColumn::new("seller_email", "Seller"))
        .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
        .column(TableColumn::new("is_flagged", "Flag").kind(CellKind::Flag {
            on: "flagged",
            off: "clean",
        }))
        .column(TableColumn::new("created_date", "Listed").kind(CellKind::Date))
        .filter(TableFilter::select(
            "tcg_category",
            "Category",
            TCG_CATEGORIES
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        ))
        .filter(TableFilter::select(
            "status",
            "Status",
            vec![
                FilterOption::new("pending", "Pending"),
                FilterOption::new("approved", "Approved"),
                FilterOption::new("rejected", "Rejected"),
                FilterOption::new("sold", "Sold"),
            ],
        ))
        .action(RowAction::post("approve", "Approve", "ph-check-circle"))
        .action(RowAction::post("reject", "Reject", "ph-x-circle").destructive())
        .action(RowAction::post("delete", "Delete", "ph-trash").destructive())
        .selectable()
        .search_placeholder("Search by card name, set, or seller...")
        .empty_message("No listings found")
}

fn to_row(listing: &Listing) -> Value {
    json!({
        "id": listing.id,
        "card_name": listing.card_name,
        "card_set": listing.card_set,
        "tcg_category": listing.tcg_category,
        "category": category_label(&listing.tcg_category),
        "price": listing.price,
        "market_price": listing.market_price,
        "condition": badge_label(&listing.condition),
        "seller_email": listing.seller_email,
        "status": listing.status,
        "is_flagged": listing.is_flagged,
        "created_date": listing.created_date,
    })
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let listings: Vec<Listing> =
        fetch_or_empty(state.entity(EntityKind::Listing).list_as().await, "listings");

    let pending = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Pending)
        .count();
    let approved = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Approved)
        .count();
    let flagged = listings.iter().filter(|l| l.is_flagged).count();
    let total_value: Decimal = listings
        .iter()
        .map(|l| l.price * Decimal::from(l.quantity.max(1)))
        .sum();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    // Moderation queue opens on the pending tab.
    let tab = query.tab.clone().unwrap_or_else(|| "pending".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "pending" => listings
            .iter()
            .filter(|l| l.status == ListingStatus::Pending)
            .map(to_row)
            .collect(),
        "approved" => listings
            .iter()
            .filter(|l| l.status == ListingStatus::Approved)
            .map(to_row)
            .collect(),
        "flagged" => listings
            .iter()
            .filter(|l| l.is_flagged)
            .map(to_row)
            .collect(),
        _ => listings.iter().map(to_row).collect(),
    };
    let table = config.apply(&subset, &query);

    let stats = vec![
        StatCard::new("Pending Review", pending, "ph-clock", Accent::Orange),
        StatCard::new("Active Listings", approved, "ph-shopping-bag", Accent::Green),
        StatCard::new("Flagged Listings", flagged, "ph-warning", Accent::Red),
        StatCard::new(
            "Total Value",
            format!("${total_value:.2}"),
            "ph-currency-dollar",
            Accent::Purple,
        ),
    ];
    let tabs = vec![
        Tab::new(PAGE, "pending", "Pending", pending, &tab),
        Tab::new(PAGE, "approved", "Approved", approved, &tab),
        Tab::new(PAGE, "flagged", "Flagged", flagged, &tab),
        Tab::new(PAGE, "all", "All", listings.len(), &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new(
            "Listing Management",
            "Review, approve, and manage marketplace listings",
        ),
        stats,
        tabs,
        table,
    };
    render(&page)
}

/// Approval clears any fraud flag along with setting the status.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .entity(EntityKind::Listing)
        .update(&id, json!({ "status": "approved", "is_flagged": false }))
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
        .entity(EntityKind::Listing)
        .update(
            &id,
            json!({ "status": "rejected", "rejection_reason": form.reason }),
        )
        .await?;
    Ok(back_to(PAGE))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.entity(EntityKind::Listing).delete(&id).await?;
    Ok(back_to(PAGE))
}

/// Category card grid with expandable set lists.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesPage {
    pub shell: Shell,
    pub header: PageHeader,
    pub categories: Vec<CardCategory>,
    pub edit_base: String,
    pub delete_base: String,
}

pub async fn categories(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let categories: Vec<CardCategory> = fetch_or_empty(
        state.entity(EntityKind::CardCategory).list_as().await,
        "card categories",
    );

    let base = page_url("CategoryManagement");
    let page = CategoriesPage {
        shell: Shell::new("CategoryManagement", !state.writable()),
        header: PageHeader::new("Category Management", "Manage TCG categories and card sets")
            .action("Add Category", &format!("{base}/new")),
        categories,
        edit_base: base.clone(),
        delete_base: base,
    };
    render(&page)
}

/// Create/edit form for one category.
#[derive(Template)]
#[template(path = "categories/form.html")]
pub struct CategoryFormPage {
    pub shell: Shell,
    pub title: String,
    pub submit_label: String,
    pub action_href: String,
    pub category: CardCategory,
}

pub async fn category_new(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = CategoryFormPage {
        shell: Shell::new("CategoryManagement", !state.writable()),
        title: "New Category".to_string(),
        submit_label: "Create Category".to_string(),
        action_href: format!("{}/create", page_url("CategoryManagement")),
        category: CardCategory::default(),
    };
    render(&page)
}

pub async fn category_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let category: CardCategory = state
        .entity(EntityKind::CardCategory)
        .get_as(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    let page = CategoryFormPage {
        shell: Shell::new("CategoryManagement", !state.writable()),
        title: "Edit Category".to_string(),
        submit_label: "Update Category".to_string(),
        action_href: format!("{}/{id}/update", page_url("CategoryManagement")),
        category,
    };
    render(&page)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon_url: String,
    pub is_active: Option<String>,
}

impl CategoryForm {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(AppError::BadRequest(
                "category name and slug are required".to_string(),
            ));
        }
        Ok(())
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "slug": self.slug.trim(),
            "description": self.description,
            "icon_url": (!self.icon_url.is_empty()).then_some(self.icon_url.as_str()),
            "is_active": self.is_active.is_some(),
        })
    }
}

pub async fn category_create(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;
    let mut payload = form.payload();
    payload["sets"] = json!([]);
    state.entity(EntityKind::CardCategory).create(payload).await?;
    Ok(back_to("CategoryManagement"))
}

/// Sets are managed upstream; the update payload leaves them untouched.
pub async fn category_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;
    state
        .entity(EntityKind::CardCategory)
        .update(&id, form.payload())
        .await?;
    Ok(back_to("CategoryManagement"))
}

pub async fn category_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.entity(EntityKind::CardCategory).delete(&id).await?;
    Ok(back_to("CategoryManagement"))
}

/// One external pricing source shown on the pricing engine page.
pub struct PricingSource {
    pub name: &'static str,
    pub status: &'static str,
    pub last_sync: &'static str,
    pub records: &'static str,
}

/// Pricing engine reference page. The integrations shown are mock data;
/// no pricing API is wired up.
#[derive(Template)]
#[template(path = "pricing/index.html")]
pub struct PricingPage {
    pub shell: Shell,
    pub header: PageHeader,
    pub stats: Vec<StatCard>,
    pub sources: Vec<PricingSource>,
    pub settings_href: String,
}

pub async fn pricing(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = PricingPage {
        shell: Shell::new("PricingEngine", !state.writable()),
        header: PageHeader::new("Pricing Engine", "Manage external pricing APIs and sync settings"),
        stats: vec![
            StatCard::new("Total Cards Priced", "223K", "ph-database", Accent::Blue),
            StatCard::new("Last Full Sync", "2 min ago", "ph-arrows-clockwise", Accent::Green),
            StatCard::new("Sync Errors", 3, "ph-warning", Accent::Red),
            StatCard::new("Price Accuracy", "99.2%", "ph-trend-up", Accent::Purple),
        ],
        sources: vec![
            PricingSource {
                name: "TCGPlayer API",
                status: "connected",
                last_sync: "2 min ago",
                records: "125,000",
            },
            PricingSource {
                name: "CardMarket API",
                status: "connected",
                last_sync: "5 min ago",
                records: "98,000",
            },
            PricingSource {
                name: "PriceCharting API",
                status: "error",
                last_sync: "2 hours ago",
                records: "0",
            },
        ],
        settings_href: format!("{}/settings", page_url("PricingEngine")),
    };
    render(&page)
}

#[derive(Debug, Default, Deserialize)]
pub struct PricingSettingsForm {
    #[serde(default)]
    pub sync_frequency: String,
    #[serde(default)]
    pub max_price_change_pct: String,
    #[serde(default)]
    pub auto_update: Option<String>,
}

/// No pricing integration is wired up; the console only records the request.
pub async fn pricing_settings(Form(form): Form<PricingSettingsForm>) -> Redirect {
    tracing::info!(
        sync_frequency = %form.sync_frequency,
        max_price_change_pct = %form.max_price_change_pct,
        auto_update = form.auto_update.is_some(),
        "pricing sync settings change requested"
    );
    back_to("PricingEngine")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_lookup() {
        assert_eq!(category_label("mtg"), "Magic: The Gathering");
        assert_eq!(category_label("unknown_game"), "unknown_game");
    }

    #[test]
    fn test_category_form_validation() {
        let form = CategoryForm {
            name: "Pokémon".to_string(),
            ..CategoryForm::default()
        };
        assert!(form.validate().is_err());

        let form = CategoryForm {
            name: "Pokémon".to_string(),
            slug: "pokemon".to_string(),
            ..CategoryForm::default()
        };
        assert!(form.validate().is_ok());
        let payload = form.payload();
        assert_eq!(payload["is_active"], false);
        assert!(payload["icon_url"].is_null());
    }
}
