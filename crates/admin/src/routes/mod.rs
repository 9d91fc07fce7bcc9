//! Console page routes.
//!
//! Every page lives at `GET /app/{PageName}`; mutations are POST
//! endpoints under the page path that redirect back to the page, so the
//! next render refetches fresh data. List-fetch failures are logged and
//! rendered as empty collections; mutation failures surface as
//! [`AppError`] responses.

use askama::Template;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiError;
use crate::components::cards::{PageHeader, StatCard, Tab};
use crate::components::data_table::TableView;
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

pub mod announcements;
pub mod dashboard;
pub mod disputes;
pub mod fraud;
pub mod listings;
pub mod logs;
pub mod orders;
pub mod payments;
pub mod payouts;
pub mod sellers;
pub mod settings;
pub mod tickets;
pub mod users;

/// Build the console router. All routes share [`AppState`].
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/app/AdminDashboard", get(dashboard::index))
        .route("/app/UserManagement", get(users::index))
        .route("/app/UserManagement/{id}/suspend", post(users::suspend))
        .route(
            "/app/UserManagement/{id}/force-logout",
            post(users::force_logout),
        )
        .route("/app/RolesPermissions", get(users::roles))
        .route("/app/SellerVerification", get(sellers::index))
        .route("/app/SellerVerification/{id}/view", get(sellers::detail))
        .route("/app/SellerVerification/{id}/approve", post(sellers::approve))
        .route("/app/SellerVerification/{id}/reject", post(sellers::reject))
        .route("/app/ListingManagement", get(listings::index))
        .route("/app/ListingManagement/{id}/approve", post(listings::approve))
        .route("/app/ListingManagement/{id}/reject", post(listings::reject))
        .route("/app/ListingManagement/{id}/delete", post(listings::remove))
        .route("/app/CategoryManagement", get(listings::categories))
        .route("/app/CategoryManagement/new", get(listings::category_new))
        .route("/app/CategoryManagement/create", post(listings::category_create))
        .route(
            "/app/CategoryManagement/{id}/edit",
            get(listings::category_edit),
        )
        .route(
            "/app/CategoryManagement/{id}/update",
            post(listings::category_update),
        )
        .route(
            "/app/CategoryManagement/{id}/delete",
            post(listings::category_delete),
        )
        .route("/app/PricingEngine", get(listings::pricing))
        .route(
            "/app/PricingEngine/settings",
            post(listings::pricing_settings),
        )
        .route("/app/OrderManagement", get(orders::index))
        .route("/app/OrderManagement/{id}/ship", post(orders::mark_shipped))
        .route(
            "/app/OrderManagement/{id}/deliver",
            post(orders::mark_delivered),
        )
        .route("/app/OrderManagement/{id}/status", post(orders::set_status))
        .route("/app/PaymentManagement", get(payments::index))
        .route("/app/PaymentManagement/{id}/flag", post(payments::flag))
        .route("/app/PaymentManagement/{id}/unflag", post(payments::unflag))
        .route("/app/RefundManagement", get(payments::refunds))
        .route("/app/PayoutManagement", get(payouts::index))
        .route("/app/PayoutManagement/{id}/release", post(payouts::release))
        .route("/app/PayoutManagement/{id}/complete", post(payouts::complete))
        .route("/app/PayoutManagement/{id}/delay", post(payouts::delay))
        .route("/app/FeeSettings", get(payouts::fees))
        .route("/app/DisputeManagement", get(disputes::index))
        .route("/app/DisputeManagement/{id}/view", get(disputes::detail))
        .route(
            "/app/DisputeManagement/{id}/review",
            post(disputes::start_review),
        )
        .route("/app/DisputeManagement/{id}/resolve", post(disputes::resolve))
        .route("/app/FraudMonitoring", get(fraud::index))
        .route(
            "/app/FraudMonitoring/{id}/investigate",
            post(fraud::investigate),
        )
        .route("/app/FraudMonitoring/{id}/resolve", post(fraud::resolve))
        .route("/app/FraudMonitoring/{id}/dismiss", post(fraud::dismiss))
        .route("/app/SecurityLogs", get(fraud::security_logs))
        .route("/app/AdminActivityLogs", get(logs::index))
        .route("/app/Announcements", get(announcements::index))
        .route("/app/Announcements/new", get(announcements::form_new))
        .route("/app/Announcements/create", post(announcements::create))
        .route("/app/Announcements/{id}/edit", get(announcements::form_edit))
        .route("/app/Announcements/{id}/update", post(announcements::update))
        .route("/app/Announcements/{id}/delete", post(announcements::remove))
        .route("/app/SupportTickets", get(tickets::index))
        .route("/app/SupportTickets/{id}/view", get(tickets::detail))
        .route("/app/SupportTickets/{id}/reply", post(tickets::reply))
        .route("/app/SupportTickets/{id}/status", post(tickets::set_status))
        .route("/app/PlatformSettings", get(settings::index))
        .route("/app/PlatformSettings/save", post(settings::save))
}

async fn root() -> Redirect {
    Redirect::to(&page_url("AdminDashboard"))
}

/// Render a template, mapping failures into [`AppError`].
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Redirect back to a console page after a mutation.
pub(crate) fn back_to(page: &str) -> Redirect {
    Redirect::to(&page_url(page))
}

/// Unwrap a list fetch, logging the error and falling back to an empty
/// collection so the page still renders.
pub(crate) fn fetch_or_empty<T>(result: Result<Vec<T>, ApiError>, entity: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch {entity}: {e}");
        vec![]
    })
}

/// Serialize typed records into the raw rows the table engine consumes.
pub(crate) fn to_rows<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| serde_json::to_value(record).ok())
        .collect()
}

/// Shared layout for the standard listing pages: header, stat cards,
/// tab strip, and one data table.
#[derive(Template)]
#[template(path = "entity/index.html")]
pub struct EntityPage {
    pub shell: Shell,
    pub header: PageHeader,
    pub stats: Vec<StatCard>,
    pub tabs: Vec<Tab>,
    pub table: TableView,
}

/// Pointer page referring the admin to another console page.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticePage {
    pub shell: Shell,
    pub title: String,
    pub message: String,
    pub link_label: String,
    pub link_href: String,
}
