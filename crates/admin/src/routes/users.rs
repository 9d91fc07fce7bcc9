//! User directory and the static roles reference page.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde_json::{Value, json};

use cardvault_core::{EntityKind, Seller, User, UserRole};

use crate::components::cards::{PageHeader, Tab};
use crate::components::data_table::{
    CellKind, DataTableConfig, FilterOption, RowAction, TableColumn, TableFilter, TableQuery,
};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{EntityPage, back_to, fetch_or_empty, render};

const PAGE: &str = "UserManagement";

fn table_config() -> DataTableConfig {
    DataTableConfig::new(&page_url(PAGE))
        .column(TableColumn::new("full_name", "User"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("role", "Role").kind(CellKind::Badge))
        .column(TableColumn::new("account_type", "Type"))
        .column(TableColumn::new("total_sales", "Total Sales").kind(CellKind::Money))
        .column(TableColumn::new("created_date", "Joined").kind(CellKind::Date))
        .column(TableColumn::new("is_suspended", "Status").kind(CellKind::Flag {
            on: "suspended",
            off: "active",
        }))
        .filter(TableFilter::select(
            "role",
            "Role",
            vec![
                FilterOption::new("admin", "Admin"),
                FilterOption::new("user", "User"),
            ],
        ))
        .action(RowAction::post("force-logout", "Force Logout", "ph-sign-out"))
        .action(RowAction::post("suspend", "Suspend Account", "ph-prohibit").destructive())
        .selectable()
        .search_placeholder("Search users by name or email...")
        .empty_message("No users found")
}

/// Join each user with their seller record (matched on email) into the
/// row shape the user table reads.
fn join_rows(users: &[User], sellers: &[Seller]) -> Vec<Value> {
    users
        .iter()
        .map(|user| {
            let seller = sellers.iter().find(|s| s.user_email == user.email);
            json!({
                "id": user.id,
                "full_name": user.full_name,
                "email": user.email,
                "role": user.role,
                "is_seller": seller.is_some(),
                "account_type": seller.map_or("Buyer", |_| "Seller"),
                "total_sales": seller.map(|s| s.total_sales),
                "is_suspended": seller.is_some_and(|s| s.is_suspended),
                "created_date": user.created_date,
            })
        })
        .collect()
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let users: Vec<User> =
        fetch_or_empty(state.entity(EntityKind::User).list_as().await, "users");
    let sellers: Vec<Seller> =
        fetch_or_empty(state.entity(EntityKind::Seller).list_as().await, "sellers");

    let rows = join_rows(&users, &sellers);
    let seller_count = rows.iter().filter(|r| r["is_seller"] == true).count();
    let admin_count = users.iter().filter(|u| u.role == UserRole::Admin).count();

    let config = table_config();
    let query = TableQuery::from_params(&config, &params);
    let tab = query.tab.clone().unwrap_or_else(|| "all".to_string());

    let subset: Vec<Value> = match tab.as_str() {
        "buyers" => rows
            .iter()
            .filter(|r| r["is_seller"] == false)
            .cloned()
            .collect(),
        "sellers" => rows
            .iter()
            .filter(|r| r["is_seller"] == true)
            .cloned()
            .collect(),
        "admins" => rows.iter().filter(|r| r["role"] == "admin").cloned().collect(),
        _ => rows.clone(),
    };
    let table = config.apply(&subset, &query);

    let tabs = vec![
        Tab::new(PAGE, "all", "All Users", rows.len(), &tab),
        Tab::new(PAGE, "buyers", "Buyers", rows.len() - seller_count, &tab),
        Tab::new(PAGE, "sellers", "Sellers", seller_count, &tab),
        Tab::new(PAGE, "admins", "Admins", admin_count, &tab),
    ];

    let page = EntityPage {
        shell: Shell::new(PAGE, !state.writable()),
        header: PageHeader::new("User Management", "View and manage all platform users"),
        stats: vec![],
        tabs,
        table,
    };
    render(&page)
}

/// Suspension is enforced upstream; the console only records the request.
pub async fn suspend(Path(id): Path<String>) -> Redirect {
    tracing::info!(user_id = %id, "account suspension requested");
    back_to(PAGE)
}

/// Session revocation is handled by the auth provider, not the console.
pub async fn force_logout(Path(id): Path<String>) -> Redirect {
    tracing::info!(user_id = %id, "forced logout requested");
    back_to(PAGE)
}

/// One permission group in the catalog.
pub struct PermissionGroup {
    pub name: &'static str,
    pub icon: &'static str,
    pub permissions: &'static [(&'static str, &'static str)],
}

/// The fixed permission catalog shown on the roles page.
pub const PERMISSION_GROUPS: &[PermissionGroup] = &[
    PermissionGroup {
        name: "User Management",
        icon: "ph-users",
        permissions: &[
            ("users.view", "View users"),
            ("users.edit", "Edit users"),
            ("users.suspend", "Suspend/ban users"),
            ("users.delete", "Delete users"),
        ],
    },
    PermissionGroup {
        name: "Listings",
        icon: "ph-package",
        permissions: &[
            ("listings.view", "View listings"),
            ("listings.approve", "Approve/reject listings"),
            ("listings.edit", "Edit listings"),
            ("listings.delete", "Delete listings"),
        ],
    },
    PermissionGroup {
        name: "Orders",
        icon: "ph-package",
        permissions: &[
            ("orders.view", "View orders"),
            ("orders.update", "Update order status"),
            ("orders.refund", "Process refunds"),
        ],
    },
    PermissionGroup {
        name: "Payments & Payouts",
        icon: "ph-currency-dollar",
        permissions: &[
            ("payments.view", "View payments"),
            ("payouts.view", "View payouts"),
            ("payouts.process", "Process payouts"),
            ("fees.manage", "Manage fees"),
        ],
    },
    PermissionGroup {
        name: "Disputes",
        icon: "ph-warning",
        permissions: &[
            ("disputes.view", "View disputes"),
            ("disputes.resolve", "Resolve disputes"),
        ],
    },
    PermissionGroup {
        name: "Support",
        icon: "ph-chat-circle",
        permissions: &[
            ("tickets.view", "View tickets"),
            ("tickets.respond", "Respond to tickets"),
            ("announcements.manage", "Manage announcements"),
        ],
    },
    PermissionGroup {
        name: "Settings",
        icon: "ph-gear",
        permissions: &[
            ("settings.view", "View settings"),
            ("settings.edit", "Edit settings"),
            ("roles.manage", "Manage roles"),
        ],
    },
];

/// One role card on the roles page.
pub struct RoleCard {
    pub name: &'static str,
    pub description: &'static str,
    pub users: usize,
    pub tone: &'static str,
    pub permissions: Vec<&'static str>,
}

fn default_roles() -> Vec<RoleCard> {
    let all: Vec<&'static str> = PERMISSION_GROUPS
        .iter()
        .flat_map(|group| group.permissions.iter().map(|(key, _)| *key))
        .collect();
    vec![
        RoleCard {
            name: "Super Admin",
            description: "Full access to all features",
            users: 2,
            tone: "badge-purple",
            permissions: all,
        },
        RoleCard {
            name: "Finance Admin",
            description: "Access to payments, payouts, and financial reports",
            users: 3,
            tone: "badge-emerald",
            permissions: vec![
                "payments.view",
                "payouts.view",
                "payouts.process",
                "fees.manage",
                "orders.view",
                "orders.refund",
            ],
        },
        RoleCard {
            name: "Support Agent",
            description: "Handle user support and disputes",
            users: 8,
            tone: "badge-blue",
            permissions: vec![
                "users.view",
                "orders.view",
                "disputes.view",
                "disputes.resolve",
                "tickets.view",
                "tickets.respond",
            ],
        },
        RoleCard {
            name: "Moderator",
            description: "Review and moderate listings",
            users: 5,
            tone: "badge-amber",
            permissions: vec![
                "listings.view",
                "listings.approve",
                "listings.edit",
                "users.view",
            ],
        },
    ]
}

/// Static reference page: role cards plus the permission catalog. Role
/// assignments live in the auth provider, not in an entity collection.
#[derive(Template)]
#[template(path = "roles/index.html")]
pub struct RolesPage {
    pub shell: Shell,
    pub header: PageHeader,
    pub roles: Vec<RoleCard>,
    pub groups: &'static [PermissionGroup],
}

pub async fn roles(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = RolesPage {
        shell: Shell::new("RolesPermissions", !state.writable()),
        header: PageHeader::new("Roles & Permissions", "Manage admin roles and access levels"),
        roles: default_roles(),
        groups: PERMISSION_GROUPS,
    };
    render(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seller_for(email: &str) -> Seller {
        Seller {
            id: "s-1".to_string(),
            user_email: email.to_string(),
            is_suspended: true,
            ..Seller::default()
        }
    }

    #[test]
    fn test_join_marks_sellers_and_buyers() {
        let users = vec![
            User {
                id: "u-1".to_string(),
                email: "a@example.com".to_string(),
                ..User::default()
            },
            User {
                id: "u-2".to_string(),
                email: "b@example.com".to_string(),
                ..User::default()
            },
        ];
        let sellers = vec![seller_for("b@example.com")];

        let rows = join_rows(&users, &sellers);
        assert_eq!(rows[0]["account_type"], "Buyer");
        assert_eq!(rows[0]["is_suspended"], false);
        assert_eq!(rows[1]["account_type"], "Seller");
        assert_eq!(rows[1]["is_suspended"], true);
    }

    #[test]
    fn test_super_admin_holds_every_permission() {
        let roles = default_roles();
        let total: usize = PERMISSION_GROUPS.iter().map(|g| g.permissions.len()).sum();
        assert_eq!(roles[0].permissions.len(), total);
    }
}
