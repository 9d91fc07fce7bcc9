//! Dashboard overview: headline metrics, weekly trend, quick actions,
//! and recent activity.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use rust_decimal::Decimal;

use cardvault_core::{
    AlertStatus, Dispute, DisputeStatus, EntityKind, ListingStatus, Order, PayoutStatus,
    TicketStatus, VerificationStatus, badge_label, badge_tone,
};

use crate::components::cards::{Accent, QuickAction, StatCard};
use crate::error::AppError;
use crate::filters;
use crate::nav::{Shell, page_url};
use crate::state::AppState;

use super::{fetch_or_empty, render};

const PAGE: &str = "AdminDashboard";

/// One day in the weekly revenue chart. Chart data is illustrative
/// until order history is deep enough to aggregate.
pub struct RevenuePoint {
    pub day: &'static str,
    pub revenue: u32,
    pub orders: u32,
    pub bar_pct: u32,
}

/// One slice of the sales-by-category donut.
pub struct CategorySlice {
    pub name: &'static str,
    pub share: u32,
    pub color: &'static str,
}

/// Pre-resolved status badge for the recent-activity lists.
pub struct StatusView {
    pub label: String,
    pub css: &'static str,
}

impl StatusView {
    fn new(status: &str) -> Self {
        Self {
            label: badge_label(status),
            css: badge_tone(status).css_class(),
        }
    }
}

pub struct RecentOrder {
    pub number: String,
    pub card_name: String,
    pub total: String,
    pub status: StatusView,
}

pub struct RecentDispute {
    pub kind: String,
    pub description: String,
    pub status: StatusView,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
pub struct DashboardPage {
    pub shell: Shell,
    pub stats: Vec<StatCard>,
    pub secondary: Vec<StatCard>,
    pub revenue: Vec<RevenuePoint>,
    pub categories: Vec<CategorySlice>,
    pub actions: Vec<QuickAction>,
    pub recent_orders: Vec<RecentOrder>,
    pub recent_disputes: Vec<RecentDispute>,
    pub orders_href: String,
    pub disputes_href: String,
}

fn weekly_revenue() -> Vec<RevenuePoint> {
    let days: [(&'static str, u32, u32); 7] = [
        ("Mon", 4500, 23),
        ("Tue", 5200, 31),
        ("Wed", 4800, 28),
        ("Thu", 6100, 35),
        ("Fri", 7200, 42),
        ("Sat", 8500, 48),
        ("Sun", 6800, 38),
    ];
    let peak = days.iter().map(|(_, revenue, _)| *revenue).max().unwrap_or(1);
    days.into_iter()
        .map(|(day, revenue, orders)| RevenuePoint {
            day,
            revenue,
            orders,
            bar_pct: revenue * 100 / peak,
        })
        .collect()
}

fn category_shares() -> Vec<CategorySlice> {
    vec![
        CategorySlice {
            name: "Pokemon",
            share: 45,
            color: "#3b82f6",
        },
        CategorySlice {
            name: "MTG",
            share: 28,
            color: "#10b981",
        },
        CategorySlice {
            name: "Yu-Gi-Oh",
            share: 18,
            color: "#f59e0b",
        },
        CategorySlice {
            name: "Other",
            share: 9,
            color: "#6366f1",
        },
    ]
}

fn order_number(order: &Order) -> String {
    if order.order_number.is_empty() {
        format!("#{}", order.id.chars().take(8).collect::<String>())
    } else {
        order.order_number.clone()
    }
}

fn to_recent_order(order: &Order) -> RecentOrder {
    RecentOrder {
        number: order_number(order),
        card_name: order.card_name.clone(),
        total: format!("${}", order.total.round_dp(2)),
        status: StatusView::new(order.status.as_str()),
    }
}

fn to_recent_dispute(dispute: &Dispute) -> RecentDispute {
    RecentDispute {
        kind: dispute.kind.label().to_string(),
        description: dispute.description.clone(),
        status: StatusView::new(dispute.status.as_str()),
    }
}

#[allow(clippy::too_many_lines)]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = fetch_or_empty(state.entity(EntityKind::User).list_as::<cardvault_core::User>().await, "users");
    let sellers = fetch_or_empty(
        state.entity(EntityKind::Seller).list_as::<cardvault_core::Seller>().await,
        "sellers",
    );
    let listings = fetch_or_empty(
        state.entity(EntityKind::Listing).list_as::<cardvault_core::Listing>().await,
        "listings",
    );
    let orders = fetch_or_empty(state.entity(EntityKind::Order).list_as::<Order>().await, "orders");
    let disputes = fetch_or_empty(state.entity(EntityKind::Dispute).list_as::<Dispute>().await, "disputes");
    let payouts = fetch_or_empty(
        state.entity(EntityKind::Payout).list_as::<cardvault_core::Payout>().await,
        "payouts",
    );
    let alerts = fetch_or_empty(
        state.entity(EntityKind::FraudAlert).list_as::<cardvault_core::FraudAlert>().await,
        "fraud alerts",
    );
    let tickets = fetch_or_empty(
        state.entity(EntityKind::SupportTicket).list_as::<cardvault_core::SupportTicket>().await,
        "support tickets",
    );

    let verified_sellers = sellers
        .iter()
        .filter(|s| s.verification_status == VerificationStatus::Approved)
        .count();
    let pending_sellers = sellers
        .iter()
        .filter(|s| s.verification_status == VerificationStatus::Pending)
        .count();
    let active_listings = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Approved)
        .count();
    let pending_listings = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Pending)
        .count();
    let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();
    let pending_payout_total: Decimal = payouts
        .iter()
        .filter(|p| p.status == PayoutStatus::Pending)
        .map(|p| p.amount)
        .sum();
    let pending_payouts = payouts
        .iter()
        .filter(|p| p.status == PayoutStatus::Pending)
        .count();
    let open_disputes = disputes
        .iter()
        .filter(|d| {
            matches!(
                d.status,
                DisputeStatus::Open | DisputeStatus::UnderReview
            )
        })
        .count();
    let new_alerts = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::New)
        .count();
    let open_tickets = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Open)
        .count();

    let stats = vec![
        StatCard::new("Total Users", users.len(), "ph-users", Accent::Blue).subtitle(&format!(
            "{} sellers, {verified_sellers} verified",
            sellers.len()
        )),
        StatCard::new("Active Listings", active_listings, "ph-storefront", Accent::Green)
            .subtitle(&format!("{pending_listings} pending review")),
        StatCard::new(
            "Total Revenue",
            format!("${}", total_revenue.round_dp(2)),
            "ph-currency-dollar",
            Accent::Purple,
        ),
        StatCard::new("Total Orders", orders.len(), "ph-package", Accent::Orange),
    ];
    let secondary = vec![
        StatCard::new(
            "Pending Payouts",
            format!("${}", pending_payout_total.round_dp(2)),
            "ph-wallet",
            Accent::Cyan,
        ),
        StatCard::new("Open Disputes", open_disputes, "ph-warning", Accent::Red),
        StatCard::new("Fraud Alerts", new_alerts, "ph-shield-warning", Accent::Amber),
        StatCard::new("Platform Health", "99.9%", "ph-pulse", Accent::Green)
            .subtitle("All systems operational"),
    ];

    let actions = vec![
        QuickAction::new(
            "Pending Listings",
            "Review and approve new listings",
            pending_listings,
            "ph-clock",
            Accent::Orange,
            "ListingManagement",
        ),
        QuickAction::new(
            "KYC Pending",
            "Verify seller documents",
            pending_sellers,
            "ph-check-circle",
            Accent::Blue,
            "SellerVerification",
        ),
        QuickAction::new(
            "Open Disputes",
            "Resolve buyer vs seller cases",
            open_disputes,
            "ph-warning",
            Accent::Red,
            "DisputeManagement",
        ),
        QuickAction::new(
            "Pending Payouts",
            "Release seller payouts",
            pending_payouts,
            "ph-wallet",
            Accent::Green,
            "PayoutManagement",
        ),
        QuickAction::new(
            "Fraud Alerts",
            "Investigate suspicious activity",
            new_alerts,
            "ph-shield-warning",
            Accent::Purple,
            "FraudMonitoring",
        ),
        QuickAction::new(
            "Support Tickets",
            "Respond to user inquiries",
            open_tickets,
            "ph-chat-circle",
            Accent::Cyan,
            "SupportTickets",
        ),
    ];

    let recent_orders: Vec<RecentOrder> = orders.iter().take(5).map(to_recent_order).collect();
    let recent_disputes: Vec<RecentDispute> = disputes
        .iter()
        .filter(|d| d.status != DisputeStatus::Closed)
        .take(5)
        .map(to_recent_dispute)
        .collect();

    let page = DashboardPage {
        shell: Shell::new(PAGE, !state.writable()),
        stats,
        secondary,
        revenue: weekly_revenue(),
        categories: category_shares(),
        actions,
        recent_orders,
        recent_disputes,
        orders_href: page_url("OrderManagement"),
        disputes_href: page_url("DisputeManagement"),
    };
    render(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_heights_scale_to_peak() {
        let revenue = weekly_revenue();
        let peak = revenue.iter().map(|p| p.bar_pct).max().unwrap();
        assert_eq!(peak, 100);
        assert!(revenue.iter().all(|p| p.bar_pct > 0));
    }

    #[test]
    fn test_order_number_falls_back_to_id_prefix() {
        let order = Order {
            id: "0a1b2c3d4e5f".to_string(),
            ..Order::default()
        };
        assert_eq!(order_number(&order), "#0a1b2c3d");

        let order = Order {
            order_number: "ORD-1001".to_string(),
            ..Order::default()
        };
        assert_eq!(order_number(&order), "ORD-1001");
    }

    #[test]
    fn test_category_shares_sum_to_whole() {
        let total: u32 = category_shares().iter().map(|c| c.share).sum();
        assert_eq!(total, 100);
    }
}
