//! Sidebar navigation and the page shell shared by every template.

/// Build the canonical URL for a console page.
#[must_use]
pub fn page_url(page: &str) -> String {
    format!("/app/{page}")
}

struct NavItem {
    name: &'static str,
    icon: &'static str,
    page: &'static str,
    subs: &'static [(&'static str, &'static str)],
}

/// The sidebar layout. Sections with sub-entries highlight when any of
/// their pages is active.
const NAV: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        icon: "ph-squares-four",
        page: "AdminDashboard",
        subs: &[],
    },
    NavItem {
        name: "Users & Sellers",
        icon: "ph-users",
        page: "UserManagement",
        subs: &[
            ("All Users", "UserManagement"),
            ("Seller Verification", "SellerVerification"),
            ("Roles & Permissions", "RolesPermissions"),
        ],
    },
    NavItem {
        name: "Marketplace",
        icon: "ph-storefront",
        page: "ListingManagement",
        subs: &[
            ("Listings", "ListingManagement"),
            ("Categories", "CategoryManagement"),
            ("Pricing Engine", "PricingEngine"),
        ],
    },
    NavItem {
        name: "Orders",
        icon: "ph-package",
        page: "OrderManagement",
        subs: &[],
    },
    NavItem {
        name: "Payments",
        icon: "ph-credit-card",
        page: "PaymentManagement",
        subs: &[
            ("Transactions", "PaymentManagement"),
            ("Payouts", "PayoutManagement"),
            ("Fees & Commissions", "FeeSettings"),
            ("Refunds", "RefundManagement"),
        ],
    },
    NavItem {
        name: "Disputes",
        icon: "ph-warning",
        page: "DisputeManagement",
        subs: &[],
    },
    NavItem {
        name: "Fraud & Security",
        icon: "ph-shield",
        page: "FraudMonitoring",
        subs: &[
            ("Fraud Alerts", "FraudMonitoring"),
            ("Security Logs", "SecurityLogs"),
            ("Admin Activity", "AdminActivityLogs"),
        ],
    },
    NavItem {
        name: "Communications",
        icon: "ph-bell",
        page: "Announcements",
        subs: &[
            ("Announcements", "Announcements"),
            ("Support Tickets", "SupportTickets"),
        ],
    },
    NavItem {
        name: "Settings",
        icon: "ph-gear",
        page: "PlatformSettings",
        subs: &[],
    },
];

/// One rendered sidebar entry.
pub struct NavItemView {
    pub name: &'static str,
    pub icon: &'static str,
    pub href: String,
    pub active: bool,
    pub subs: Vec<NavSubView>,
}

/// One rendered sub-entry.
pub struct NavSubView {
    pub name: &'static str,
    pub href: String,
    pub active: bool,
}

/// Per-page shell data: the sidebar with the current page highlighted.
pub struct Shell {
    pub nav: Vec<NavItemView>,
    pub read_only: bool,
}

impl Shell {
    /// Build the shell for a page, marking the matching nav entry active.
    #[must_use]
    pub fn new(current_page: &str, read_only: bool) -> Self {
        let nav = NAV
            .iter()
            .map(|item| {
                let subs: Vec<NavSubView> = item
                    .subs
                    .iter()
                    .map(|(name, page)| NavSubView {
                        name,
                        href: page_url(page),
                        active: *page == current_page,
                    })
                    .collect();
                let active =
                    item.page == current_page || subs.iter().any(|sub| sub.active);
                NavItemView {
                    name: item.name,
                    icon: item.icon,
                    href: page_url(item.page),
                    active,
                    subs,
                }
            })
            .collect();

        Self { nav, read_only }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("AdminDashboard"), "/app/AdminDashboard");
    }

    #[test]
    fn test_top_level_page_is_active() {
        let shell = Shell::new("OrderManagement", false);
        let orders = shell
            .nav
            .iter()
            .find(|item| item.name == "Orders")
            .map(|item| item.active);
        assert_eq!(orders, Some(true));
    }

    #[test]
    fn test_sub_page_activates_its_section() {
        let shell = Shell::new("SecurityLogs", false);
        let section = shell
            .nav
            .iter()
            .find(|item| item.name == "Fraud & Security")
            .filter(|item| item.active);
        assert!(section.is_some());
        let sub_active = section
            .and_then(|item| item.subs.iter().find(|sub| sub.name == "Security Logs"))
            .map(|sub| sub.active);
        assert_eq!(sub_active, Some(true));
    }

    #[test]
    fn test_unknown_page_activates_nothing() {
        let shell = Shell::new("NoSuchPage", false);
        assert!(shell.nav.iter().all(|item| !item.active));
    }
}
