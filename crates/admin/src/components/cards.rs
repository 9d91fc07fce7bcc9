//! Stat cards, page headers, and tab strips.

use crate::nav::page_url;

/// Accent color for stat cards and quick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Cyan,
    Amber,
}

impl Accent {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Blue => "accent-blue",
            Self::Green => "accent-green",
            Self::Purple => "accent-purple",
            Self::Orange => "accent-orange",
            Self::Red => "accent-red",
            Self::Cyan => "accent-cyan",
            Self::Amber => "accent-amber",
        }
    }
}

/// Headline metric shown above a table.
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub icon: &'static str,
    pub accent: Accent,
}

impl StatCard {
    #[must_use]
    pub fn new(title: &str, value: impl ToString, icon: &'static str, accent: Accent) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            subtitle: None,
            icon,
            accent,
        }
    }

    /// Add a secondary line under the value.
    #[must_use]
    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }
}

/// Page title block with an optional primary action.
pub struct PageHeader {
    pub title: String,
    pub description: String,
    pub action: Option<HeaderAction>,
}

/// Primary action button in the page header.
pub struct HeaderAction {
    pub label: String,
    pub href: String,
}

impl PageHeader {
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            action: None,
        }
    }

    /// Add the primary action button.
    #[must_use]
    pub fn action(mut self, label: &str, href: &str) -> Self {
        self.action = Some(HeaderAction {
            label: label.to_string(),
            href: href.to_string(),
        });
        self
    }
}

/// One entry in a tab strip. Tabs are plain links carrying a `tab`
/// query parameter back to the same page.
pub struct Tab {
    pub label: String,
    pub count: usize,
    pub href: String,
    pub active: bool,
}

impl Tab {
    #[must_use]
    pub fn new(page: &str, key: &str, label: &str, count: usize, active_tab: &str) -> Self {
        Self {
            label: label.to_string(),
            count,
            href: format!("{}?tab={key}", page_url(page)),
            active: key == active_tab,
        }
    }
}

/// Dashboard quick-action tile linking to another page.
pub struct QuickAction {
    pub title: String,
    pub description: String,
    pub count: usize,
    pub icon: &'static str,
    pub accent: Accent,
    pub href: String,
}

impl QuickAction {
    #[must_use]
    pub fn new(
        title: &str,
        description: &str,
        count: usize,
        icon: &'static str,
        accent: Accent,
        page: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            count,
            icon,
            accent,
            href: page_url(page),
        }
    }
}
