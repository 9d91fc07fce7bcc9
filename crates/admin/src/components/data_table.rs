//! Reusable data table component.
//!
//! Every listing page in the console is one [`DataTableConfig`] plus a
//! slice of JSON records. [`DataTableConfig::apply`] runs the full
//! pipeline for a request (search, filters, pagination, cell rendering)
//! and produces a [`TableView`] that the shared table template renders
//! without any further logic.
//!
//! Search matches case-insensitive substrings against string-typed
//! column values only. Filters are exact matches combined with AND; the
//! `all` sentinel disables a filter. Pagination clamps the requested
//! page into `1..=max(total_pages, 1)`. The toolbar form intentionally
//! carries no `page` field, so changing search or a filter lands back on
//! page one.

use std::collections::{BTreeSet, HashMap};

use cardvault_core::{badge_label, badge_tone};
use serde_json::Value;

/// How a cell value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Raw value as text.
    Text,
    /// Status string as a colored badge.
    Badge,
    /// Numeric amount as dollars with two decimals.
    Money,
    /// ISO timestamp as a short human date.
    Date,
    /// Identifier truncated to its first characters.
    Mono,
    /// Boolean as one of two badge words.
    Flag {
        on: &'static str,
        off: &'static str,
    },
}

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Record field the column reads.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Rendering for the cell value.
    pub kind: CellKind,
}

impl TableColumn {
    /// Create a plain text column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: CellKind::Text,
        }
    }

    /// Set the cell rendering.
    #[must_use]
    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Option for select filters.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Single-select dropdown filter over one record field.
#[derive(Debug, Clone)]
pub struct TableFilter {
    /// Record field and query parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Available options. An "All" entry is prepended when rendering.
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options,
        }
    }
}

/// How a row action is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Navigates to `{action_base}/{id}/{key}`.
    Link,
    /// Posts to `{action_base}/{id}/{key}`.
    Post,
}

/// Per-row action rendered in the row menu.
#[derive(Debug, Clone)]
pub struct RowAction {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub destructive: bool,
    pub kind: ActionKind,
}

impl RowAction {
    /// Create a navigation action.
    #[must_use]
    pub fn link(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            destructive: false,
            kind: ActionKind::Link,
        }
    }

    /// Create a mutation action.
    #[must_use]
    pub fn post(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            destructive: false,
            kind: ActionKind::Post,
        }
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    /// Whether the action renders as a plain link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.kind == ActionKind::Link
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// URL prefix for row actions, usually the page URL.
    pub action_base: String,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    pub actions: Vec<RowAction>,
    pub page_size: usize,
    pub selectable: bool,
    pub searchable: bool,
    pub search_placeholder: String,
    pub empty_message: String,
}

impl DataTableConfig {
    /// Create a configuration with defaults matching the shared template.
    #[must_use]
    pub fn new(action_base: &str) -> Self {
        Self {
            action_base: action_base.to_string(),
            columns: vec![],
            filters: vec![],
            actions: vec![],
            page_size: 10,
            selectable: false,
            searchable: true,
            search_placeholder: "Search...".to_string(),
            empty_message: "No data found".to_string(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a row action.
    #[must_use]
    pub fn action(mut self, action: RowAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Enable row selection checkboxes.
    #[must_use]
    pub const fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Disable the search box.
    #[must_use]
    pub const fn without_search(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Set the search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set the empty state message.
    #[must_use]
    pub fn empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }

    /// Run the table pipeline for one request.
    #[must_use]
    pub fn apply(&self, rows: &[Value], query: &TableQuery) -> TableView {
        let filtered: Vec<&Value> = rows
            .iter()
            .filter(|row| self.matches_search(row, query) && self.matches_filters(row, query))
            .collect();

        let total = filtered.len();
        let total_pages = total.div_ceil(self.page_size.max(1));
        let page = query.page.unwrap_or(1).clamp(1, total_pages.max(1));

        let start = (page - 1) * self.page_size;
        let page_rows: Vec<TableRow> = filtered
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|row| self.render_row(row))
            .collect();

        let showing_to = (start + page_rows.len()).min(total);
        let showing_from = if total == 0 { 0 } else { start + 1 };

        let filters = self
            .filters
            .iter()
            .map(|filter| {
                let active = query.filter_value(&filter.key);
                let mut options = vec![FilterOptionView {
                    value: "all".to_string(),
                    label: format!("All {}", filter.label),
                    selected: active.is_none(),
                }];
                options.extend(filter.options.iter().map(|opt| FilterOptionView {
                    value: opt.value.clone(),
                    label: opt.label.clone(),
                    selected: active == Some(opt.value.as_str()),
                }));
                FilterView {
                    key: filter.key.clone(),
                    options,
                }
            })
            .collect();

        let prev_href = (page > 1).then(|| self.page_href(query, page - 1));
        let next_href = (page < total_pages).then(|| self.page_href(query, page + 1));

        let colspan = self.columns.len()
            + usize::from(self.selectable)
            + usize::from(!self.actions.is_empty());

        TableView {
            columns: self.columns.iter().map(|c| c.label.clone()).collect(),
            rows: page_rows,
            filters,
            actions: self.actions.clone(),
            action_base: self.action_base.clone(),
            searchable: self.searchable,
            search_placeholder: self.search_placeholder.clone(),
            search_value: query.search.clone().unwrap_or_default(),
            selectable: self.selectable,
            empty_message: self.empty_message.clone(),
            tab: query.tab.clone(),
            total,
            page,
            total_pages,
            showing_from,
            showing_to,
            prev_href,
            next_href,
            colspan,
        }
    }

    fn matches_search(&self, row: &Value, query: &TableQuery) -> bool {
        let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        self.columns.iter().any(|column| {
            row.get(&column.key)
                .and_then(Value::as_str)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
    }

    fn matches_filters(&self, row: &Value, query: &TableQuery) -> bool {
        self.filters.iter().all(|filter| {
            match query.filter_value(&filter.key) {
                None => true,
                Some(expected) => field_text(row.get(&filter.key)) == expected,
            }
        })
    }

    fn render_row(&self, row: &Value) -> TableRow {
        let id = row
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let cells = self
            .columns
            .iter()
            .map(|column| render_cell(column.kind, row.get(&column.key)))
            .collect();
        TableRow { id, cells }
    }

    fn page_href(&self, query: &TableQuery, page: usize) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(tab) = &query.tab {
            serializer.append_pair("tab", tab);
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair("q", search);
        }
        for filter in &self.filters {
            if let Some(value) = query.filter_value(&filter.key) {
                serializer.append_pair(&filter.key, value);
            }
        }
        serializer.append_pair("page", &page.to_string());
        format!("?{}", serializer.finish())
    }
}

/// Parsed table state from request query parameters.
#[derive(Debug, Default, Clone)]
pub struct TableQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub tab: Option<String>,
    filters: HashMap<String, String>,
}

impl TableQuery {
    /// Extract table state from raw query parameters. Only keys declared
    /// as filters on the config are honored; the `all` sentinel and empty
    /// values mean "no filter".
    #[must_use]
    pub fn from_params(config: &DataTableConfig, params: &HashMap<String, String>) -> Self {
        let search = params.get("q").cloned().filter(|s| !s.is_empty());
        let page = params.get("page").and_then(|p| p.parse::<usize>().ok());
        let tab = params.get("tab").cloned().filter(|t| !t.is_empty());
        let filters = config
            .filters
            .iter()
            .filter_map(|filter| {
                params
                    .get(&filter.key)
                    .filter(|v| !v.is_empty() && *v != "all")
                    .map(|v| (filter.key.clone(), v.clone()))
            })
            .collect();
        Self {
            search,
            page,
            tab,
            filters,
        }
    }

    /// Active value for a filter key, if any.
    #[must_use]
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Set a filter programmatically (used by tab shortcuts).
    #[must_use]
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.insert(key.to_string(), value.to_string());
        self
    }
}

/// Fully rendered table, ready for the shared template.
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub filters: Vec<FilterView>,
    pub actions: Vec<RowAction>,
    pub action_base: String,
    pub searchable: bool,
    pub search_placeholder: String,
    pub search_value: String,
    pub selectable: bool,
    pub empty_message: String,
    pub tab: Option<String>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub showing_from: usize,
    pub showing_to: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub colspan: usize,
}

/// One rendered row.
pub struct TableRow {
    pub id: String,
    pub cells: Vec<TableCell>,
}

/// One rendered cell. `badge` carries the badge CSS class when the cell
/// renders as a badge.
pub struct TableCell {
    pub text: String,
    pub badge: Option<&'static str>,
}

/// Rendered filter dropdown.
pub struct FilterView {
    pub key: String,
    pub options: Vec<FilterOptionView>,
}

/// Rendered filter option.
pub struct FilterOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Page-local row selection, mirroring the bulk-action checkboxes.
///
/// Select-all operates on the current page only: it replaces the
/// selection with the visible rows, and clearing it empties the
/// selection entirely.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Selection from explicit ids (e.g. posted form checkboxes).
    #[must_use]
    pub fn from_ids<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Toggle one row.
    pub fn toggle(&mut self, id: &str, selected: bool) {
        if selected {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    /// Apply the header checkbox: select exactly the visible page, or
    /// clear everything.
    pub fn set_page(&mut self, page_ids: &[String], selected: bool) {
        if selected {
            self.ids = page_ids.iter().cloned().collect();
        } else {
            self.ids.clear();
        }
    }

    /// Whether the header checkbox renders checked for a page.
    #[must_use]
    pub fn page_fully_selected(&self, page_ids: &[String]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn render_cell(kind: CellKind, value: Option<&Value>) -> TableCell {
    match kind {
        CellKind::Text => TableCell {
            text: match value {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => "-".to_string(),
            },
            badge: None,
        },
        CellKind::Badge => match value.and_then(Value::as_str).filter(|s| !s.is_empty()) {
            Some(status) => TableCell {
                text: badge_label(status),
                badge: Some(badge_tone(status).css_class()),
            },
            None => TableCell {
                text: "-".to_string(),
                badge: None,
            },
        },
        CellKind::Money => TableCell {
            text: value
                .and_then(Value::as_f64)
                .map_or_else(|| "-".to_string(), |amount| format!("${amount:.2}")),
            badge: None,
        },
        CellKind::Date => TableCell {
            text: value
                .and_then(Value::as_str)
                .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
                .map_or_else(
                    || "N/A".to_string(),
                    |date| date.format("%b %d, %Y").to_string(),
                ),
            badge: None,
        },
        CellKind::Mono => TableCell {
            text: value
                .and_then(Value::as_str)
                .map_or_else(|| "-".to_string(), |id| id.chars().take(8).collect()),
            badge: None,
        },
        CellKind::Flag { on, off } => {
            let flag = value.and_then(Value::as_bool).unwrap_or(false);
            let word = if flag { on } else { off };
            TableCell {
                text: badge_label(word),
                badge: Some(badge_tone(word).css_class()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_rows(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| {
                json!({
                    "id": format!("row-{i}"),
                    "email": format!("user{i}@example.com"),
                    "status": if i % 2 == 0 { "active" } else { "suspended" },
                    "amount": i as f64 * 10.0,
                })
            })
            .collect()
    }

    fn sample_config() -> DataTableConfig {
        DataTableConfig::new("/app/UserManagement")
            .column(TableColumn::new("email", "Email"))
            .column(TableColumn::new("status", "Status").kind(CellKind::Badge))
            .column(TableColumn::new("amount", "Amount").kind(CellKind::Money))
            .filter(TableFilter::select(
                "status",
                "Status",
                vec![
                    FilterOption::new("active", "Active"),
                    FilterOption::new("suspended", "Suspended"),
                ],
            ))
            .selectable()
    }

    fn query(params: &[(&str, &str)]) -> HashMap<String, String> {
        params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let config = sample_config();
        let rows = sample_rows(3);
        let q = TableQuery::from_params(&config, &query(&[("q", "USER2@")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.total, 1);
        assert_eq!(view.rows[0].id, "row-2");
    }

    #[test]
    fn test_search_ignores_non_string_columns() {
        let config = sample_config();
        let rows = sample_rows(3);
        // "10" appears in the numeric amount field but in no string field.
        let q = TableQuery::from_params(&config, &query(&[("q", "10")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.total, 0);
    }

    #[test]
    fn test_filter_exact_match_and_all_sentinel() {
        let config = sample_config();
        let rows = sample_rows(4);

        let q = TableQuery::from_params(&config, &query(&[("status", "active")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.total, 2);

        let q = TableQuery::from_params(&config, &query(&[("status", "all")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.total, 4);
    }

    #[test]
    fn test_search_and_filter_combine_with_and() {
        let config = sample_config();
        let rows = sample_rows(10);
        let q = TableQuery::from_params(&config, &query(&[("q", "user1"), ("status", "active")]));
        let view = config.apply(&rows, &q);
        // user1 and user10 match the search; only user10 is active.
        assert_eq!(view.total, 1);
        assert_eq!(view.rows[0].id, "row-10");
    }

    #[test]
    fn test_pagination_window_and_counts() {
        let config = sample_config();
        let rows = sample_rows(25);

        let q = TableQuery::from_params(&config, &query(&[("page", "2")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].id, "row-11");
        assert_eq!(view.showing_from, 11);
        assert_eq!(view.showing_to, 20);
        assert!(view.prev_href.is_some());
        assert!(view.next_href.is_some());
    }

    #[test]
    fn test_page_clamped_into_valid_range() {
        let config = sample_config();
        let rows = sample_rows(25);

        let q = TableQuery::from_params(&config, &query(&[("page", "99")]));
        assert_eq!(config.apply(&rows, &q).page, 3);

        let q = TableQuery::from_params(&config, &query(&[("page", "0")]));
        assert_eq!(config.apply(&rows, &q).page, 1);

        // Empty data still lands on page 1.
        let q = TableQuery::from_params(&config, &query(&[("page", "5")]));
        let view = config.apply(&[], &q);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.showing_from, 0);
    }

    #[test]
    fn test_last_page_is_partial() {
        let config = sample_config();
        let rows = sample_rows(25);
        let q = TableQuery::from_params(&config, &query(&[("page", "3")]));
        let view = config.apply(&rows, &q);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.showing_to, 25);
        assert!(view.next_href.is_none());
    }

    #[test]
    fn test_page_href_preserves_search_and_filters() {
        let config = sample_config();
        let rows = sample_rows(25);
        let q = TableQuery::from_params(
            &config,
            &query(&[("q", "user"), ("status", "active"), ("page", "1"), ("tab", "flagged")]),
        );
        let view = config.apply(&rows, &q);
        let next = view.next_href.unwrap();
        assert!(next.contains("q=user"));
        assert!(next.contains("status=active"));
        assert!(next.contains("tab=flagged"));
        assert!(next.contains("page=2"));
    }

    #[test]
    fn test_cell_rendering_per_kind() {
        let money = render_cell(CellKind::Money, Some(&json!(12.5)));
        assert_eq!(money.text, "$12.50");

        let missing_money = render_cell(CellKind::Money, None);
        assert_eq!(missing_money.text, "-");

        let badge = render_cell(CellKind::Badge, Some(&json!("under_review")));
        assert_eq!(badge.text, "Under Review");
        assert!(badge.badge.is_some());

        let date = render_cell(CellKind::Date, Some(&json!("2024-03-05T10:30:00Z")));
        assert_eq!(date.text, "Mar 05, 2024");

        let bad_date = render_cell(CellKind::Date, Some(&json!("not-a-date")));
        assert_eq!(bad_date.text, "N/A");

        let mono = render_cell(CellKind::Mono, Some(&json!("abcdef0123456789")));
        assert_eq!(mono.text, "abcdef01");

        let flag = render_cell(
            CellKind::Flag {
                on: "suspended",
                off: "active",
            },
            Some(&json!(true)),
        );
        assert_eq!(flag.text, "Suspended");
    }

    #[test]
    fn test_filter_view_marks_active_option() {
        let config = sample_config();
        let q = TableQuery::from_params(&config, &query(&[("status", "suspended")]));
        let view = config.apply(&sample_rows(2), &q);
        let filter = &view.filters[0];
        assert_eq!(filter.options[0].label, "All Status");
        assert!(!filter.options[0].selected);
        let selected: Vec<&str> = filter
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["suspended"]);
    }

    #[test]
    fn test_selection_is_page_local() {
        let page1: Vec<String> = (1..=10).map(|i| format!("row-{i}")).collect();
        let page2: Vec<String> = (11..=20).map(|i| format!("row-{i}")).collect();

        let mut selection = Selection::default();
        assert!(!selection.page_fully_selected(&page1));
        assert!(!selection.page_fully_selected(&[]));

        selection.set_page(&page1, true);
        assert_eq!(selection.len(), 10);
        assert!(selection.page_fully_selected(&page1));
        assert!(!selection.page_fully_selected(&page2));

        // Selecting all on another page replaces, not extends.
        selection.set_page(&page2, true);
        assert_eq!(selection.len(), 10);
        assert!(!selection.contains("row-1"));
        assert!(selection.page_fully_selected(&page2));

        selection.toggle("row-11", false);
        assert!(!selection.page_fully_selected(&page2));

        selection.set_page(&page2, false);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_colspan_counts_selection_and_actions() {
        let config = sample_config().action(RowAction::link("view", "View", "ph-eye"));
        let view = config.apply(&sample_rows(1), &TableQuery::default());
        // 3 columns + selection checkbox + actions column.
        assert_eq!(view.colspan, 5);
    }
}
