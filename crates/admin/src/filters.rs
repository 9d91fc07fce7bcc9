//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format a decimal amount as a dollar string.
///
/// Usage in templates: `{{ order.total_amount|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

fn format_money(raw: &str) -> String {
    raw.parse::<f64>()
        .map_or_else(|_| format!("${raw}"), |amount| format!("${amount:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_two_decimals() {
        assert_eq!(format_money("12.5"), "$12.50");
        assert_eq!(format_money("1234"), "$1234.00");
    }

    #[test]
    fn test_format_money_passes_through_non_numeric() {
        assert_eq!(format_money("n/a"), "$n/a");
    }
}
