//! Currency and date formatting plus horizon date computation.
//!
//! Monetary values use grouped thousands with exactly two decimals
//! (`1,234.56`).  Dates display in day/month/year order; filenames use the
//! ISO order for sort stability.

use chrono::{Duration, NaiveDate};

use crate::model::DocumentKind;
use crate::pricing::round2;

/// Formats a monetary amount with thousands grouping and two decimals.
pub fn format_currency(amount: f64) -> String {
    let rounded = round2(amount);
    let negative = rounded < 0.0;
    let cents = (rounded.abs() * 100.0).round() as u128;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}

/// Formats a date for display as `DD/MM/YYYY`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a date as `YYYY-MM-DD` for filenames.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Computes the due date (invoice, +30 days) or expiry date (quotation,
/// +7 days) by calendar-day addition.  Reports have no horizon.
pub fn horizon_date(kind: DocumentKind, issue_date: NaiveDate) -> Option<NaiveDate> {
    kind.horizon_days()
        .map(|days| issue_date + Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1234.5), "1,234.50");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(12_345_678.9), "12,345,678.90");
    }

    #[test]
    fn currency_keeps_two_decimals() {
        assert_eq!(format_currency(250.0), "250.00");
        assert_eq!(format_currency(0.1), "0.10");
    }

    #[test]
    fn display_date_is_day_first() {
        assert_eq!(format_display_date(date(2024, 1, 15)), "15/01/2024");
    }

    #[test]
    fn iso_date_is_sortable() {
        assert_eq!(format_iso_date(date(2024, 3, 7)), "2024-03-07");
    }

    #[test]
    fn invoice_horizon_crosses_month_boundary() {
        let due = horizon_date(DocumentKind::Invoice, date(2024, 1, 15)).unwrap();
        assert_eq!(due, date(2024, 2, 14));
    }

    #[test]
    fn quotation_horizon_crosses_year_boundary() {
        let expiry = horizon_date(DocumentKind::Quotation, date(2024, 12, 28)).unwrap();
        assert_eq!(expiry, date(2025, 1, 4));
    }

    #[test]
    fn invoice_horizon_honours_leap_february() {
        let due = horizon_date(DocumentKind::Invoice, date(2024, 2, 20)).unwrap();
        assert_eq!(due, date(2024, 3, 21));
    }

    #[test]
    fn reports_have_no_horizon() {
        assert_eq!(
            horizon_date(DocumentKind::PostOfficeReport, date(2024, 1, 1)),
            None
        );
    }
}
