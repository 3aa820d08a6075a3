//! Monetary total computation for invoices and quotations.
//!
//! Summation happens on the raw values and rounding is applied once at the
//! end, so a long item list does not accumulate per-row rounding error.

use log::warn;

use crate::model::LineItem;

/// Derived totals for a document.  Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingResult {
    /// Sum of all line totals, rounded to two decimals.
    pub subtotal: f64,
    /// `subtotal * discount_percent / 100`, rounded to two decimals.
    pub discount_amount: f64,
    /// `subtotal - discount_amount`.
    pub final_amount: f64,
}

/// Rounds to two decimal places using half-up rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamps a monetary amount to a non-negative finite number.
///
/// Malformed input becomes 0 instead of failing the whole generation; the
/// coercion is logged but intentionally never fatal.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("coercing malformed monetary value {value:?} to 0");
        0.0
    }
}

/// Computes the totals for the given line items and discount percentage.
///
/// An empty item list yields a zero subtotal without error; refusing to
/// generate an empty document is the engine's precondition check, not the
/// calculator's concern.  The discount percentage is clamped to 0-100.
pub fn compute_totals(line_items: &[LineItem], discount_percent: f64) -> PricingResult {
    let raw_subtotal: f64 = line_items
        .iter()
        .map(|item| sanitize_amount(item.unit_price()) * f64::from(item.quantity()))
        .sum();

    let percent = if discount_percent.is_finite() {
        discount_percent.clamp(0.0, 100.0)
    } else {
        warn!("coercing malformed discount percentage {discount_percent:?} to 0");
        0.0
    };

    let subtotal = round2(raw_subtotal);
    let discount_amount = round2(raw_subtotal * percent / 100.0);
    let final_amount = round2(subtotal - discount_amount);

    PricingResult {
        subtotal,
        discount_amount,
        final_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;

    fn items(pairs: &[(f64, u32)]) -> Vec<LineItem> {
        pairs
            .iter()
            .map(|&(price, qty)| LineItem::new("item", price).with_quantity(qty))
            .collect()
    }

    #[test]
    fn computes_discounted_totals() {
        let result = compute_totals(&items(&[(100.0, 2), (50.0, 1)]), 10.0);

        assert_eq!(result.subtotal, 250.00);
        assert_eq!(result.discount_amount, 25.00);
        assert_eq!(result.final_amount, 225.00);
    }

    #[test]
    fn zero_discount_keeps_subtotal() {
        let result = compute_totals(&items(&[(19.99, 3), (5.01, 1)]), 0.0);
        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.final_amount, result.subtotal);
    }

    #[test]
    fn full_discount_zeroes_final_amount() {
        let result = compute_totals(&items(&[(123.45, 2)]), 100.0);
        assert_eq!(result.final_amount, 0.0);
        assert_eq!(result.discount_amount, result.subtotal);
    }

    #[test]
    fn subtotal_is_order_independent() {
        let forward = compute_totals(&items(&[(12.34, 2), (56.78, 3), (0.99, 7)]), 0.0);
        let reverse = compute_totals(&items(&[(0.99, 7), (56.78, 3), (12.34, 2)]), 0.0);
        assert_eq!(forward.subtotal, reverse.subtotal);
    }

    #[test]
    fn empty_line_items_yield_zero() {
        let result = compute_totals(&[], 25.0);
        assert_eq!(result.subtotal, 0.0);
        assert_eq!(result.final_amount, 0.0);
    }

    #[test]
    fn malformed_prices_coerce_to_zero() {
        let lines = vec![
            LineItem::new("nan", f64::NAN).with_quantity(4),
            LineItem::new("negative", -10.0).with_quantity(2),
            LineItem::new("ok", 5.0).with_quantity(2),
        ];
        let result = compute_totals(&lines, 0.0);
        assert_eq!(result.subtotal, 10.0);
    }

    #[test]
    fn out_of_range_discount_is_clamped() {
        let over = compute_totals(&items(&[(100.0, 1)]), 150.0);
        assert_eq!(over.final_amount, 0.0);

        let under = compute_totals(&items(&[(100.0, 1)]), -5.0);
        assert_eq!(under.final_amount, 100.0);
    }

    #[test]
    fn unquantified_items_price_per_unit() {
        let lines = vec![LineItem::new("a", 40.0), LineItem::new("b", 2.5)];
        let result = compute_totals(&lines, 0.0);
        assert_eq!(result.subtotal, 42.5);
    }
}
