//! Indian currency display.
//!
//! Snapshot amounts are held in ₹ Lakhs (1 Lakh = ₹1,00,000; 1 Crore = 100
//! Lakhs). These helpers turn them into the compact and exact strings used by
//! the CLI table output.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

const LAKHS_PER_CRORE: Decimal = dec!(100);
const RUPEES_PER_LAKH: Decimal = dec!(100000);

fn half_up(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

fn fixed(value: Decimal, places: u32) -> String {
    format!("{:.*}", places as usize, half_up(value, places))
}

/// Compact display of an amount in Lakhs.
///
/// `25000` → `₹250 Cr`, `450` → `₹4.5 Cr`, `12.34` → `₹12.3 L`,
/// `0.5` → `₹50 K`, anything smaller falls back to exact rupees.
pub fn format_inr(lakhs: Decimal) -> String {
    let abs = lakhs.abs();
    let sign = if lakhs.is_sign_negative() && !lakhs.is_zero() {
        "-"
    } else {
        ""
    };

    if abs >= dec!(10000) {
        return format!("{sign}₹{} Cr", fixed(abs / LAKHS_PER_CRORE, 0));
    }
    if abs >= dec!(100) {
        return format!("{sign}₹{} Cr", fixed(abs / LAKHS_PER_CRORE, 1));
    }
    if abs >= Decimal::ONE {
        return format!("{sign}₹{} L", fixed(abs, 1));
    }
    let thousands = abs * dec!(100);
    if thousands >= Decimal::ONE {
        return format!("{sign}₹{} K", fixed(thousands, 0));
    }
    format!("{sign}{}", format_inr_exact(abs * RUPEES_PER_LAKH))
}

/// Whole rupees with Indian digit grouping: `1234567` → `₹12,34,567`.
pub fn format_inr_exact(rupees: Decimal) -> String {
    let rounded = half_up(rupees, 0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
