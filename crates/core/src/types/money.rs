//! Money conversion and the shared subtotal formula.
//!
//! All conversion from fractional currency to integer minor units happens
//! here, and both the cart view and the checkout builder compute subtotals
//! through [`subtotal_minor`]. A single formula for both call sites is what
//! guarantees the cart page and the gateway request can never disagree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a decimal price to integer minor currency units (cents).
///
/// Rounds half-up (`12.505` -> `1251`). This is the only place fractional
/// currency is converted to minor units.
#[must_use]
pub fn to_minor_units(price: Decimal) -> i64 {
    (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // Catalog prices are validated non-negative and sit far below this
        .unwrap_or(i64::MAX)
}

/// Minor-unit total for a single line.
#[must_use]
pub const fn line_total_minor(unit_amount_minor: i64, quantity: u32) -> i64 {
    unit_amount_minor.saturating_mul(quantity as i64)
}

/// The shared subtotal formula: sum of `unit_amount_minor * quantity`.
///
/// Used by both `Cart::subtotal_minor` (over snapshot prices) and
/// `CheckoutSession` (over freshly resolved line items).
pub fn subtotal_minor<I>(lines: I) -> i64
where
    I: IntoIterator<Item = (i64, u32)>,
{
    lines
        .into_iter()
        .map(|(unit, quantity)| line_total_minor(unit, quantity))
        .sum()
}

/// Format minor units for display, e.g. `1250` -> `"$12.50"`.
#[must_use]
pub fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
