//! Money helpers.
//!
//! Every amount in the store is a `Decimal` in Turkish lira. Line totals and
//! display formatting live here so the cart, order and stats code agree on
//! rounding.

use rust_decimal::Decimal;

/// Lira sign used when formatting amounts.
pub const LIRA_SIGN: char = '₺';

/// Unit price multiplied by quantity.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Format an amount for display: `₺43`, `₺12.50`.
///
/// Whole amounts drop the fraction, anything else is shown with two decimals.
#[must_use]
pub fn format_lira(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        format!("{LIRA_SIGN}{}", amount.trunc().normalize())
    } else {
        format!("{LIRA_SIGN}{:.2}", amount.round_dp(2))
    }
}
