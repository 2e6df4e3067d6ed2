//! Monetary rounding.
//!
//! All currency amounts in the ledger are `rust_decimal::Decimal` rounded to
//! two places. Quantities stay unrounded (2.5 kg is a legitimate quantity).

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to 2 decimal places, commercial rounding
/// (midpoint away from zero).
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
