//! Money helpers with decimal precision and minor-unit storage.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` in the domain and integer paise
//! (1/100 of a rupee) at rest, so every supported database backend stores
//! them exactly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Upper bound for a single stored amount, in paise (one trillion rupees).
///
/// Amounts past this bound are rejected during validation so the
/// conversion to storage can never fail for accepted values.
pub const MAX_AMOUNT_PAISE: i64 = 100_000_000_000_000;

/// Normalizes a monetary amount to two decimal places.
///
/// Uses banker's rounding (round half to even) so repeated normalization
/// introduces no directional drift.
#[must_use]
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Converts an amount to integer paise for storage.
///
/// The amount is normalized first, so the conversion is exact. Returns
/// `None` when the normalized amount does not fit in an `i64` of paise;
/// real fee amounts are far below that bound.
#[must_use]
pub fn to_paise(amount: Decimal) -> Option<i64> {
    normalize_amount(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|paise| paise.to_i64())
}

/// Converts stored paise back to a decimal amount.
#[must_use]
pub fn from_paise(paise: i64) -> Decimal {
    Decimal::new(paise, MONEY_SCALE)
}
