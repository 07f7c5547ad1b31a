//! Monthly fee status derivation.
//!
//! Status is a pure function of the current expected amount and the
//! allocations recorded so far. Nothing here is stored: after a fee
//! adjustment the same allocations can yield a different status, so a
//! month may move from paid back to partial or due.

use rust_decimal::Decimal;

use super::types::{FeeStatus, MonthlyStatus, ObligationSnapshot};

/// Returns the outstanding balance of a month, clamped at zero.
///
/// A month whose allocations exceed its (possibly reduced) expected
/// amount reports a zero balance, not a negative one.
#[must_use]
pub fn outstanding_balance(expected_amount: Decimal, paid_amount: Decimal) -> Decimal {
    (expected_amount - paid_amount).max(Decimal::ZERO)
}

/// Derives the payment status of a month from its amounts.
///
/// - `Paid` when nothing is outstanding (covers waived months where the
///   expected amount is zero)
/// - `Partial` when something is allocated but a balance remains
/// - `Due` when nothing is allocated
#[must_use]
pub fn derive_status(expected_amount: Decimal, paid_amount: Decimal) -> FeeStatus {
    if paid_amount >= expected_amount {
        FeeStatus::Paid
    } else if paid_amount > Decimal::ZERO {
        FeeStatus::Partial
    } else {
        FeeStatus::Due
    }
}

/// Builds the derived status row for one obligation.
#[must_use]
pub fn monthly_status(obligation: &ObligationSnapshot) -> MonthlyStatus {
    MonthlyStatus {
        obligation_id: obligation.id,
        month: obligation.month,
        expected_amount: obligation.expected_amount,
        paid_amount: obligation.paid_amount,
        balance: outstanding_balance(obligation.expected_amount, obligation.paid_amount),
        status: derive_status(obligation.expected_amount, obligation.paid_amount),
    }
}
