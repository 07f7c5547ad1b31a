//! Oldest-month-first waterfall allocation.
//!
//! A payment is poured over the outstanding months in chronological
//! order: each month absorbs `min(remaining, balance)` until either the
//! payment or the outstanding balances run out. Whatever is left over is
//! returned as an unallocated remainder; no allocation row is ever
//! written for it.

use rust_decimal::Decimal;

use super::types::{MonthlyStatus, PaymentPlan, PlannedAllocation};

/// Plans the allocation of a payment across outstanding months.
///
/// `statuses` must be sorted by month ascending; months with a zero
/// balance are skipped. The caller is expected to pass a normalized,
/// positive amount.
#[must_use]
pub fn plan_waterfall(statuses: &[MonthlyStatus], amount: Decimal) -> PaymentPlan {
    let mut remaining = amount;
    let mut allocations = Vec::new();

    for row in statuses {
        if remaining <= Decimal::ZERO {
            break;
        }
        if row.balance <= Decimal::ZERO {
            continue;
        }

        let apply = remaining.min(row.balance);
        allocations.push(PlannedAllocation {
            obligation_id: row.obligation_id,
            month: row.month,
            amount: apply,
        });
        remaining -= apply;
    }

    PaymentPlan {
        amount,
        allocations,
        unallocated: remaining,
    }
}
