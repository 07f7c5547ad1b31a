//! Fee schedule generation.
//!
//! Opening an enrollment lays down one obligation per month across an
//! inclusive month range, every month expecting the same amount.

use rust_decimal::Decimal;
use shulka_shared::types::{from_paise, to_paise, FeeMonth, MAX_AMOUNT_PAISE};

use super::error::EnrollmentError;
use super::types::ScheduledObligation;

/// Longest schedule one enrollment may carry, in months.
///
/// Academic years run at most a year; two is already generous for
/// bridge programs and carries a hard stop against typo ranges like
/// 2024-04 through 2034-04.
pub const MAX_SCHEDULE_MONTHS: u32 = 24;

/// Builds the fee schedule for an enrollment.
///
/// Returns one entry per month from `first` through `last`, inclusive,
/// each expecting the normalized `monthly_amount`. A zero amount is
/// allowed and schedules the months as waived.
///
/// # Errors
///
/// - `InvalidRange` when `first` sorts after `last`
/// - `ScheduleTooLong` when the range spans more than
///   [`MAX_SCHEDULE_MONTHS`] months
/// - `InvalidAmount` when the amount is negative or does not fit
///   minor-unit storage
pub fn build_schedule(
    first: FeeMonth,
    last: FeeMonth,
    monthly_amount: Decimal,
) -> Result<Vec<ScheduledObligation>, EnrollmentError> {
    if first > last {
        return Err(EnrollmentError::InvalidRange {
            from: first,
            to: last,
        });
    }

    let months = first.span(last);
    if months > MAX_SCHEDULE_MONTHS {
        return Err(EnrollmentError::ScheduleTooLong { months });
    }

    let expected_amount = match to_paise(monthly_amount) {
        Some(paise) if (0..=MAX_AMOUNT_PAISE).contains(&paise) => from_paise(paise),
        _ => {
            return Err(EnrollmentError::InvalidAmount {
                amount: monthly_amount,
            })
        }
    };

    Ok(first
        .through(last)
        .map(|month| ScheduledObligation {
            month,
            expected_amount,
        })
        .collect())
}
