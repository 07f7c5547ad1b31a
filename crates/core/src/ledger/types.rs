//! Ledger domain types for fee tracking and payment allocation.
//!
//! This module defines the core types used for deriving monthly fee
//! statuses and planning payment allocations against an enrollment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shulka_shared::types::{EnrollmentId, FeeMonth, ObligationId, PaymentId, UserId};

/// Payment status of a single fee month.
///
/// The status is always derived from the current expected amount and the
/// allocations recorded so far; it is never stored. A later fee adjustment
/// can therefore move a month in either direction, including from paid
/// back to partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    /// The month is fully covered (or waived).
    Paid,
    /// Some amount is allocated but a balance remains.
    Partial,
    /// Nothing is allocated yet.
    Due,
}

impl FeeStatus {
    /// Returns true if the month still carries an outstanding balance.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Partial | Self::Due)
    }
}

/// Stored state of one monthly obligation, as read from the ledger.
///
/// `paid_amount` is the sum of allocations already recorded against the
/// obligation. Snapshots are what the planning functions operate on; they
/// never reach back into storage themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObligationSnapshot {
    /// The obligation ID.
    pub id: ObligationId,
    /// The fee month this obligation covers.
    pub month: FeeMonth,
    /// The currently expected amount for the month.
    pub expected_amount: Decimal,
    /// Sum of allocations recorded against this obligation.
    pub paid_amount: Decimal,
}

/// Stored state of one payment, as read from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSnapshot {
    /// The payment ID.
    pub id: PaymentId,
    /// The full payment amount.
    pub amount: Decimal,
    /// The date the payment was received.
    pub date: NaiveDate,
}

/// Derived payment status of one fee month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatus {
    /// The obligation this row was derived from.
    pub obligation_id: ObligationId,
    /// The fee month.
    pub month: FeeMonth,
    /// The currently expected amount.
    pub expected_amount: Decimal,
    /// Sum of allocations against the month.
    pub paid_amount: Decimal,
    /// Outstanding balance, clamped at zero.
    pub balance: Decimal,
    /// Derived status.
    pub status: FeeStatus,
}

/// Aggregate fee overview of one enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOverview {
    /// Sum of expected amounts across all months.
    pub total_expected: Decimal,
    /// Sum of all payment amounts, including any unallocated credit.
    pub total_paid: Decimal,
    /// `total_expected - total_paid`; negative when the enrollment
    /// carries a credit.
    pub total_pending: Decimal,
    /// Per-month status rows, sorted by month ascending.
    pub monthly_status: Vec<MonthlyStatus>,
    /// Date of the most recent payment, if any.
    pub last_payment_date: Option<NaiveDate>,
}

/// One planned allocation of a payment to an obligation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAllocation {
    /// The obligation to allocate to.
    pub obligation_id: ObligationId,
    /// The fee month of that obligation.
    pub month: FeeMonth,
    /// The amount to allocate (always positive).
    pub amount: Decimal,
}

/// Result of planning one payment against current balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPlan {
    /// The normalized payment amount.
    pub amount: Decimal,
    /// Planned allocations, oldest month first.
    pub allocations: Vec<PlannedAllocation>,
    /// Remainder left once every balance is cleared. No allocation row is
    /// written for it; it surfaces only as enrollment-level credit.
    pub unallocated: Decimal,
}

impl PaymentPlan {
    /// Returns the total amount allocated by this plan.
    #[must_use]
    pub fn allocated(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// Input for recording a payment against an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentInput {
    /// The enrollment to pay against.
    pub enrollment_id: EnrollmentId,
    /// The payment amount (must be positive).
    pub amount: Decimal,
    /// The date the payment was received.
    pub date: NaiveDate,
    /// Optional free-form remarks.
    pub remarks: Option<String>,
    /// Whether a physical receipt was issued at entry time.
    pub receipt_issued: bool,
    /// The staff user recording the payment.
    pub created_by: UserId,
}

/// Input for adjusting expected amounts across an inclusive month range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustFeeInput {
    /// The enrollment whose months are adjusted.
    pub enrollment_id: EnrollmentId,
    /// First month of the range.
    pub from_month: FeeMonth,
    /// Last month of the range (inclusive).
    pub to_month: FeeMonth,
    /// New expected amount for every month in the range. Zero waives
    /// the fee entirely.
    pub new_amount: Decimal,
    /// Reason recorded on each adjusted month.
    pub reason: String,
}
