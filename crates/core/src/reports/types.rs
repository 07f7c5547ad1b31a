//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shulka_shared::types::EnrollmentId;

/// School-wide fee collection summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    /// Number of enrollments covered.
    pub enrollments: usize,
    /// Sum of expected amounts across all enrollments.
    pub total_expected: Decimal,
    /// Sum of payment amounts across all enrollments.
    pub total_paid: Decimal,
    /// Sum of pending amounts; credits offset dues.
    pub total_pending: Decimal,
    /// Enrollments with nothing pending (including credits).
    pub cleared: usize,
    /// Enrollments with something paid and something pending.
    pub partially_paid: usize,
    /// Enrollments with nothing paid at all.
    pub unpaid: usize,
    /// Enrollments with a positive pending amount, largest first.
    pub defaulters: Vec<DefaulterRow>,
}

/// One defaulter line in a collection summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaulterRow {
    /// The enrollment that owes.
    pub enrollment_id: EnrollmentId,
    /// The pending amount (always positive).
    pub pending: Decimal,
}
