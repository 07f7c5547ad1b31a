//! Enrollment domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shulka_shared::types::{AcademicYearId, ClassId, FeeMonth, StudentId};

/// Input for opening an enrollment with its fee schedule.
///
/// One enrollment ties a student to an academic year; opening it creates
/// one monthly obligation per month from `first_month` through
/// `last_month`, each expecting `monthly_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEnrollmentInput {
    /// The student being enrolled.
    pub student_id: StudentId,
    /// The class the student joins.
    pub class_id: ClassId,
    /// The academic year of the enrollment.
    pub academic_year_id: AcademicYearId,
    /// First fee month of the schedule.
    pub first_month: FeeMonth,
    /// Last fee month of the schedule (inclusive).
    pub last_month: FeeMonth,
    /// Expected amount for every scheduled month.
    pub monthly_amount: Decimal,
}

/// One month of a generated fee schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledObligation {
    /// The fee month.
    pub month: FeeMonth,
    /// The expected amount for that month.
    pub expected_amount: Decimal,
}
