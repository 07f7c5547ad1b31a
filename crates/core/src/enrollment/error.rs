//! Enrollment error types.

use rust_decimal::Decimal;
use shulka_shared::error::AppError;
use shulka_shared::types::{AcademicYearId, FeeMonth, StudentId};
use thiserror::Error;

use super::schedule::MAX_SCHEDULE_MONTHS;

/// Errors that can occur during enrollment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// Schedule range whose start sorts after its end.
    #[error("Invalid month range: {from} is after {to}")]
    InvalidRange {
        /// Requested first month.
        from: FeeMonth,
        /// Requested last month.
        to: FeeMonth,
    },

    /// Schedule spanning more months than one enrollment may carry.
    #[error("Schedule of {months} months exceeds the {max} month limit", max = MAX_SCHEDULE_MONTHS)]
    ScheduleTooLong {
        /// Number of months requested.
        months: u32,
    },

    /// Monthly amount is negative or too large to store.
    #[error("Invalid monthly amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// The student already has an enrollment for the academic year.
    #[error("Student {student_id} is already enrolled for academic year {academic_year_id}")]
    DuplicateEnrollment {
        /// The student.
        student_id: StudentId,
        /// The academic year.
        academic_year_id: AcademicYearId,
    },
}

impl EnrollmentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::ScheduleTooLong { .. } => "SCHEDULE_TOO_LONG",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::DuplicateEnrollment { .. } => "DUPLICATE_ENROLLMENT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidRange { .. } | Self::ScheduleTooLong { .. } | Self::InvalidAmount { .. } => {
                400
            }

            // 409 Conflict
            Self::DuplicateEnrollment { .. } => 409,
        }
    }
}

impl From<EnrollmentError> for AppError {
    fn from(err: EnrollmentError) -> Self {
        match &err {
            EnrollmentError::DuplicateEnrollment { .. } => Self::Conflict(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
