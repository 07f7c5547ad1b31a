//! Enrollment repository: admission setup and roster lookups.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use shulka_core::enrollment::{build_schedule, EnrollmentError, OpenEnrollmentInput};
use shulka_shared::error::AppError;
use shulka_shared::types::{AcademicYearId, ClassId, EnrollmentId, ObligationId};

use crate::entities::{enrollments, monthly_obligations};

use super::ledger::stored_paise;

/// Error types for enrollment setup operations.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentSetupError {
    /// Enrollment not found.
    #[error("Enrollment not found: {0}")]
    NotFound(EnrollmentId),

    /// Domain validation rejected the input.
    #[error("Validation error: {0}")]
    Validation(#[from] EnrollmentError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EnrollmentSetupError> for AppError {
    fn from(err: EnrollmentSetupError) -> Self {
        match err {
            EnrollmentSetupError::NotFound(id) => Self::NotFound(format!("enrollment {id}")),
            EnrollmentSetupError::Validation(inner) => inner.into(),
            EnrollmentSetupError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Enrollment together with its generated fee schedule.
#[derive(Debug, Clone)]
pub struct EnrollmentWithObligations {
    /// The created enrollment.
    pub enrollment: enrollments::Model,
    /// One obligation per scheduled month, sorted by month ascending.
    pub obligations: Vec<monthly_obligations::Model>,
}

/// Enrollment repository for admission and lookup operations.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    db: DatabaseConnection,
}

impl EnrollmentRepository {
    /// Creates a new enrollment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens an enrollment and lays down its monthly fee schedule in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The month range is inverted or longer than the schedule limit
    /// - The monthly amount is negative or does not fit minor-unit storage
    /// - The student already has an enrollment for the academic year
    /// - The database operation fails
    pub async fn open_enrollment(
        &self,
        input: OpenEnrollmentInput,
    ) -> Result<EnrollmentWithObligations, EnrollmentSetupError> {
        let schedule = build_schedule(input.first_month, input.last_month, input.monthly_amount)?;

        let txn = self.db.begin().await?;

        // One enrollment per student per academic year. The unique index
        // on (student_id, academic_year_id) backstops this check.
        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(input.student_id.into_inner()))
            .filter(enrollments::Column::AcademicYearId.eq(input.academic_year_id.into_inner()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(EnrollmentError::DuplicateEnrollment {
                student_id: input.student_id,
                academic_year_id: input.academic_year_id,
            }
            .into());
        }

        let now = Utc::now().into();

        let enrollment = enrollments::ActiveModel {
            id: Set(EnrollmentId::new().into_inner()),
            student_id: Set(input.student_id.into_inner()),
            class_id: Set(input.class_id.into_inner()),
            academic_year_id: Set(input.academic_year_id.into_inner()),
            created_at: Set(now),
        };
        let enrollment = enrollment.insert(&txn).await?;

        let mut obligations = Vec::with_capacity(schedule.len());
        for scheduled in &schedule {
            let amount_paise = stored_paise(scheduled.expected_amount)?;
            let obligation = monthly_obligations::ActiveModel {
                id: Set(ObligationId::new().into_inner()),
                enrollment_id: Set(enrollment.id),
                month: Set(scheduled.month.to_string()),
                expected_amount_paise: Set(amount_paise),
                original_amount_paise: Set(amount_paise),
                adjustment_reason: Set(None),
                adjusted_at: Set(None),
                created_at: Set(now),
            };
            obligations.push(obligation.insert(&txn).await?);
        }

        txn.commit().await?;

        tracing::debug!(
            enrollment_id = %enrollment.id,
            months = obligations.len(),
            "enrollment opened"
        );

        Ok(EnrollmentWithObligations {
            enrollment,
            obligations,
        })
    }

    /// Fetches one enrollment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment is not found or the database
    /// query fails.
    pub async fn find_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<enrollments::Model, EnrollmentSetupError> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(EnrollmentSetupError::NotFound(enrollment_id))?;

        Ok(enrollment)
    }

    /// Lists the enrollments of one class in one academic year, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn enrollments_for_class(
        &self,
        class_id: ClassId,
        academic_year_id: AcademicYearId,
    ) -> Result<Vec<enrollments::Model>, EnrollmentSetupError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id.into_inner()))
            .filter(enrollments::Column::AcademicYearId.eq(academic_year_id.into_inner()))
            .order_by_asc(enrollments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
