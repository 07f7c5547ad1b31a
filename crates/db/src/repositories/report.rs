//! Report repository: class-level collection summaries.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait};

use shulka_core::ledger::LedgerService;
use shulka_core::reports::{CollectionSummary, ReportService};
use shulka_shared::error::AppError;
use shulka_shared::types::{AcademicYearId, ClassId, EnrollmentId};

use crate::entities::enrollments;

use super::ledger::{obligation_snapshots, payment_snapshots};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Report repository for aggregated collection views.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the collection summary of one class in one academic year.
    ///
    /// Every enrollment of the class is bucketed exactly once as cleared,
    /// partially paid, or unpaid, and enrollments with pending amounts
    /// come back as defaulters, largest pending first. An unknown class
    /// or a class without enrollments yields the zeroed summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn class_collection(
        &self,
        class_id: ClassId,
        academic_year_id: AcademicYearId,
    ) -> Result<CollectionSummary, ReportError> {
        // One transaction so every enrollment is summarized against the
        // same committed state.
        let txn = self.db.begin().await?;

        let roster = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id.into_inner()))
            .filter(enrollments::Column::AcademicYearId.eq(academic_year_id.into_inner()))
            .all(&txn)
            .await?;

        let mut rows = Vec::with_capacity(roster.len());
        for enrollment in roster {
            let enrollment_id = EnrollmentId::from_uuid(enrollment.id);
            let obligations = obligation_snapshots(&txn, enrollment_id).await?;
            let payments = payment_snapshots(&txn, enrollment_id).await?;
            rows.push((
                enrollment_id,
                LedgerService::build_overview(&obligations, &payments),
            ));
        }

        txn.commit().await?;

        Ok(ReportService::collection_summary(rows))
    }
}
