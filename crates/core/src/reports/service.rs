//! Report generation service.

use rust_decimal::Decimal;
use shulka_shared::types::EnrollmentId;

use crate::ledger::FeeOverview;

use super::types::{CollectionSummary, DefaulterRow};

/// Service for generating fee collection reports.
pub struct ReportService;

impl ReportService {
    /// Builds a school-wide collection summary from per-enrollment
    /// overviews.
    ///
    /// Every enrollment lands in exactly one bucket: cleared when nothing
    /// is pending (credits included), partially paid when something was
    /// paid but a balance remains, unpaid otherwise. Defaulters list the
    /// enrollments with a positive pending amount, largest first, ties
    /// broken by enrollment id so the order is stable.
    #[must_use]
    pub fn collection_summary(rows: Vec<(EnrollmentId, FeeOverview)>) -> CollectionSummary {
        let mut summary = CollectionSummary {
            enrollments: rows.len(),
            ..CollectionSummary::default()
        };

        for (enrollment_id, overview) in rows {
            summary.total_expected += overview.total_expected;
            summary.total_paid += overview.total_paid;
            summary.total_pending += overview.total_pending;

            if overview.total_pending <= Decimal::ZERO {
                summary.cleared += 1;
            } else {
                if overview.total_paid > Decimal::ZERO {
                    summary.partially_paid += 1;
                } else {
                    summary.unpaid += 1;
                }
                summary.defaulters.push(DefaulterRow {
                    enrollment_id,
                    pending: overview.total_pending,
                });
            }
        }

        summary.defaulters.sort_by(|a, b| {
            b.pending
                .cmp(&a.pending)
                .then_with(|| a.enrollment_id.into_inner().cmp(&b.enrollment_id.into_inner()))
        });

        summary
    }
}
