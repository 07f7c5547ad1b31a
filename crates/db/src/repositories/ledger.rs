//! Fee ledger repository: payments, allocations, and monthly obligations.
//!
//! Every write follows the same shape: take the enrollment's write lock,
//! snapshot the current ledger inside a transaction, let the pure ledger
//! service plan the change, persist the plan, commit. A payment and its
//! allocation rows are never partially visible.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use shulka_core::ledger::{
    AddPaymentInput, AdjustFeeInput, FeeOverview, LedgerError, LedgerService, ObligationSnapshot,
    PaymentSnapshot,
};
use shulka_shared::error::AppError;
use shulka_shared::types::{
    from_paise, to_paise, AllocationId, EnrollmentId, FeeMonth, ObligationId, PaymentId,
};

use crate::entities::{enrollments, monthly_obligations, payment_allocations, payments};
use crate::locks::EnrollmentLocks;

/// Error types for fee ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum FeeLedgerError {
    /// Enrollment not found.
    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(EnrollmentId),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Domain validation rejected the input.
    #[error("Validation error: {0}")]
    Validation(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FeeLedgerError> for AppError {
    fn from(err: FeeLedgerError) -> Self {
        match err {
            FeeLedgerError::EnrollmentNotFound(id) => Self::NotFound(format!("enrollment {id}")),
            FeeLedgerError::PaymentNotFound(id) => Self::NotFound(format!("payment {id}")),
            FeeLedgerError::Validation(inner) => inner.into(),
            FeeLedgerError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Payment together with the allocation rows recorded alongside it.
#[derive(Debug, Clone)]
pub struct PaymentWithAllocations {
    /// The recorded payment.
    pub payment: payments::Model,
    /// Allocations applied to monthly obligations, oldest month first.
    /// Empty when the whole payment became credit.
    pub allocations: Vec<payment_allocations::Model>,
}

/// Fee ledger repository for payment and obligation operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    locks: Arc<EnrollmentLocks>,
}

impl LedgerRepository {
    /// Creates a new fee ledger repository.
    ///
    /// Clones share the per-enrollment lock registry; all writers for an
    /// enrollment must go through this repository or a clone of it.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            locks: Arc::new(EnrollmentLocks::new()),
        }
    }

    /// Builds the aggregate fee overview of an enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment does not exist or the database
    /// query fails.
    pub async fn overview(&self, enrollment_id: EnrollmentId) -> Result<FeeOverview, FeeLedgerError> {
        // Snapshot both tables in one transaction so a concurrent
        // payment commit cannot land between the two reads.
        let txn = self.db.begin().await?;

        ensure_enrollment(&txn, enrollment_id).await?;
        let obligations = obligation_snapshots(&txn, enrollment_id).await?;
        let payments = payment_snapshots(&txn, enrollment_id).await?;

        txn.commit().await?;

        Ok(LedgerService::build_overview(&obligations, &payments))
    }

    /// Records a payment and allocates it oldest month first.
    ///
    /// Whatever remains once every balance is cleared is kept as
    /// enrollment-level credit: the payment row carries the full amount
    /// and no allocation row is written for the remainder.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive
    /// - The enrollment does not exist
    /// - The database operation fails
    pub async fn add_payment(
        &self,
        input: AddPaymentInput,
    ) -> Result<PaymentWithAllocations, FeeLedgerError> {
        let _guard = self.locks.acquire(input.enrollment_id.into_inner()).await;

        let txn = self.db.begin().await?;

        ensure_enrollment(&txn, input.enrollment_id).await?;

        // Plan against the current balances
        let obligations = obligation_snapshots(&txn, input.enrollment_id).await?;
        let plan = LedgerService::plan_payment(&obligations, input.amount)?;

        let now = Utc::now().into();

        let payment = payments::ActiveModel {
            id: Set(PaymentId::new().into_inner()),
            enrollment_id: Set(input.enrollment_id.into_inner()),
            amount_paise: Set(stored_paise(plan.amount)?),
            payment_date: Set(input.date),
            remarks: Set(input.remarks.clone()),
            receipt_issued: Set(input.receipt_issued),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now),
        };
        let payment = payment.insert(&txn).await?;

        let mut allocations = Vec::with_capacity(plan.allocations.len());
        for planned in &plan.allocations {
            let allocation = payment_allocations::ActiveModel {
                id: Set(AllocationId::new().into_inner()),
                payment_id: Set(payment.id),
                obligation_id: Set(planned.obligation_id.into_inner()),
                amount_paise: Set(stored_paise(planned.amount)?),
                created_at: Set(now),
            };
            allocations.push(allocation.insert(&txn).await?);
        }

        txn.commit().await?;

        tracing::debug!(
            payment_id = %payment.id,
            enrollment_id = %input.enrollment_id,
            allocated = %plan.allocated(),
            credit = %plan.unallocated,
            "payment recorded"
        );

        Ok(PaymentWithAllocations {
            payment,
            allocations,
        })
    }

    /// Overwrites the expected amount for every obligation in an
    /// inclusive month range.
    ///
    /// Each adjusted row keeps its original amount and gains the reason
    /// and adjustment timestamp; earlier adjustments are overwritten, not
    /// stacked. Months in the range without an obligation are skipped.
    ///
    /// Shrinking a month below what is already allocated is allowed; the
    /// month keeps its allocations and reports a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `from_month` sorts after `to_month`
    /// - The new amount is negative or does not fit minor-unit storage
    /// - The enrollment does not exist
    /// - The database operation fails
    pub async fn adjust_monthly_fee(
        &self,
        input: AdjustFeeInput,
    ) -> Result<Vec<monthly_obligations::Model>, FeeLedgerError> {
        let _guard = self.locks.acquire(input.enrollment_id.into_inner()).await;

        let new_amount =
            LedgerService::validate_adjustment(input.from_month, input.to_month, input.new_amount)?;
        let new_amount_paise = stored_paise(new_amount)?;

        let txn = self.db.begin().await?;

        ensure_enrollment(&txn, input.enrollment_id).await?;

        // The stored month keys sort lexicographically in chronological
        // order, so an inclusive string range is an inclusive month range.
        let targets = monthly_obligations::Entity::find()
            .filter(monthly_obligations::Column::EnrollmentId.eq(input.enrollment_id.into_inner()))
            .filter(monthly_obligations::Column::Month.gte(input.from_month.to_string()))
            .filter(monthly_obligations::Column::Month.lte(input.to_month.to_string()))
            .order_by_asc(monthly_obligations::Column::Month)
            .all(&txn)
            .await?;

        let allocated = allocated_by_obligation(&txn, &targets).await?;

        let now = Utc::now().into();
        let mut updated = Vec::with_capacity(targets.len());
        for obligation in targets {
            let paid = allocated
                .get(&obligation.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if paid > new_amount {
                tracing::warn!(
                    enrollment_id = %input.enrollment_id,
                    month = %obligation.month,
                    allocated = %paid,
                    new_expected = %new_amount,
                    "fee adjusted below the amount already allocated"
                );
            }

            let mut active: monthly_obligations::ActiveModel = obligation.into();
            active.expected_amount_paise = Set(new_amount_paise);
            active.adjustment_reason = Set(Some(input.reason.clone()));
            active.adjusted_at = Set(Some(now));
            updated.push(active.update(&txn).await?);
        }

        txn.commit().await?;

        Ok(updated)
    }

    /// Flips the receipt flag on one payment and returns the updated row.
    ///
    /// Toggling twice restores the original value.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found or the database
    /// operation fails.
    pub async fn toggle_receipt_issued(
        &self,
        payment_id: PaymentId,
    ) -> Result<payments::Model, FeeLedgerError> {
        let payment = payments::Entity::find_by_id(payment_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(FeeLedgerError::PaymentNotFound(payment_id))?;

        let issued = !payment.receipt_issued;
        let mut active: payments::ActiveModel = payment.into();
        active.receipt_issued = Set(issued);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Lists the monthly obligations of an enrollment, sorted by month
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment does not exist or the database
    /// query fails.
    pub async fn monthly_fees(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<monthly_obligations::Model>, FeeLedgerError> {
        ensure_enrollment(&self.db, enrollment_id).await?;

        let fees = monthly_obligations::Entity::find()
            .filter(monthly_obligations::Column::EnrollmentId.eq(enrollment_id.into_inner()))
            .order_by_asc(monthly_obligations::Column::Month)
            .all(&self.db)
            .await?;

        Ok(fees)
    }

    /// Lists the payments of an enrollment, newest first.
    ///
    /// Payments on the same date are ordered by entry time, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment does not exist or the database
    /// query fails.
    pub async fn payments(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<payments::Model>, FeeLedgerError> {
        ensure_enrollment(&self.db, enrollment_id).await?;

        let rows = payments::Entity::find()
            .filter(payments::Column::EnrollmentId.eq(enrollment_id.into_inner()))
            .order_by_desc(payments::Column::PaymentDate)
            .order_by_desc(payments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}

/// Fails with `EnrollmentNotFound` unless the enrollment row exists.
async fn ensure_enrollment<C: ConnectionTrait>(
    conn: &C,
    enrollment_id: EnrollmentId,
) -> Result<(), FeeLedgerError> {
    enrollments::Entity::find_by_id(enrollment_id.into_inner())
        .one(conn)
        .await?
        .ok_or(FeeLedgerError::EnrollmentNotFound(enrollment_id))?;
    Ok(())
}

/// Reads the obligations of an enrollment with their allocation sums.
pub(crate) async fn obligation_snapshots<C: ConnectionTrait>(
    conn: &C,
    enrollment_id: EnrollmentId,
) -> Result<Vec<ObligationSnapshot>, DbErr> {
    let rows = monthly_obligations::Entity::find()
        .filter(monthly_obligations::Column::EnrollmentId.eq(enrollment_id.into_inner()))
        .all(conn)
        .await?;

    let allocated = allocated_by_obligation(conn, &rows).await?;

    rows.into_iter()
        .map(|row| {
            Ok(ObligationSnapshot {
                id: ObligationId::from_uuid(row.id),
                month: stored_month(&row.month)?,
                expected_amount: from_paise(row.expected_amount_paise),
                paid_amount: allocated.get(&row.id).copied().unwrap_or(Decimal::ZERO),
            })
        })
        .collect()
}

/// Reads the payments of an enrollment as planning snapshots.
pub(crate) async fn payment_snapshots<C: ConnectionTrait>(
    conn: &C,
    enrollment_id: EnrollmentId,
) -> Result<Vec<PaymentSnapshot>, DbErr> {
    let rows = payments::Entity::find()
        .filter(payments::Column::EnrollmentId.eq(enrollment_id.into_inner()))
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| PaymentSnapshot {
            id: PaymentId::from_uuid(row.id),
            amount: from_paise(row.amount_paise),
            date: row.payment_date,
        })
        .collect())
}

/// Sums recorded allocations per obligation.
async fn allocated_by_obligation<C: ConnectionTrait>(
    conn: &C,
    obligations: &[monthly_obligations::Model],
) -> Result<HashMap<Uuid, Decimal>, DbErr> {
    let mut allocated: HashMap<Uuid, Decimal> = HashMap::new();
    if obligations.is_empty() {
        return Ok(allocated);
    }

    let ids: Vec<Uuid> = obligations.iter().map(|row| row.id).collect();
    let rows = payment_allocations::Entity::find()
        .filter(payment_allocations::Column::ObligationId.is_in(ids))
        .all(conn)
        .await?;

    for row in rows {
        *allocated.entry(row.obligation_id).or_insert(Decimal::ZERO) +=
            from_paise(row.amount_paise);
    }

    Ok(allocated)
}

/// Converts a validated amount to its stored minor-unit value.
pub(crate) fn stored_paise(amount: Decimal) -> Result<i64, DbErr> {
    to_paise(amount)
        .ok_or_else(|| DbErr::Custom(format!("amount {amount} does not fit minor-unit storage")))
}

/// Parses a stored month key back into a fee month.
fn stored_month(raw: &str) -> Result<FeeMonth, DbErr> {
    raw.parse()
        .map_err(|err| DbErr::Custom(format!("stored month key {raw:?} is invalid: {err}")))
}
