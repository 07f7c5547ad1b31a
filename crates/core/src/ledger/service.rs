//! Ledger service for fee validation, payment planning, and overviews.
//!
//! This module provides the core business logic for the monthly fee
//! ledger. Everything here is pure: the service reads snapshots the
//! storage layer hands it and returns plans for the storage layer to
//! persist.

use rust_decimal::Decimal;
use shulka_shared::types::{from_paise, to_paise, FeeMonth, MAX_AMOUNT_PAISE};

use super::error::LedgerError;
use super::status::monthly_status;
use super::types::{FeeOverview, MonthlyStatus, ObligationSnapshot, PaymentPlan, PaymentSnapshot};
use super::waterfall::plan_waterfall;

/// Ledger service for fee calculations.
///
/// This service contains pure business logic with no database
/// dependencies. The storage layer snapshots obligations and payments,
/// calls in here, and persists whatever comes back in one transaction.
pub struct LedgerService;

impl LedgerService {
    /// Validates a payment amount and normalizes it to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` unless the amount is strictly positive and
    /// fits minor-unit storage.
    pub fn validate_payment_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
        match to_paise(amount) {
            Some(paise) if paise > 0 && paise <= MAX_AMOUNT_PAISE => Ok(from_paise(paise)),
            _ => Err(LedgerError::InvalidAmount { amount }),
        }
    }

    /// Validates an adjusted monthly fee and normalizes it to two decimal
    /// places. Zero is allowed: it waives the month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount is negative or does not fit
    /// minor-unit storage.
    pub fn validate_fee_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
        match to_paise(amount) {
            Some(paise) if (0..=MAX_AMOUNT_PAISE).contains(&paise) => Ok(from_paise(paise)),
            _ => Err(LedgerError::InvalidAmount { amount }),
        }
    }

    /// Validates an inclusive month range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` when `from` sorts after `to`.
    pub fn validate_month_range(from: FeeMonth, to: FeeMonth) -> Result<(), LedgerError> {
        if from > to {
            return Err(LedgerError::InvalidRange { from, to });
        }
        Ok(())
    }

    /// Validates a fee adjustment request, returning the normalized new
    /// amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` for an inverted range and `InvalidAmount`
    /// for a negative or oversized amount.
    pub fn validate_adjustment(
        from: FeeMonth,
        to: FeeMonth,
        new_amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        Self::validate_month_range(from, to)?;
        Self::validate_fee_amount(new_amount)
    }

    /// Derives the per-month status rows for an enrollment.
    ///
    /// Rows come back sorted by month ascending regardless of the input
    /// order.
    #[must_use]
    pub fn monthly_statuses(obligations: &[ObligationSnapshot]) -> Vec<MonthlyStatus> {
        let mut rows: Vec<MonthlyStatus> = obligations.iter().map(monthly_status).collect();
        rows.sort_by_key(|row| row.month);
        rows
    }

    /// Plans the waterfall allocation of a payment.
    ///
    /// The returned plan carries the normalized amount, the allocations
    /// oldest month first, and the unallocated remainder that becomes
    /// credit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` unless the amount is strictly positive.
    pub fn plan_payment(
        obligations: &[ObligationSnapshot],
        amount: Decimal,
    ) -> Result<PaymentPlan, LedgerError> {
        let amount = Self::validate_payment_amount(amount)?;
        let statuses = Self::monthly_statuses(obligations);
        Ok(plan_waterfall(&statuses, amount))
    }

    /// Builds the aggregate fee overview of an enrollment.
    ///
    /// Safe on an enrollment with no obligations and no payments: totals
    /// are zero, the status list is empty, and there is no last payment
    /// date. `total_pending` goes negative when payments exceed the
    /// expected total; the surplus is the enrollment's credit.
    #[must_use]
    pub fn build_overview(
        obligations: &[ObligationSnapshot],
        payments: &[PaymentSnapshot],
    ) -> FeeOverview {
        let monthly_status = Self::monthly_statuses(obligations);
        let total_expected: Decimal = monthly_status.iter().map(|row| row.expected_amount).sum();
        let total_paid: Decimal = payments.iter().map(|payment| payment.amount).sum();
        let last_payment_date = payments.iter().map(|payment| payment.date).max();

        FeeOverview {
            total_expected,
            total_paid,
            total_pending: total_expected - total_paid,
            monthly_status,
            last_payment_date,
        }
    }
}
