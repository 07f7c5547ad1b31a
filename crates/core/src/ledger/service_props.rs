//! Property-based tests for LedgerService overviews.
//!
//! Covered properties:
//! - Overview totals are consistent with the per-month rows
//! - Statuses partition cleanly by balance and paid amount
//! - Building an overview is pure and order-insensitive

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shulka_shared::types::{FeeMonth, ObligationId, PaymentId};

use super::service::LedgerService;
use super::types::{FeeStatus, ObligationSnapshot, PaymentSnapshot};

/// Strategy to generate a fee month.
fn fee_month() -> impl Strategy<Value = FeeMonth> {
    (2020u16..=2030, 1u8..=12).prop_map(|(year, month)| FeeMonth::new(year, month).unwrap())
}

/// Strategy to generate payment dates.
fn payment_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

/// Strategy to generate obligations with arbitrary distinct months.
fn obligations() -> impl Strategy<Value = Vec<ObligationSnapshot>> {
    prop::collection::btree_map(fee_month(), (0i64..1_000_000i64, 0i64..1_200_000i64), 0..=16)
        .prop_map(|by_month| {
            by_month
                .into_iter()
                .map(|(month, (expected, paid))| ObligationSnapshot {
                    id: ObligationId::new(),
                    month,
                    expected_amount: Decimal::new(expected, 2),
                    paid_amount: Decimal::new(paid, 2),
                })
                .collect()
        })
}

/// Strategy to generate recorded payments.
fn payments() -> impl Strategy<Value = Vec<PaymentSnapshot>> {
    prop::collection::vec((1i64..5_000_000i64, payment_date()), 0..=12).prop_map(|rows| {
        rows.into_iter()
            .map(|(paise, date)| PaymentSnapshot {
                id: PaymentId::new(),
                amount: Decimal::new(paise, 2),
                date,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Totals
    // =========================================================================

    /// *For any* enrollment, `total_pending` SHALL equal `total_expected`
    /// minus `total_paid`, and the totals SHALL match the underlying rows.
    #[test]
    fn prop_overview_totals_are_consistent(
        obligations in obligations(),
        payments in payments(),
    ) {
        let overview = LedgerService::build_overview(&obligations, &payments);

        let expected_sum: Decimal = obligations.iter().map(|o| o.expected_amount).sum();
        let paid_sum: Decimal = payments.iter().map(|p| p.amount).sum();

        prop_assert_eq!(overview.total_expected, expected_sum);
        prop_assert_eq!(overview.total_paid, paid_sum);
        prop_assert_eq!(overview.total_pending, expected_sum - paid_sum);
    }

    /// *For any* enrollment, the last payment date SHALL be the maximum of
    /// the payment dates, or absent when there is no payment.
    #[test]
    fn prop_last_payment_date_is_maximum(
        obligations in obligations(),
        payments in payments(),
    ) {
        let overview = LedgerService::build_overview(&obligations, &payments);

        prop_assert_eq!(
            overview.last_payment_date,
            payments.iter().map(|p| p.date).max()
        );
    }

    // =========================================================================
    // Per-month rows
    // =========================================================================

    /// *For any* enrollment, the status rows SHALL be sorted by month
    /// ascending with one row per obligation.
    #[test]
    fn prop_rows_sorted_by_month(
        obligations in obligations(),
        payments in payments(),
    ) {
        let overview = LedgerService::build_overview(&obligations, &payments);

        prop_assert_eq!(overview.monthly_status.len(), obligations.len());
        for pair in overview.monthly_status.windows(2) {
            prop_assert!(pair[0].month < pair[1].month);
        }
    }

    /// *For any* month, the balance SHALL never be negative and the status
    /// SHALL follow from the amounts: paid when nothing is outstanding,
    /// partial when something is allocated, due otherwise.
    #[test]
    fn prop_status_partitions_by_amounts(
        obligations in obligations(),
    ) {
        let rows = LedgerService::monthly_statuses(&obligations);

        for row in &rows {
            prop_assert!(row.balance >= Decimal::ZERO);

            match row.status {
                FeeStatus::Paid => {
                    prop_assert_eq!(row.balance, Decimal::ZERO);
                    prop_assert!(row.paid_amount >= row.expected_amount);
                }
                FeeStatus::Partial => {
                    prop_assert!(row.balance > Decimal::ZERO);
                    prop_assert!(row.paid_amount > Decimal::ZERO);
                }
                FeeStatus::Due => {
                    prop_assert!(row.balance > Decimal::ZERO);
                    prop_assert_eq!(row.paid_amount, Decimal::ZERO);
                }
            }
        }
    }

    // =========================================================================
    // Purity
    // =========================================================================

    /// *For any* inputs, building the overview twice SHALL give identical
    /// results, and shuffling the input order SHALL not change them.
    #[test]
    fn prop_overview_is_pure_and_order_insensitive(
        obligations in obligations(),
        payments in payments(),
    ) {
        let overview = LedgerService::build_overview(&obligations, &payments);
        let again = LedgerService::build_overview(&obligations, &payments);
        prop_assert_eq!(&overview, &again);

        let mut reversed_obligations = obligations.clone();
        reversed_obligations.reverse();
        let mut reversed_payments = payments.clone();
        reversed_payments.reverse();

        let shuffled = LedgerService::build_overview(&reversed_obligations, &reversed_payments);
        prop_assert_eq!(&overview, &shuffled);
    }
}
