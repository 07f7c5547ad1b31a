//! Property-based tests for waterfall payment allocation.
//!
//! Covered properties:
//! - Conservation: every rupee of a payment is allocated or left as credit
//! - Ordering: allocations fill the oldest outstanding months first
//! - Bounds: no allocation exceeds the balance of its month

use proptest::prelude::*;
use rust_decimal::Decimal;
use shulka_shared::types::{FeeMonth, ObligationId};

use super::service::LedgerService;
use super::types::ObligationSnapshot;

/// Strategy to generate a starting fee month.
fn start_month() -> impl Strategy<Value = FeeMonth> {
    (2020u16..=2030, 1u8..=12).prop_map(|(year, month)| FeeMonth::new(year, month).unwrap())
}

/// Strategy to generate expected amounts (0.00 to 10,000.00).
fn expected_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy to generate positive payment amounts (0.01 to 50,000.00).
fn payment_amount() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy to generate a run of consecutive monthly obligations.
///
/// Paid amounts may exceed expected amounts; a shrunken fee adjustment
/// leaves exactly that state behind, and the planner must cope with it.
fn obligation_ledger() -> impl Strategy<Value = Vec<ObligationSnapshot>> {
    (
        start_month(),
        prop::collection::vec((expected_amount(), 0i64..1_200_000i64), 1..=18),
    )
        .prop_map(|(first, rows)| {
            let horizon = FeeMonth::new(9999, 12).unwrap();
            first
                .through(horizon)
                .zip(rows)
                .map(|(month, (expected, paid_paise))| ObligationSnapshot {
                    id: ObligationId::new(),
                    month,
                    expected_amount: expected,
                    paid_amount: Decimal::new(paid_paise, 2),
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Conservation
    // =========================================================================

    /// *For any* ledger and positive payment, the allocated total plus the
    /// unallocated remainder SHALL equal the payment amount exactly.
    #[test]
    fn prop_payment_is_conserved(
        obligations in obligation_ledger(),
        amount in payment_amount(),
    ) {
        let plan = LedgerService::plan_payment(&obligations, amount).unwrap();

        prop_assert_eq!(plan.amount, amount);
        prop_assert_eq!(plan.allocated() + plan.unallocated, amount);
        prop_assert!(plan.unallocated >= Decimal::ZERO);
    }

    /// *For any* plan, every allocation SHALL be positive and SHALL NOT
    /// exceed the outstanding balance of its month.
    #[test]
    fn prop_allocations_stay_within_balances(
        obligations in obligation_ledger(),
        amount in payment_amount(),
    ) {
        let plan = LedgerService::plan_payment(&obligations, amount).unwrap();

        for allocation in &plan.allocations {
            let target = obligations
                .iter()
                .find(|o| o.id == allocation.obligation_id)
                .unwrap();
            let balance = (target.expected_amount - target.paid_amount).max(Decimal::ZERO);

            prop_assert!(allocation.amount > Decimal::ZERO);
            prop_assert!(allocation.amount <= balance);
        }
    }

    /// *For any* plan with an unallocated remainder, every month SHALL be
    /// fully covered; credit only arises once nothing is outstanding.
    #[test]
    fn prop_credit_implies_everything_cleared(
        obligations in obligation_ledger(),
        amount in payment_amount(),
    ) {
        let plan = LedgerService::plan_payment(&obligations, amount).unwrap();

        if plan.unallocated > Decimal::ZERO {
            let allocated_per_month = |id| {
                plan.allocations
                    .iter()
                    .filter(|a| a.obligation_id == id)
                    .map(|a| a.amount)
                    .sum::<Decimal>()
            };
            for obligation in &obligations {
                let covered = obligation.paid_amount + allocated_per_month(obligation.id);
                prop_assert!(covered >= obligation.expected_amount);
            }
        }
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// *For any* plan, allocations SHALL land on strictly ascending months,
    /// and every outstanding month older than an allocated month SHALL be
    /// fully cleared by the plan.
    #[test]
    fn prop_oldest_months_fill_first(
        obligations in obligation_ledger(),
        amount in payment_amount(),
    ) {
        let plan = LedgerService::plan_payment(&obligations, amount).unwrap();

        for pair in plan.allocations.windows(2) {
            prop_assert!(pair[0].month < pair[1].month);
        }

        // All allocations but the last clear their month completely.
        for allocation in plan.allocations.iter().rev().skip(1) {
            let target = obligations
                .iter()
                .find(|o| o.id == allocation.obligation_id)
                .unwrap();
            let balance = (target.expected_amount - target.paid_amount).max(Decimal::ZERO);
            prop_assert_eq!(allocation.amount, balance);
        }

        if let Some(first_allocated) = plan.allocations.first() {
            for obligation in &obligations {
                let balance =
                    (obligation.expected_amount - obligation.paid_amount).max(Decimal::ZERO);
                if balance > Decimal::ZERO && obligation.month < first_allocated.month {
                    prop_assert!(
                        false,
                        "older outstanding month {} skipped",
                        obligation.month
                    );
                }
            }
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// *For any* non-positive amount, planning SHALL be rejected before any
    /// allocation is attempted.
    #[test]
    fn prop_non_positive_amounts_rejected(
        obligations in obligation_ledger(),
        paise in -1_000_000i64..=0i64,
    ) {
        let amount = Decimal::new(paise, 2);
        let result = LedgerService::plan_payment(&obligations, amount);

        prop_assert!(result.is_err());
    }
}
