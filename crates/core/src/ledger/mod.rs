//! Monthly fee ledger logic.
//!
//! This module implements the core fee-ledger functionality:
//! - Per-month payment status derivation (paid / partial / due)
//! - Oldest-month-first waterfall allocation of payments
//! - Enrollment fee overviews (totals, per-month rows, last payment date)
//! - Validation for payment amounts and adjustment ranges
//! - Domain types and error types for ledger operations

pub mod error;
pub mod service;
pub mod status;
pub mod types;
pub mod waterfall;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod waterfall_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use status::{derive_status, monthly_status, outstanding_balance};
pub use types::{
    AddPaymentInput, AdjustFeeInput, FeeOverview, FeeStatus, MonthlyStatus, ObligationSnapshot,
    PaymentPlan, PaymentSnapshot, PlannedAllocation,
};
pub use waterfall::plan_waterfall;
