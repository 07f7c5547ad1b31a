//! `SeaORM` entity definitions for the fee ledger tables.

pub mod enrollments;
pub mod monthly_obligations;
pub mod payment_allocations;
pub mod payments;
