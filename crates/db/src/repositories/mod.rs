//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod enrollment;
pub mod ledger;
pub mod report;

pub use enrollment::{EnrollmentRepository, EnrollmentSetupError, EnrollmentWithObligations};
pub use ledger::{FeeLedgerError, LedgerRepository, PaymentWithAllocations};
pub use report::{ReportError, ReportRepository};
