//! Enrollment setup and fee schedules.
//!
//! This module implements enrollment-level functionality:
//! - Fee schedule generation for a span of months
//! - Validation of schedule ranges and monthly amounts
//! - Error types for enrollment operations

pub mod error;
pub mod schedule;
pub mod types;

pub use error::EnrollmentError;
pub use schedule::{build_schedule, MAX_SCHEDULE_MONTHS};
pub use types::{OpenEnrollmentInput, ScheduledObligation};
