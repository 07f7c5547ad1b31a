//! Fee collection report generation.
//!
//! This module provides pure business logic for collection reporting:
//! - School-wide collection summaries
//! - Defaulter listings ordered by outstanding amount

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
