//! Core business logic for Shulka.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Monthly fee ledger: statuses, waterfall allocation, overviews
//! - `enrollment` - Enrollment fee schedules
//! - `reports` - Fee collection reporting

pub mod enrollment;
pub mod ledger;
pub mod reports;
