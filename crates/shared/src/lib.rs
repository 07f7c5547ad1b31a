//! Shared types, errors, and configuration for Shulka.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with decimal precision and minor-unit storage
//! - Typed IDs for type-safe entity references
//! - The `FeeMonth` month key used throughout the fee ledger
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
