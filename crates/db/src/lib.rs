//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the fee ledger tables
//! - Repository abstractions for data access
//! - Database migrations
//! - Per-enrollment write serialization

pub mod entities;
pub mod locks;
pub mod migration;
pub mod repositories;

pub use repositories::{EnrollmentRepository, LedgerRepository, ReportRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
