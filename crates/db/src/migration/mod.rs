//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The schema is written
//! with the portable DSL so the same migrations run on PostgreSQL in
//! production and on in-memory SQLite in the test suite.

pub use sea_orm_migration::prelude::*;

mod m20260801_000001_fee_ledger;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260801_000001_fee_ledger::Migration)]
    }
}
