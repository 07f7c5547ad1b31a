//! Migration to create the fee ledger tables: `enrollments`,
//! `monthly_obligations`, `payments`, and `payment_allocations`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::ClassId).uuid().not_null())
                    .col(
                        ColumnDef::new(Enrollments::AcademicYearId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment per student per academic year
        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_student_year")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::AcademicYearId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Class rosters are read per academic year
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_class_year")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::AcademicYearId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MonthlyObligations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyObligations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MonthlyObligations::EnrollmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyObligations::Month)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyObligations::ExpectedAmountPaise)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyObligations::OriginalAmountPaise)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MonthlyObligations::AdjustmentReason).string())
                    .col(
                        ColumnDef::new(MonthlyObligations::AdjustedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyObligations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_obligations_enrollment")
                            .from(MonthlyObligations::Table, MonthlyObligations::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One obligation per enrollment per month; also serves the
        // lexicographic month range filters
        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_obligations_enrollment_month")
                    .table(MonthlyObligations::Table)
                    .col(MonthlyObligations::EnrollmentId)
                    .col(MonthlyObligations::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Payments::EnrollmentId).uuid().not_null())
                    .col(ColumnDef::new(Payments::AmountPaise).big_integer().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).date().not_null())
                    .col(ColumnDef::new(Payments::Remarks).string())
                    .col(
                        ColumnDef::new(Payments::ReceiptIssued)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Payments::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_enrollment")
                            .from(Payments::Table, Payments::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Payment history is listed per enrollment, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_enrollment_date")
                    .table(Payments::Table)
                    .col(Payments::EnrollmentId)
                    .col(Payments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentAllocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentAllocations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentAllocations::PaymentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentAllocations::ObligationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentAllocations::AmountPaise)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentAllocations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_allocations_payment")
                            .from(PaymentAllocations::Table, PaymentAllocations::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_allocations_obligation")
                            .from(PaymentAllocations::Table, PaymentAllocations::ObligationId)
                            .to(MonthlyObligations::Table, MonthlyObligations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_allocations_payment")
                    .table(PaymentAllocations::Table)
                    .col(PaymentAllocations::PaymentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_allocations_obligation")
                    .table(PaymentAllocations::Table)
                    .col(PaymentAllocations::ObligationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentAllocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlyObligations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ClassId,
    AcademicYearId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MonthlyObligations {
    Table,
    Id,
    EnrollmentId,
    Month,
    ExpectedAmountPaise,
    OriginalAmountPaise,
    AdjustmentReason,
    AdjustedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    EnrollmentId,
    AmountPaise,
    PaymentDate,
    Remarks,
    ReceiptIssued,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PaymentAllocations {
    Table,
    Id,
    PaymentId,
    ObligationId,
    AmountPaise,
    CreatedAt,
}
