//! Integration tests for enrollment setup.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use shulka_core::enrollment::{EnrollmentError, OpenEnrollmentInput};
use shulka_core::ledger::FeeStatus;
use shulka_db::migration::{Migrator, MigratorTrait};
use shulka_db::repositories::{EnrollmentRepository, EnrollmentSetupError, LedgerRepository};
use shulka_shared::types::{AcademicYearId, ClassId, EnrollmentId, FeeMonth, StudentId};

fn month(year: u16, m: u8) -> FeeMonth {
    FeeMonth::new(year, m).unwrap()
}

async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

fn enrollment_input(
    student_id: StudentId,
    academic_year_id: AcademicYearId,
    monthly_amount: Decimal,
) -> OpenEnrollmentInput {
    OpenEnrollmentInput {
        student_id,
        class_id: ClassId::new(),
        academic_year_id,
        first_month: month(2024, 4),
        last_month: month(2025, 3),
        monthly_amount,
    }
}

// ============================================================================
// Opening enrollments
// ============================================================================

#[tokio::test]
async fn test_open_enrollment_schedules_every_month() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let created = repo
        .open_enrollment(enrollment_input(
            StudentId::new(),
            AcademicYearId::new(),
            dec!(600),
        ))
        .await
        .expect("open enrollment");

    assert_eq!(created.obligations.len(), 12);
    assert_eq!(created.obligations[0].month, "2024-04");
    assert_eq!(created.obligations[8].month, "2024-12");
    assert_eq!(created.obligations[9].month, "2025-01");
    assert_eq!(created.obligations[11].month, "2025-03");

    for obligation in &created.obligations {
        assert_eq!(obligation.enrollment_id, created.enrollment.id);
        assert_eq!(obligation.expected_amount_paise, 60_000);
        assert_eq!(obligation.original_amount_paise, 60_000);
        assert_eq!(obligation.adjustment_reason, None);
        assert_eq!(obligation.adjusted_at, None);
    }

    println!("✓ opened a 12-month enrollment at 600/month");
}

#[tokio::test]
async fn test_single_month_enrollment() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let created = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: ClassId::new(),
            academic_year_id: AcademicYearId::new(),
            first_month: month(2024, 6),
            last_month: month(2024, 6),
            monthly_amount: dec!(750),
        })
        .await
        .expect("open enrollment");

    assert_eq!(created.obligations.len(), 1);
    assert_eq!(created.obligations[0].month, "2024-06");
}

#[tokio::test]
async fn test_zero_amount_schedule_is_fully_waived() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db.clone());

    let created = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: ClassId::new(),
            academic_year_id: AcademicYearId::new(),
            first_month: month(2024, 4),
            last_month: month(2024, 6),
            monthly_amount: dec!(0),
        })
        .await
        .expect("a zero fee is a valid schedule");

    let ledger = LedgerRepository::new(db);
    let overview = ledger
        .overview(EnrollmentId::from_uuid(created.enrollment.id))
        .await
        .expect("overview");

    assert_eq!(overview.total_expected, dec!(0));
    assert_eq!(overview.total_pending, dec!(0));
    assert!(overview
        .monthly_status
        .iter()
        .all(|row| row.status == FeeStatus::Paid));
}

// ============================================================================
// Rejected inputs
// ============================================================================

#[tokio::test]
async fn test_duplicate_enrollment_rejected() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let student = StudentId::new();
    let year = AcademicYearId::new();

    repo.open_enrollment(enrollment_input(student, year, dec!(600)))
        .await
        .expect("first enrollment");

    let err = repo
        .open_enrollment(enrollment_input(student, year, dec!(600)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollmentSetupError::Validation(EnrollmentError::DuplicateEnrollment { .. })
    ));

    // The same student can enroll for a different academic year
    repo.open_enrollment(enrollment_input(student, AcademicYearId::new(), dec!(600)))
        .await
        .expect("next year's enrollment");
}

#[tokio::test]
async fn test_open_enrollment_rejects_inverted_range() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let err = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: ClassId::new(),
            academic_year_id: AcademicYearId::new(),
            first_month: month(2025, 3),
            last_month: month(2024, 4),
            monthly_amount: dec!(600),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnrollmentSetupError::Validation(EnrollmentError::InvalidRange { .. })
    ));
}

#[tokio::test]
async fn test_open_enrollment_caps_schedule_length() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    // 25 months, one past the cap
    let err = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: ClassId::new(),
            academic_year_id: AcademicYearId::new(),
            first_month: month(2024, 4),
            last_month: month(2026, 4),
            monthly_amount: dec!(600),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnrollmentSetupError::Validation(EnrollmentError::ScheduleTooLong { .. })
    ));
}

#[tokio::test]
async fn test_open_enrollment_rejects_negative_amount() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let err = repo
        .open_enrollment(enrollment_input(
            StudentId::new(),
            AcademicYearId::new(),
            dec!(-600),
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnrollmentSetupError::Validation(EnrollmentError::InvalidAmount { .. })
    ));
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn test_find_enrollment_roundtrip() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let student = StudentId::new();
    let created = repo
        .open_enrollment(enrollment_input(student, AcademicYearId::new(), dec!(600)))
        .await
        .expect("open enrollment");
    let id = EnrollmentId::from_uuid(created.enrollment.id);

    let found = repo.find_enrollment(id).await.expect("find enrollment");
    assert_eq!(found.id, created.enrollment.id);
    assert_eq!(found.student_id, student.into_inner());

    let missing = EnrollmentId::new();
    let err = repo.find_enrollment(missing).await.unwrap_err();
    assert!(matches!(err, EnrollmentSetupError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn test_enrollments_for_class_scoped_to_class_and_year() {
    let db = setup_db().await;
    let repo = EnrollmentRepository::new(db);

    let class_a = ClassId::new();
    let class_b = ClassId::new();
    let year = AcademicYearId::new();

    let first = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: class_a,
            academic_year_id: year,
            first_month: month(2024, 4),
            last_month: month(2025, 3),
            monthly_amount: dec!(600),
        })
        .await
        .expect("enrollment in class a");
    let second = repo
        .open_enrollment(OpenEnrollmentInput {
            student_id: StudentId::new(),
            class_id: class_a,
            academic_year_id: year,
            first_month: month(2024, 4),
            last_month: month(2025, 3),
            monthly_amount: dec!(600),
        })
        .await
        .expect("enrollment in class a");
    repo.open_enrollment(OpenEnrollmentInput {
        student_id: StudentId::new(),
        class_id: class_b,
        academic_year_id: year,
        first_month: month(2024, 4),
        last_month: month(2025, 3),
        monthly_amount: dec!(600),
    })
    .await
    .expect("enrollment in class b");

    let roster = repo
        .enrollments_for_class(class_a, year)
        .await
        .expect("roster");

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].id, first.enrollment.id);
    assert_eq!(roster[1].id, second.enrollment.id);

    let empty = repo
        .enrollments_for_class(ClassId::new(), year)
        .await
        .expect("empty roster");
    assert!(empty.is_empty());
}
