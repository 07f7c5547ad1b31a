//! Database seeder for Shulka development and testing.
//!
//! Seeds a demo class with three enrollments in different payment states
//! (cleared, partially paid, unpaid with a discount) for local development
//! and testing purposes.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use shulka_core::enrollment::{EnrollmentError, OpenEnrollmentInput};
use shulka_core::ledger::{AddPaymentInput, AdjustFeeInput};
use shulka_db::repositories::{
    EnrollmentRepository, EnrollmentSetupError, LedgerRepository, ReportRepository,
};
use shulka_shared::types::{AcademicYearId, ClassId, EnrollmentId, FeeMonth, StudentId, UserId};
use shulka_shared::AppConfig;

/// Demo class ID (consistent for all seeds)
const DEMO_CLASS_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo academic year ID (consistent for all seeds)
const DEMO_YEAR_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo clerk recording the payments (consistent for all seeds)
const DEMO_CLERK_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Demo student IDs (consistent for all seeds)
const DEMO_STUDENT_IDS: [&str; 3] = [
    "00000000-0000-0000-0000-000000000011",
    "00000000-0000-0000-0000-000000000012",
    "00000000-0000-0000-0000-000000000013",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing so repository-level events are visible
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shulka_db=debug,shulka_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = shulka_db::connect(&config.database.url).await?;

    println!("Seeding demo enrollments...");
    let enrollments = seed_enrollments(&db).await;

    println!("Seeding demo payments...");
    seed_payments(&db, &enrollments).await;

    println!("Seeding a fee adjustment...");
    seed_adjustment(&db, &enrollments).await;

    print_summary(&db).await;

    println!("Seeding complete!");
    Ok(())
}

fn demo_class_id() -> ClassId {
    ClassId::from_uuid(Uuid::parse_str(DEMO_CLASS_ID).unwrap())
}

fn demo_year_id() -> AcademicYearId {
    AcademicYearId::from_uuid(Uuid::parse_str(DEMO_YEAR_ID).unwrap())
}

fn demo_clerk_id() -> UserId {
    UserId::from_uuid(Uuid::parse_str(DEMO_CLERK_ID).unwrap())
}

/// Opens one enrollment per demo student, April 2024 through March 2025
/// at 600/month. Returns the ids created on this run; students already
/// enrolled are skipped.
async fn seed_enrollments(db: &DatabaseConnection) -> Vec<Option<EnrollmentId>> {
    let repo = EnrollmentRepository::new(db.clone());
    let mut created_ids = Vec::with_capacity(DEMO_STUDENT_IDS.len());

    for student in DEMO_STUDENT_IDS {
        let student_id = StudentId::from_uuid(Uuid::parse_str(student).unwrap());

        match repo
            .open_enrollment(OpenEnrollmentInput {
                student_id,
                class_id: demo_class_id(),
                academic_year_id: demo_year_id(),
                first_month: FeeMonth::new(2024, 4).unwrap(),
                last_month: FeeMonth::new(2025, 3).unwrap(),
                monthly_amount: dec!(600),
            })
            .await
        {
            Ok(created) => {
                println!("  Enrolled student {student_id}");
                created_ids.push(Some(EnrollmentId::from_uuid(created.enrollment.id)));
            }
            Err(EnrollmentSetupError::Validation(EnrollmentError::DuplicateEnrollment {
                ..
            })) => {
                println!("  Student {student_id} already enrolled, skipping...");
                created_ids.push(None);
            }
            Err(e) => {
                eprintln!("Failed to enroll student {student_id}: {e}");
                created_ids.push(None);
            }
        }
    }

    created_ids
}

/// Records payments that leave the demo class in three states: the first
/// enrollment fully cleared, the second partially paid, the third untouched.
async fn seed_payments(db: &DatabaseConnection, enrollments: &[Option<EnrollmentId>]) {
    let repo = LedgerRepository::new(db.clone());

    let payments = [
        (0, dec!(3600), "2024-09-30", "Fees through September"),
        (0, dec!(3600), "2025-03-25", "Balance for the year"),
        (1, dec!(1000), "2024-05-15", "Partial payment"),
        (1, dec!(300), "2024-06-01", "Partial payment"),
    ];

    let mut recorded = 0;
    for (index, amount, date, remarks) in payments {
        let Some(enrollment_id) = enrollments[index] else {
            continue;
        };
        let payment_date: NaiveDate = date.parse().unwrap();

        let result = repo
            .add_payment(AddPaymentInput {
                enrollment_id,
                amount,
                date: payment_date,
                remarks: Some(remarks.to_string()),
                receipt_issued: true,
                created_by: demo_clerk_id(),
            })
            .await;

        if let Err(e) = result {
            eprintln!("Failed to record payment for {enrollment_id}: {e}");
        } else {
            recorded += 1;
        }
    }

    println!("  Recorded {recorded} payments");
}

/// Applies a sibling discount to the third enrollment's last quarter.
async fn seed_adjustment(db: &DatabaseConnection, enrollments: &[Option<EnrollmentId>]) {
    let Some(enrollment_id) = enrollments.get(2).copied().flatten() else {
        println!("  Enrollment already seeded, skipping...");
        return;
    };

    let repo = LedgerRepository::new(db.clone());
    let result = repo
        .adjust_monthly_fee(AdjustFeeInput {
            enrollment_id,
            from_month: FeeMonth::new(2025, 1).unwrap(),
            to_month: FeeMonth::new(2025, 3).unwrap(),
            new_amount: dec!(450),
            reason: "Sibling discount".to_string(),
        })
        .await;

    match result {
        Ok(updated) => println!("  Adjusted {} months to 450", updated.len()),
        Err(e) => eprintln!("Failed to adjust fees for {enrollment_id}: {e}"),
    }
}

/// Prints the collection summary for the demo class.
async fn print_summary(db: &DatabaseConnection) {
    let repo = ReportRepository::new(db.clone());

    match repo.class_collection(demo_class_id(), demo_year_id()).await {
        Ok(summary) => println!(
            "  Demo class: {} enrollments, {} collected of {} expected, {} defaulters",
            summary.enrollments,
            summary.total_paid,
            summary.total_expected,
            summary.defaulters.len()
        ),
        Err(e) => eprintln!("Failed to summarize demo class: {e}"),
    }
}
