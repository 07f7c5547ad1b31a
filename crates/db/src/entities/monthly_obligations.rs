//! `SeaORM` Entity for monthly_obligations table.
//!
//! Amounts are stored in paise (minor units); `month` is the canonical
//! zero-padded `YYYY-MM` key, unique per enrollment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_obligations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub month: String,
    pub expected_amount_paise: i64,
    pub original_amount_paise: i64,
    pub adjustment_reason: Option<String>,
    pub adjusted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollments,
    #[sea_orm(has_many = "super::payment_allocations::Entity")]
    PaymentAllocations,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::payment_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
