//! `SeaORM` Entity for payments table.
//!
//! A payment row is immutable once recorded, except for the
//! `receipt_issued` flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub amount_paise: i64,
    pub payment_date: Date,
    pub remarks: Option<String>,
    pub receipt_issued: bool,
    pub created_by: Uuid,
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
