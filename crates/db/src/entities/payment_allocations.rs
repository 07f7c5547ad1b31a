//! `SeaORM` Entity for payment_allocations table.
//!
//! Each row applies part of one payment to one monthly obligation.
//! Allocation rows are append-only; unallocated payment remainder has no
//! row at all.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub payment_id: Uuid,
    pub obligation_id: Uuid,
    pub amount_paise: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payments::Entity",
        from = "Column::PaymentId",
        to = "super::payments::Column::Id"
    )]
    Payments,
    #[sea_orm(
        belongs_to = "super::monthly_obligations::Entity",
        from = "Column::ObligationId",
        to = "super::monthly_obligations::Column::Id"
    )]
    MonthlyObligations,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::monthly_obligations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyObligations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
