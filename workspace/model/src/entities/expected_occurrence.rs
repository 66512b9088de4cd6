use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::recurring_schedule::ScheduleKind;

/// One concrete predicted instance of a recurring schedule within a date
/// range. Materialized ahead of time so the forecast window query is a
/// plain range scan.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expected_occurrences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub schedule_id: i32,
    /// Denormalized from the schedule so window queries skip the join.
    pub account_id: i32,
    /// Denormalized from the schedule.
    pub kind: ScheduleKind,
    pub expected_date: NaiveDate,
    /// Signed: income positive, expenses negative.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub expected_amount: Decimal,
    /// Set when a matching pending transaction was observed.
    pub pending_date: Option<NaiveDate>,
    /// Set when a matching settled transaction was observed.
    pub settled_date: Option<NaiveDate>,
}

impl Model {
    /// A realized occurrence has already affected the live balance and
    /// must not be projected again.
    pub fn is_realized(&self) -> bool {
        self.pending_date.is_some() || self.settled_date.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recurring_schedule::Entity",
        from = "Column::ScheduleId",
        to = "super::recurring_schedule::Column::Id",
        on_delete = "Cascade"
    )]
    RecurringSchedule,
    #[sea_orm(
        belongs_to = "super::bank_account::Entity",
        from = "Column::AccountId",
        to = "super::bank_account::Column::Id",
        on_delete = "Cascade"
    )]
    BankAccount,
}

impl Related<super::recurring_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringSchedule.def()
    }
}

impl Related<super::bank_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
