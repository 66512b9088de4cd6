pub mod schedule;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::bank_account;

/// Whether a recurring schedule adds to or draws from the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ScheduleKind {
    #[sea_orm(string_value = "Income")]
    Income,
    #[sea_orm(string_value = "Expense")]
    Expense,
}

/// The paycheck/bill cadences income detection recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RecurrencePeriod {
    /// Every week on the anchor's weekday.
    #[sea_orm(string_value = "Weekly")]
    Weekly,
    /// Every other week on the anchor's weekday.
    #[sea_orm(string_value = "Biweekly")]
    Biweekly,
    /// Twice a month, on the anchor's day and `second_day`.
    #[sea_orm(string_value = "SemiMonthly")]
    SemiMonthly,
    /// Every month on the anchor's day, clamped to short months.
    #[sea_orm(string_value = "Monthly")]
    Monthly,
}

/// Models a detected or user-confirmed repeating cash-flow pattern, like a
/// paycheck or a subscription. The `anchor_date` is a known occurrence the
/// recurrence rule is derived from.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The account the pattern was observed on.
    pub account_id: i32,
    pub kind: ScheduleKind,
    /// Normalized transaction name the pattern was matched by, e.g.
    /// "ACME PAYROLL". Observed transactions match on this name.
    pub display_name: String,
    /// The value of each occurrence. Signed: income positive, expenses
    /// negative.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub expected_amount: Decimal,
    /// The frequency of the schedule.
    pub period: RecurrencePeriod,
    /// A known occurrence date the rule is anchored at.
    pub anchor_date: NaiveDate,
    /// Second day of month, only meaningful for `SemiMonthly`.
    pub second_day: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_account::Entity",
        from = "Column::AccountId",
        to = "super::bank_account::Column::Id",
        on_delete = "Cascade"
    )]
    BankAccount,
    #[sea_orm(has_many = "super::expected_occurrence::Entity")]
    ExpectedOccurrence,
}

impl Related<bank_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccount.def()
    }
}

impl Related<super::expected_occurrence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpectedOccurrence.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
