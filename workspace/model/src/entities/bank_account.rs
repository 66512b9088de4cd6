use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;

/// The flavor of bank account backing the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountKind {
    /// External checking account read through the aggregator. Pending
    /// debits have not yet hit the balance and belong in the projection.
    #[sea_orm(string_value = "Linked")]
    Linked,
    /// In-house spending account. Card debits settle against the balance
    /// immediately, so pending debits are excluded from the projection.
    #[sea_orm(string_value = "Spending")]
    Spending,
}

impl AccountKind {
    /// Whether pending debits are already reflected in the live balance
    /// and must not be replayed by the forecast simulation.
    pub fn excludes_pending_from_projection(&self) -> bool {
        matches!(self, AccountKind::Spending)
    }
}

/// A bank account as seen by the forecast and advance-eligibility paths.
/// The balance is the aggregator's latest available figure, not a ledger
/// we maintain ourselves.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// ISO 4217 currency code, e.g., "USD".
    pub currency_code: String,
    /// The user who owns this account.
    pub owner_id: i32,
    /// Latest available balance reported by the aggregator.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub current_balance: Decimal,
    /// The recurring schedule treated as this account's main paycheck.
    /// Soft reference; unset until income detection has confirmed one.
    pub main_income_schedule_id: Option<i32>,
    /// The kind of account
    pub kind: AccountKind,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An account belongs to one owner.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::recurring_schedule::Entity")]
    RecurringSchedule,
    #[sea_orm(has_many = "super::expected_occurrence::Entity")]
    ExpectedOccurrence,
    #[sea_orm(has_many = "super::bank_transaction::Entity")]
    BankTransaction,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::recurring_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringSchedule.def()
    }
}

impl Related<super::bank_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
