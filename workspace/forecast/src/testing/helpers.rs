use std::sync::atomic::AtomicU64;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use model::entities::{
    bank_account::{self, AccountKind},
    bank_transaction, expected_occurrence,
    recurring_schedule::{self, RecurrencePeriod, ScheduleKind},
    user,
};

pub type Result<T> = std::result::Result<T, DbErr>;

/// Builds a Decimal dollar amount from cents.
pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

pub async fn new_account(
    db: &DatabaseConnection,
    balance_cents: i64,
    kind: AccountKind,
) -> Result<bank_account::Model> {
    static ACCOUNT_ID: AtomicU64 = AtomicU64::new(0);

    let current_id = ACCOUNT_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    // Create a test user first
    let owner = user::ActiveModel {
        username: Set(format!("user_{}", current_id)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // Create a test account
    bank_account::ActiveModel {
        name: Set(format!("Test account {}", current_id)),
        currency_code: Set("USD".to_string()),
        owner_id: Set(owner.id),
        current_balance: Set(cents(balance_cents)),
        main_income_schedule_id: Set(None),
        kind: Set(kind),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn new_schedule(
    db: &DatabaseConnection,
    account: &bank_account::Model,
    kind: ScheduleKind,
    display_name: &str,
    amount_cents: i64,
    period: RecurrencePeriod,
    anchor_date: NaiveDate,
    second_day: Option<i32>,
) -> Result<recurring_schedule::Model> {
    recurring_schedule::ActiveModel {
        account_id: Set(account.id),
        kind: Set(kind),
        display_name: Set(display_name.to_string()),
        expected_amount: Set(cents(amount_cents)),
        period: Set(period),
        anchor_date: Set(anchor_date),
        second_day: Set(second_day),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Marks the schedule as the account's main income and returns the
/// refreshed account row.
pub async fn set_main_income_schedule(
    db: &DatabaseConnection,
    account: &bank_account::Model,
    schedule: &recurring_schedule::Model,
) -> Result<bank_account::Model> {
    let mut active: bank_account::ActiveModel = account.clone().into();
    active.main_income_schedule_id = Set(Some(schedule.id));
    active.update(db).await
}

pub async fn new_occurrence(
    db: &DatabaseConnection,
    schedule: &recurring_schedule::Model,
    expected_date: NaiveDate,
    amount_cents: i64,
) -> Result<expected_occurrence::Model> {
    new_realized_occurrence(db, schedule, expected_date, amount_cents, None, None).await
}

pub async fn new_realized_occurrence(
    db: &DatabaseConnection,
    schedule: &recurring_schedule::Model,
    expected_date: NaiveDate,
    amount_cents: i64,
    pending_date: Option<NaiveDate>,
    settled_date: Option<NaiveDate>,
) -> Result<expected_occurrence::Model> {
    expected_occurrence::ActiveModel {
        schedule_id: Set(schedule.id),
        account_id: Set(schedule.account_id),
        kind: Set(schedule.kind),
        expected_date: Set(expected_date),
        expected_amount: Set(cents(amount_cents)),
        pending_date: Set(pending_date),
        settled_date: Set(settled_date),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_transaction(
    db: &DatabaseConnection,
    account: &bank_account::Model,
    transaction_date: NaiveDate,
    amount_cents: i64,
    display_name: &str,
    pending: bool,
) -> Result<bank_transaction::Model> {
    bank_transaction::ActiveModel {
        account_id: Set(account.id),
        amount: Set(cents(amount_cents)),
        transaction_date: Set(transaction_date),
        display_name: Set(display_name.to_string()),
        pending: Set(pending),
        ..Default::default()
    }
    .insert(db)
    .await
}
