use chrono::{Duration, NaiveDate};
use model::entities::{bank_transaction, expected_occurrence, recurring_schedule};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, instrument, trace, warn};

use crate::engine::ExpectedOccurrence;
use crate::error::Result;

/// Joins an occurrence row with its owning schedule's display name. Rows
/// whose schedule has vanished mid-query are skipped with a warning.
fn hydrate(
    occurrence: expected_occurrence::Model,
    schedule: Option<recurring_schedule::Model>,
) -> Option<ExpectedOccurrence> {
    let Some(schedule) = schedule else {
        warn!(
            "Expected occurrence id={} has no owning schedule, skipping",
            occurrence.id
        );
        return None;
    };

    Some(ExpectedOccurrence {
        id: occurrence.id,
        schedule_id: occurrence.schedule_id,
        kind: occurrence.kind,
        display_name: schedule.display_name,
        expected_date: occurrence.expected_date,
        expected_amount: occurrence.expected_amount,
        pending_date: occurrence.pending_date,
        settled_date: occurrence.settled_date,
    })
}

/// Gets pending transactions for the account dated on or after `since`.
#[instrument(skip(db), fields(account_id = account_id, since = %since))]
pub async fn pending_bank_transactions(
    db: &DatabaseConnection,
    account_id: i32,
    since: NaiveDate,
) -> Result<Vec<bank_transaction::Model>> {
    trace!(
        "Getting pending transactions for account_id={} since {}",
        account_id, since
    );

    let transactions = bank_transaction::Entity::find()
        .filter(
            Condition::all()
                .add(bank_transaction::Column::AccountId.eq(account_id))
                .add(bank_transaction::Column::Pending.eq(true))
                .add(bank_transaction::Column::TransactionDate.gte(since)),
        )
        .order_by_desc(bank_transaction::Column::TransactionDate)
        .all(db)
        .await?;

    debug!(
        "Found {} pending transactions for account_id={} since {}",
        transactions.len(),
        account_id,
        since
    );

    Ok(transactions)
}

/// Gets all observed transactions (pending and settled) for the account
/// dated on or after `since`. One batched fetch backing the occurrence
/// reconciliation pass.
#[instrument(skip(db), fields(account_id = account_id, since = %since))]
pub async fn recent_bank_transactions(
    db: &DatabaseConnection,
    account_id: i32,
    since: NaiveDate,
) -> Result<Vec<bank_transaction::Model>> {
    trace!(
        "Getting recent transactions for account_id={} since {}",
        account_id, since
    );

    let transactions = bank_transaction::Entity::find()
        .filter(
            Condition::all()
                .add(bank_transaction::Column::AccountId.eq(account_id))
                .add(bank_transaction::Column::TransactionDate.gte(since)),
        )
        .order_by_asc(bank_transaction::Column::TransactionDate)
        .all(db)
        .await?;

    debug!(
        "Found {} recent transactions for account_id={} since {}",
        transactions.len(),
        account_id,
        since
    );

    Ok(transactions)
}

/// Gets all expected occurrences for the account within `[start, stop]`,
/// hydrated with their schedules' display names.
#[instrument(skip(db), fields(account_id = account_id, start = %start, stop = %stop))]
pub async fn expected_occurrences_in_range(
    db: &DatabaseConnection,
    account_id: i32,
    start: NaiveDate,
    stop: NaiveDate,
) -> Result<Vec<ExpectedOccurrence>> {
    trace!(
        "Getting expected occurrences for account_id={} from {} to {}",
        account_id, start, stop
    );

    let rows = expected_occurrence::Entity::find()
        .find_also_related(recurring_schedule::Entity)
        .filter(
            Condition::all()
                .add(expected_occurrence::Column::AccountId.eq(account_id))
                .add(expected_occurrence::Column::ExpectedDate.gte(start))
                .add(expected_occurrence::Column::ExpectedDate.lte(stop)),
        )
        .order_by_asc(expected_occurrence::Column::ExpectedDate)
        .all(db)
        .await?;

    let occurrences: Vec<ExpectedOccurrence> = rows
        .into_iter()
        .filter_map(|(occurrence, schedule)| hydrate(occurrence, schedule))
        .collect();

    debug!(
        "Found {} expected occurrences for account_id={} from {} to {}",
        occurrences.len(),
        account_id,
        start,
        stop
    );

    Ok(occurrences)
}

/// Gets the next unrealized paycheck occurrence of the account's main
/// income schedule, dated on or after `as_of`.
#[instrument(skip(db), fields(account_id = account_id, schedule_id = schedule_id, as_of = %as_of))]
pub async fn next_expected_paycheck(
    db: &DatabaseConnection,
    account_id: i32,
    schedule_id: i32,
    as_of: NaiveDate,
) -> Result<Option<ExpectedOccurrence>> {
    trace!(
        "Getting next expected paycheck for account_id={} schedule_id={} as of {}",
        account_id, schedule_id, as_of
    );

    let row = expected_occurrence::Entity::find()
        .find_also_related(recurring_schedule::Entity)
        .filter(
            Condition::all()
                .add(expected_occurrence::Column::AccountId.eq(account_id))
                .add(expected_occurrence::Column::ScheduleId.eq(schedule_id))
                .add(expected_occurrence::Column::Kind.eq(recurring_schedule::ScheduleKind::Income))
                .add(expected_occurrence::Column::ExpectedDate.gte(as_of))
                .add(expected_occurrence::Column::PendingDate.is_null())
                .add(expected_occurrence::Column::SettledDate.is_null()),
        )
        .order_by_asc(expected_occurrence::Column::ExpectedDate)
        .one(db)
        .await?;

    let paycheck = row.and_then(|(occurrence, schedule)| hydrate(occurrence, schedule));

    debug!(
        "Next expected paycheck for account_id={}: {:?}",
        account_id,
        paycheck.as_ref().map(|p| p.expected_date)
    );

    Ok(paycheck)
}

/// Gets the recurring schedule by id, if it still exists.
#[instrument(skip(db), fields(schedule_id = schedule_id))]
pub async fn schedule_by_id(
    db: &DatabaseConnection,
    schedule_id: i32,
) -> Result<Option<recurring_schedule::Model>> {
    let schedule = recurring_schedule::Entity::find_by_id(schedule_id)
        .one(db)
        .await?;
    Ok(schedule)
}

/// Gets observed deposits matching the schedule's display name within the
/// trailing `lookback_days` of `as_of`, newest first.
#[instrument(skip(db, schedule), fields(schedule_id = schedule.id, as_of = %as_of, lookback_days = lookback_days))]
pub async fn matching_bank_transactions(
    db: &DatabaseConnection,
    schedule: &recurring_schedule::Model,
    as_of: NaiveDate,
    lookback_days: i64,
) -> Result<Vec<bank_transaction::Model>> {
    let since = as_of - Duration::days(lookback_days);

    trace!(
        "Matching transactions for schedule_id={} ({}) from {} to {}",
        schedule.id, schedule.display_name, since, as_of
    );

    let transactions = bank_transaction::Entity::find()
        .filter(
            Condition::all()
                .add(bank_transaction::Column::AccountId.eq(schedule.account_id))
                .add(bank_transaction::Column::DisplayName.eq(schedule.display_name.clone()))
                .add(bank_transaction::Column::Amount.gt(Decimal::ZERO))
                .add(bank_transaction::Column::TransactionDate.gte(since))
                .add(bank_transaction::Column::TransactionDate.lte(as_of)),
        )
        .order_by_desc(bank_transaction::Column::TransactionDate)
        .all(db)
        .await?;

    debug!(
        "Found {} transactions matching schedule_id={} in lookback",
        transactions.len(),
        schedule.id
    );

    Ok(transactions)
}
