use chrono::{Duration, NaiveDate};
use model::dates::{end_of_month, start_of_month};
use model::entities::recurring_schedule::ScheduleKind;
use model::entities::{bank_account, bank_transaction, recurring_schedule};
use model::schedule::ScheduleRule;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::fetch;
use crate::ledger::{self, DayBuckets, SimulationInput};

/// A predicted occurrence hydrated with its schedule's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedOccurrence {
    pub id: i32,
    pub schedule_id: i32,
    pub kind: ScheduleKind,
    pub display_name: String,
    pub expected_date: NaiveDate,
    pub expected_amount: Decimal,
    pub pending_date: Option<NaiveDate>,
    pub settled_date: Option<NaiveDate>,
}

impl ExpectedOccurrence {
    /// A realized occurrence has already moved the live balance; projecting
    /// it again would double count.
    pub fn is_realized(&self) -> bool {
        self.pending_date.is_some() || self.settled_date.is_some()
    }
}

/// One projected event in the forecast output.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedOccurrence {
    pub schedule_id: i32,
    pub kind: ScheduleKind,
    pub display_name: String,
    pub expected_date: NaiveDate,
    pub expected_amount: Decimal,
    /// Observed debit sharing the occurrence's display name, attached for
    /// display reconciliation only. It never feeds the balance math.
    pub occurred_transaction: Option<bank_transaction::Model>,
}

/// The running balance at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// The forecast for one account over its current pay period (or until
/// month end when no paycheck is known). Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountForecast {
    pub account_id: i32,
    pub start_balance: Decimal,
    /// Minimum of the running balance sampled once per day, after each
    /// day's expenses and before its income.
    pub lowest_balance: Decimal,
    pub start: NaiveDate,
    pub stop: NaiveDate,
    pub paycheck: Option<ProjectedOccurrence>,
    pub recurring: Vec<ProjectedOccurrence>,
    /// Pending transactions within the display window, newest first.
    pub pending: Vec<bank_transaction::Model>,
    pub daily_balances: Vec<DailyBalance>,
}

/// Computes the projected low balance and per-day ledger for a bank
/// account before its next payday.
///
/// The engine is purely computational over data fetched up front: it holds
/// no mutable state, performs no writes, and is safe to invoke concurrently
/// for the same account. `today` is fixed at construction so a single
/// request sees one consistent date everywhere.
pub struct ForecastEngine {
    today: NaiveDate,
    pending_lookback: Duration,
    pending_display_window: Duration,
    pay_period_slack: Duration,
}

impl ForecastEngine {
    /// Creates an engine anchored at the given `today`.
    pub fn new_with_today(today: NaiveDate) -> Self {
        Self {
            today,
            pending_lookback: Duration::days(14),
            pending_display_window: Duration::days(7),
            pay_period_slack: Duration::days(2),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Computes the forecast for the account id, or `None` when the account
    /// no longer exists. Deletion between lookup and computation is an
    /// expected race, not an error.
    #[instrument(skip(self, db), fields(account_id = account_id, start_from_pay_period = start_from_pay_period, today = %self.today))]
    pub async fn forecast_account(
        &self,
        db: &DatabaseConnection,
        account_id: i32,
        start_from_pay_period: bool,
    ) -> Result<Option<AccountForecast>> {
        match bank_account::Entity::find_by_id(account_id).one(db).await? {
            Some(account) => Ok(Some(self.forecast(db, &account, start_from_pay_period).await?)),
            None => {
                debug!("Account {} not found, skipping forecast", account_id);
                Ok(None)
            }
        }
    }

    /// Computes the forecast for an account snapshot already in hand.
    #[instrument(skip(self, db, account), fields(account_id = account.id, start_from_pay_period = start_from_pay_period, today = %self.today))]
    pub async fn forecast(
        &self,
        db: &DatabaseConnection,
        account: &bank_account::Model,
        start_from_pay_period: bool,
    ) -> Result<AccountForecast> {
        let pending_since = self.today - self.pending_lookback;

        // Phase 1: the pending lookback and the paycheck lookup are
        // independent fetches.
        let (pending, paycheck) = tokio::try_join!(
            fetch::pending_bank_transactions(db, account.id, pending_since),
            self.next_paycheck(db, account),
        )?;

        let income_schedule = match account.main_income_schedule_id {
            Some(schedule_id) => fetch::schedule_by_id(db, schedule_id).await?,
            None => None,
        };

        let start = self
            .resolve_window_start(db, income_schedule.as_ref(), start_from_pay_period)
            .await?;
        let stop = match (&paycheck, &income_schedule) {
            // The window ends the day before the paycheck following `start`.
            (Some(_), Some(schedule)) => schedule.occurrence_after(start).pred_opt().unwrap(),
            // No known paycheck: project to the end of the month.
            _ => end_of_month(start),
        };

        trace!(
            "Forecast window for account_id={}: {} to {}",
            account.id, start, stop
        );

        // Phase 2: the window is fixed; occurrences and observed rows are
        // independent fetches.
        let (occurrences, recent) = tokio::try_join!(
            fetch::expected_occurrences_in_range(db, account.id, start, stop),
            fetch::recent_bank_transactions(db, account.id, start),
        )?;

        let total = occurrences.len();
        let unrealized: Vec<ExpectedOccurrence> = occurrences
            .into_iter()
            .filter(|occurrence| !occurrence.is_realized())
            .collect();
        debug!(
            "account_id={}: {} of {} occurrences still projected",
            account.id,
            unrealized.len(),
            total
        );

        let (pending_income, pending_expense) = split_pending(&pending);
        let buckets = DayBuckets::from_occurrences(&unrealized);

        let outcome = ledger::simulate(&SimulationInput {
            start,
            stop,
            start_balance: account.current_balance,
            buckets: &buckets,
            pending_income,
            pending_expense,
            apply_pending_expense: !account.kind.excludes_pending_from_projection(),
        });

        let recurring = unrealized
            .iter()
            .map(|occurrence| project(occurrence, &recent))
            .collect();
        let paycheck = paycheck.as_ref().map(|occurrence| project(occurrence, &recent));

        // The fetch window is wider than what the dashboard shows.
        let display_cutoff = self.today - self.pending_display_window;
        let pending: Vec<bank_transaction::Model> = pending
            .into_iter()
            .filter(|tx| tx.transaction_date >= display_cutoff)
            .collect();

        Ok(AccountForecast {
            account_id: account.id,
            start_balance: account.current_balance,
            lowest_balance: outcome.lowest_balance,
            start,
            stop,
            paycheck,
            recurring,
            pending,
            daily_balances: outcome.daily_balances,
        })
    }

    async fn next_paycheck(
        &self,
        db: &DatabaseConnection,
        account: &bank_account::Model,
    ) -> Result<Option<ExpectedOccurrence>> {
        match account.main_income_schedule_id {
            Some(schedule_id) => {
                fetch::next_expected_paycheck(db, account.id, schedule_id, self.today).await
            }
            None => Ok(None),
        }
    }

    /// Window-start rule. Without the pay-period flag the window starts
    /// today. With it, the start is pulled back to the most recent observed
    /// deposit matching the income pattern, falling back to the expected
    /// prior occurrence, and to the start of the calendar month when no
    /// income schedule exists at all.
    async fn resolve_window_start(
        &self,
        db: &DatabaseConnection,
        income_schedule: Option<&recurring_schedule::Model>,
        start_from_pay_period: bool,
    ) -> Result<NaiveDate> {
        if !start_from_pay_period {
            return Ok(self.today);
        }

        let Some(schedule) = income_schedule else {
            return Ok(start_of_month(self.today));
        };

        let Some(expected_prior) = schedule.occurrence_before(self.today) else {
            // The schedule's first occurrence is still ahead of us; degrade
            // the same way as having no income schedule.
            return Ok(start_of_month(self.today));
        };

        let lookback_days =
            (self.today - expected_prior).num_days() + self.pay_period_slack.num_days();
        let observed =
            fetch::matching_bank_transactions(db, schedule, self.today, lookback_days).await?;

        // Newest match wins; with none the expected date stands unmodified.
        Ok(observed
            .first()
            .map(|tx| tx.transaction_date)
            .unwrap_or(expected_prior))
    }
}

/// Splits the pending lookback into deposit and debit totals.
fn split_pending(pending: &[bank_transaction::Model]) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in pending {
        if tx.amount > Decimal::ZERO {
            income += tx.amount;
        } else {
            expense += tx.amount;
        }
    }
    (income, expense)
}

/// Maps an occurrence to its projection record, attaching the observed
/// debit with the same display name when one exists.
fn project(
    occurrence: &ExpectedOccurrence,
    observed: &[bank_transaction::Model],
) -> ProjectedOccurrence {
    let occurred_transaction = observed
        .iter()
        .find(|tx| tx.amount < Decimal::ZERO && tx.display_name == occurrence.display_name)
        .cloned();

    ProjectedOccurrence {
        schedule_id: occurrence.schedule_id,
        kind: occurrence.kind,
        display_name: occurrence.display_name.clone(),
        expected_date: occurrence.expected_date,
        expected_amount: occurrence.expected_amount,
        occurred_transaction,
    }
}
