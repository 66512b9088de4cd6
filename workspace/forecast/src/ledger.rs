use std::collections::BTreeMap;

use chrono::NaiveDate;
use model::entities::recurring_schedule::ScheduleKind;
use rust_decimal::Decimal;

use crate::engine::{DailyBalance, ExpectedOccurrence};

/// Per-day sums of projected cash-flow events, split by direction.
///
/// The split matters because the simulation applies a day's expenses and
/// its income at different points relative to the lowest-balance sample.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DayBuckets {
    income: BTreeMap<NaiveDate, Decimal>,
    expense: BTreeMap<NaiveDate, Decimal>,
}

impl DayBuckets {
    /// Buckets occurrences by `(kind, day)`. Callers must have filtered out
    /// realized occurrences already; everything passed in is projected.
    pub fn from_occurrences(occurrences: &[ExpectedOccurrence]) -> Self {
        let mut buckets = Self::default();
        for occurrence in occurrences {
            let bucket = match occurrence.kind {
                ScheduleKind::Income => &mut buckets.income,
                ScheduleKind::Expense => &mut buckets.expense,
            };
            *bucket
                .entry(occurrence.expected_date)
                .or_insert(Decimal::ZERO) += occurrence.expected_amount;
        }
        buckets
    }

    fn income_on(&self, day: NaiveDate) -> Decimal {
        self.income.get(&day).copied().unwrap_or(Decimal::ZERO)
    }

    fn expense_on(&self, day: NaiveDate) -> Decimal {
        self.expense.get(&day).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Inputs for one balance simulation run. All fetching and filtering has
/// happened by the time this is built; the simulation itself is pure.
pub struct SimulationInput<'a> {
    pub start: NaiveDate,
    pub stop: NaiveDate,
    pub start_balance: Decimal,
    pub buckets: &'a DayBuckets,
    /// Sum of pending deposits in the lookback window. Applied on day zero.
    pub pending_income: Decimal,
    /// Sum of pending debits in the lookback window. Applied on day zero
    /// unless the account kind already settles debits into its balance.
    pub pending_expense: Decimal,
    pub apply_pending_expense: bool,
}

/// Result of a simulation run.
pub struct SimulationOutcome {
    pub lowest_balance: Decimal,
    pub daily_balances: Vec<DailyBalance>,
}

/// Runs the day-by-day balance simulation over `[start, stop]` inclusive.
///
/// Each day applies expenses first and income last; the lowest-balance
/// sample sits between the two, so it captures the worst-case trough before
/// the day's inflows land. Pending amounts are layered in at those same
/// points, but only on the start day: older pending rows have settled into
/// the live balance already.
pub fn simulate(input: &SimulationInput) -> SimulationOutcome {
    let mut balance = input.start_balance;
    let mut lowest = input.start_balance;
    let mut daily_balances = Vec::new();

    let mut day = input.start;
    loop {
        balance += input.buckets.expense_on(day);
        if day == input.start && input.apply_pending_expense {
            balance += input.pending_expense;
        }

        if balance < lowest {
            lowest = balance;
        }

        if day == input.start {
            balance += input.pending_income;
        }
        balance += input.buckets.income_on(day);

        daily_balances.push(DailyBalance { date: day, balance });

        if day >= input.stop {
            break;
        }
        day = day.succ_opt().unwrap();
    }

    SimulationOutcome {
        lowest_balance: lowest,
        daily_balances,
    }
}
