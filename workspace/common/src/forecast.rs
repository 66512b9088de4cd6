use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of a projected cash-flow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CashFlowKind {
    Income,
    Expense,
}

/// A real transaction row as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ObservedTransactionDto {
    pub id: i32,
    /// Signed amount: deposits positive, debits negative.
    pub amount: Decimal,
    /// ISO date (YYYY-MM-DD)
    pub transaction_date: NaiveDate,
    pub display_name: String,
    pub pending: bool,
}

/// One projected recurring event inside the forecast window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectedOccurrenceDto {
    pub schedule_id: i32,
    pub kind: CashFlowKind,
    pub display_name: String,
    /// ISO date (YYYY-MM-DD)
    pub expected_date: NaiveDate,
    pub expected_amount: Decimal,
    /// Observed debit matched by display name, shown for reconciliation.
    pub occurred_transaction: Option<ObservedTransactionDto>,
}

/// The account forecast payload: projected low balance before the next
/// payday plus the events it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastDto {
    pub account_id: i32,
    pub start_balance: Decimal,
    pub lowest_balance: Decimal,
    /// ISO date (YYYY-MM-DD)
    pub start: NaiveDate,
    /// ISO date (YYYY-MM-DD)
    pub stop: NaiveDate,
    pub paycheck: Option<ProjectedOccurrenceDto>,
    pub recurring: Vec<ProjectedOccurrenceDto>,
    pub pending: Vec<ObservedTransactionDto>,
}
