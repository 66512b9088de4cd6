use crate::schemas::{ApiResponse, AppState, ErrorResponse, ForecastQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{CashFlowKind, ForecastDto, ObservedTransactionDto, ProjectedOccurrenceDto};
use forecast::default_engine;
use forecast::engine::{AccountForecast, ProjectedOccurrence};
use model::entities::{bank_transaction, recurring_schedule::ScheduleKind};
use tracing::{error, info, instrument, trace, warn};

fn kind_to_dto(kind: ScheduleKind) -> CashFlowKind {
    match kind {
        ScheduleKind::Income => CashFlowKind::Income,
        ScheduleKind::Expense => CashFlowKind::Expense,
    }
}

fn transaction_to_dto(tx: &bank_transaction::Model) -> ObservedTransactionDto {
    ObservedTransactionDto {
        id: tx.id,
        amount: tx.amount,
        transaction_date: tx.transaction_date,
        display_name: tx.display_name.clone(),
        pending: tx.pending,
    }
}

fn occurrence_to_dto(occurrence: &ProjectedOccurrence) -> ProjectedOccurrenceDto {
    ProjectedOccurrenceDto {
        schedule_id: occurrence.schedule_id,
        kind: kind_to_dto(occurrence.kind),
        display_name: occurrence.display_name.clone(),
        expected_date: occurrence.expected_date,
        expected_amount: occurrence.expected_amount,
        occurred_transaction: occurrence.occurred_transaction.as_ref().map(transaction_to_dto),
    }
}

/// Reshapes the engine output into the transport payload.
pub fn forecast_to_dto(forecast: &AccountForecast) -> ForecastDto {
    ForecastDto {
        account_id: forecast.account_id,
        start_balance: forecast.start_balance,
        lowest_balance: forecast.lowest_balance,
        start: forecast.start,
        stop: forecast.stop,
        paycheck: forecast.paycheck.as_ref().map(occurrence_to_dto),
        recurring: forecast.recurring.iter().map(occurrence_to_dto).collect(),
        pending: forecast.pending.iter().map(transaction_to_dto).collect(),
    }
}

/// Get the balance forecast for an account
///
/// Computed fresh on every request: the result feeds advance-eligibility
/// decisions and must reflect the live balance and schedule state.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/forecast",
    tag = "forecast",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
        ForecastQuery,
    ),
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastDto>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account_forecast(
    Path(account_id): Path<i32>,
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastDto>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering get_account_forecast function for account_id: {}",
        account_id
    );

    let start_from_pay_period = query.start_from_pay_period.unwrap_or(false);
    let engine = default_engine(None);

    match engine
        .forecast_account(&state.db, account_id, start_from_pay_period)
        .await
    {
        Ok(Some(forecast)) => {
            info!(
                "Forecast computed for account {}: lowest balance {} between {} and {}",
                account_id, forecast.lowest_balance, forecast.start, forecast.stop
            );
            let response = ApiResponse {
                data: forecast_to_dto(&forecast),
                message: "Forecast computed successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Account with ID {} not found for forecast", account_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Account not found".to_string(),
                    code: "ACCOUNT_NOT_FOUND".to_string(),
                    success: false,
                }),
            ))
        }
        Err(e) => {
            error!("Failed to compute forecast for account {}: {}", account_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to compute forecast".to_string(),
                    code: "FORECAST_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
