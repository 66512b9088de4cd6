use std::str::FromStr;

use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{BalancePoint, BalanceProjectionSeries};
use forecast::{default_engine, projection::projection_dataframe};
use tracing::{debug, error, instrument, trace, warn};

/// Helper function to convert the engine's DataFrame into the transport
/// series. The balance column travels as strings so decimals stay exact.
fn convert_dataframe_to_series(
    df: polars::prelude::DataFrame,
) -> Result<BalanceProjectionSeries, String> {
    use polars::prelude::*;

    let account_id_col = df
        .column("account_id")
        .map_err(|e| format!("Missing account_id column: {}", e))?;
    let date_col = df
        .column("date")
        .map_err(|e| format!("Missing date column: {}", e))?;
    let balance_col = df
        .column("balance")
        .map_err(|e| format!("Missing balance column: {}", e))?;

    // Polars Date values are day offsets from the Unix epoch.
    let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let mut points = Vec::new();

    for i in 0..df.height() {
        let account_id = account_id_col
            .get(i)
            .map_err(|e| format!("Error getting account_id at row {}: {}", i, e))?
            .try_extract::<i32>()
            .map_err(|e| format!("Error extracting account_id at row {}: {}", i, e))?;

        let days = date_col
            .get(i)
            .map_err(|e| format!("Error getting date at row {}: {}", i, e))?
            .try_extract::<i32>()
            .map_err(|e| format!("Error extracting date at row {}: {}", i, e))?;
        let date = epoch + chrono::Duration::days(days as i64);

        let balance_str = match balance_col
            .get(i)
            .map_err(|e| format!("Error getting balance at row {}: {}", i, e))?
        {
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            other => format!("{}", other),
        };
        let balance = rust_decimal::Decimal::from_str(&balance_str)
            .map_err(|e| format!("Error parsing balance '{}' at row {}: {}", balance_str, i, e))?;

        points.push(BalancePoint::new(account_id, date, balance));
    }

    Ok(BalanceProjectionSeries::new(points))
}

/// Get the day-by-day projected balance curve for an account
///
/// Display-only data, cached briefly; the forecast endpoint is the
/// decision-grade surface.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/projection",
    tag = "forecast",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Projection retrieved successfully", body = ApiResponse<BalanceProjectionSeries>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account_projection(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BalanceProjectionSeries>>, StatusCode> {
    trace!(
        "Entering get_account_projection function for account_id: {}",
        account_id
    );

    let engine = default_engine(None);
    let cache_key = format!("projection_{}_{}", account_id, engine.today());

    // Check cache first
    if let Some(CachedData::Projection(series)) = state.cache.get(&cache_key).await {
        debug!("Projection cache hit for account {}", account_id);
        let response = ApiResponse {
            data: series,
            message: "Projection retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let forecast = match engine.forecast_account(&state.db, account_id, false).await {
        Ok(Some(forecast)) => forecast,
        Ok(None) => {
            warn!("Account with ID {} not found for projection", account_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            error!(
                "Failed to compute projection for account {}: {}",
                account_id, e
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let df = match projection_dataframe(account_id, &forecast.daily_balances) {
        Ok(df) => df,
        Err(e) => {
            error!("Failed to build projection frame: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let series = match convert_dataframe_to_series(df) {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to convert projection frame: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Projection(series.clone()))
        .await;

    let response = ApiResponse {
        data: series,
        message: "Projection retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
