use common::{BalancePoint, BalanceProjectionSeries, CashFlowKind, DateRange, ForecastDto,
    ObservedTransactionDto, ProjectedOccurrenceDto};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    /// Daily balance curves are display-only and safe to cache briefly.
    /// Forecast payloads feed advance decisions and are never cached.
    Projection(BalanceProjectionSeries),
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ForecastQuery {
    /// Pull the window start back to the last observed paycheck
    /// (default: false)
    pub start_from_pay_period: Option<bool>,
}

/// Query parameters for listing account transactions
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TransactionQuery {
    /// Filter by pending state
    pub pending: Option<bool>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::get_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::schedules::create_schedule,
        crate::handlers::schedules::get_schedules,
        crate::handlers::schedules::get_schedule,
        crate::handlers::schedules::delete_schedule,
        crate::handlers::occurrences::create_occurrence,
        crate::handlers::occurrences::realize_occurrence,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::get_account_transactions,
        crate::handlers::forecast::get_account_forecast,
        crate::handlers::projection::get_account_projection,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ForecastQuery,
            TransactionQuery,
            ForecastDto,
            ProjectedOccurrenceDto,
            ObservedTransactionDto,
            CashFlowKind,
            BalanceProjectionSeries,
            BalancePoint,
            DateRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User CRUD endpoints"),
        (name = "accounts", description = "Bank account CRUD endpoints"),
        (name = "schedules", description = "Recurring schedule endpoints"),
        (name = "occurrences", description = "Expected occurrence endpoints"),
        (name = "transactions", description = "Bank transaction endpoints"),
        (name = "forecast", description = "Balance forecast endpoints"),
    ),
    info(
        title = "Runway API",
        description = "Cash-advance banking backend - balance forecasting and account plumbing",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
