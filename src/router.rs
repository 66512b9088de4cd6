use crate::handlers::{
    accounts::{create_account, delete_account, get_account, get_accounts, update_account},
    forecast::get_account_forecast,
    health::health_check,
    occurrences::{create_occurrence, realize_occurrence},
    projection::get_account_projection,
    schedules::{create_schedule, delete_schedule, get_schedule, get_schedules},
    transactions::{create_transaction, get_account_transactions},
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Bank account CRUD routes
        .route("/api/v1/accounts", post(create_account))
        .route("/api/v1/accounts", get(get_accounts))
        .route("/api/v1/accounts/:account_id", get(get_account))
        .route("/api/v1/accounts/:account_id", put(update_account))
        .route("/api/v1/accounts/:account_id", delete(delete_account))
        // Recurring schedule routes
        .route("/api/v1/schedules", post(create_schedule))
        .route("/api/v1/schedules", get(get_schedules))
        .route("/api/v1/schedules/:schedule_id", get(get_schedule))
        .route("/api/v1/schedules/:schedule_id", delete(delete_schedule))
        .route(
            "/api/v1/schedules/:schedule_id/occurrences",
            post(create_occurrence),
        )
        .route(
            "/api/v1/occurrences/:occurrence_id/realization",
            put(realize_occurrence),
        )
        // Bank transaction routes
        .route(
            "/api/v1/accounts/:account_id/transactions",
            post(create_transaction),
        )
        .route(
            "/api/v1/accounts/:account_id/transactions",
            get(get_account_transactions),
        )
        // Forecast routes
        .route(
            "/api/v1/accounts/:account_id/forecast",
            get(get_account_forecast),
        )
        .route(
            "/api/v1/accounts/:account_id/projection",
            get(get_account_projection),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
