use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use model::entities::recurring_schedule::{self, RecurrencePeriod, ScheduleKind};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a recurring schedule
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateScheduleRequest {
    /// Account the pattern was observed on
    pub account_id: i32,
    /// Schedule kind: "Income" or "Expense"
    pub kind: String,
    /// Normalized transaction name the pattern matches, e.g. "ACME PAYROLL"
    pub display_name: String,
    /// Expected amount per occurrence; income positive, expenses negative
    pub expected_amount: Decimal,
    /// Recurrence period: "Weekly", "Biweekly", "SemiMonthly" or "Monthly"
    pub period: String,
    /// A known occurrence date the rule is anchored at
    pub anchor_date: NaiveDate,
    /// Second day of month (SemiMonthly only)
    pub second_day: Option<i32>,
}

/// Recurring schedule response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: i32,
    pub account_id: i32,
    pub kind: String,
    pub display_name: String,
    pub expected_amount: Decimal,
    pub period: String,
    pub anchor_date: NaiveDate,
    pub second_day: Option<i32>,
}

impl From<recurring_schedule::Model> for ScheduleResponse {
    fn from(model: recurring_schedule::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            kind: format!("{:?}", model.kind),
            display_name: model.display_name,
            expected_amount: model.expected_amount,
            period: format!("{:?}", model.period),
            anchor_date: model.anchor_date,
            second_day: model.second_day,
        }
    }
}

/// Query parameters for listing recurring schedules
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ScheduleQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Filter by account ID
    pub account_id: Option<i32>,
}

// Helper function to parse the schedule kind string
fn parse_schedule_kind(kind: &str) -> Result<ScheduleKind, String> {
    match kind {
        "Income" => Ok(ScheduleKind::Income),
        "Expense" => Ok(ScheduleKind::Expense),
        _ => Err(format!("Invalid schedule kind: {}", kind)),
    }
}

// Helper function to parse the period string to RecurrencePeriod enum
fn parse_recurrence_period(period_str: &str) -> Result<RecurrencePeriod, String> {
    match period_str {
        "Weekly" => Ok(RecurrencePeriod::Weekly),
        "Biweekly" => Ok(RecurrencePeriod::Biweekly),
        "SemiMonthly" => Ok(RecurrencePeriod::SemiMonthly),
        "Monthly" => Ok(RecurrencePeriod::Monthly),
        _ => Err(format!("Invalid recurrence period: {}", period_str)),
    }
}

fn bad_request(error: String, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Create a new recurring schedule
#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    tag = "schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created successfully", body = ApiResponse<ScheduleResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_schedule function");
    debug!(
        "Creating schedule '{}' for account {}",
        request.display_name, request.account_id
    );

    let kind = match parse_schedule_kind(&request.kind) {
        Ok(kind) => kind,
        Err(e) => {
            warn!("Invalid schedule kind: {}", e);
            return Err(bad_request(e, "INVALID_SCHEDULE_KIND"));
        }
    };
    let period = match parse_recurrence_period(&request.period) {
        Ok(period) => period,
        Err(e) => {
            warn!("Invalid recurrence period: {}", e);
            return Err(bad_request(e, "INVALID_RECURRENCE_PERIOD"));
        }
    };

    let new_schedule = recurring_schedule::ActiveModel {
        account_id: Set(request.account_id),
        kind: Set(kind),
        display_name: Set(request.display_name.clone()),
        expected_amount: Set(request.expected_amount),
        period: Set(period),
        anchor_date: Set(request.anchor_date),
        second_day: Set(request.second_day),
        ..Default::default()
    };

    match new_schedule.insert(&state.db).await {
        Ok(schedule) => {
            info!("Successfully created schedule with ID: {}", schedule.id);
            let response = ApiResponse {
                data: ScheduleResponse::from(schedule),
                message: "Schedule created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create schedule: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create schedule".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all recurring schedules
#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    tag = "schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules retrieved successfully", body = ApiResponse<Vec<ScheduleResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_schedules(
    Valid(Query(query)): Valid<Query<ScheduleQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ScheduleResponse>>>, StatusCode> {
    trace!("Entering get_schedules function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    debug!("Fetching schedules - page: {}, limit: {}", page, limit);

    let mut query_builder = recurring_schedule::Entity::find();
    if let Some(account_id) = query.account_id {
        query_builder =
            query_builder.filter(recurring_schedule::Column::AccountId.eq(account_id));
    }

    match query_builder
        .order_by_asc(recurring_schedule::Column::Id)
        .paginate(&state.db, limit)
        .fetch_page(page - 1)
        .await
    {
        Ok(schedules) => {
            info!("Successfully retrieved {} schedules", schedules.len());
            let response_data: Vec<ScheduleResponse> =
                schedules.into_iter().map(ScheduleResponse::from).collect();

            let response = ApiResponse {
                data: response_data,
                message: "Schedules retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve schedules: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific recurring schedule by ID
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{schedule_id}",
    tag = "schedules",
    params(
        ("schedule_id" = i32, Path, description = "Schedule ID"),
    ),
    responses(
        (status = 200, description = "Schedule retrieved successfully", body = ApiResponse<ScheduleResponse>),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_schedule(
    Path(schedule_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ScheduleResponse>>, StatusCode> {
    trace!("Entering get_schedule function for schedule_id: {}", schedule_id);

    match recurring_schedule::Entity::find_by_id(schedule_id)
        .one(&state.db)
        .await
    {
        Ok(Some(schedule)) => {
            info!("Successfully retrieved schedule with ID: {}", schedule.id);
            let response = ApiResponse {
                data: ScheduleResponse::from(schedule),
                message: "Schedule retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Schedule with ID {} not found", schedule_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve schedule {}: {}", schedule_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a recurring schedule
#[utoipa::path(
    delete,
    path = "/api/v1/schedules/{schedule_id}",
    tag = "schedules",
    params(
        ("schedule_id" = i32, Path, description = "Schedule ID"),
    ),
    responses(
        (status = 204, description = "Schedule deleted successfully"),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_schedule(
    Path(schedule_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    trace!("Entering delete_schedule function for schedule_id: {}", schedule_id);

    match recurring_schedule::Entity::delete_by_id(schedule_id)
        .exec(&state.db)
        .await
    {
        Ok(result) if result.rows_affected > 0 => {
            info!("Schedule {} deleted successfully", schedule_id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(_) => {
            warn!("Schedule with ID {} not found for deletion", schedule_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete schedule {}: {}", schedule_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
