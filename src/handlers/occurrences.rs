use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::{expected_occurrence, recurring_schedule};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for materializing an expected occurrence of a schedule
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOccurrenceRequest {
    /// Date the occurrence is predicted on
    pub expected_date: NaiveDate,
    /// Override amount; defaults to the schedule's expected amount
    pub expected_amount: Option<Decimal>,
}

/// Request body for recording when an occurrence was observed against real
/// transactions. Passing both dates as null resets it to projected.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RealizeOccurrenceRequest {
    /// Date a matching pending transaction appeared
    pub pending_date: Option<NaiveDate>,
    /// Date a matching settled transaction appeared
    pub settled_date: Option<NaiveDate>,
}

/// Expected occurrence response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OccurrenceResponse {
    pub id: i32,
    pub schedule_id: i32,
    pub account_id: i32,
    pub kind: String,
    pub expected_date: NaiveDate,
    pub expected_amount: Decimal,
    pub pending_date: Option<NaiveDate>,
    pub settled_date: Option<NaiveDate>,
}

impl From<expected_occurrence::Model> for OccurrenceResponse {
    fn from(model: expected_occurrence::Model) -> Self {
        Self {
            id: model.id,
            schedule_id: model.schedule_id,
            account_id: model.account_id,
            kind: format!("{:?}", model.kind),
            expected_date: model.expected_date,
            expected_amount: model.expected_amount,
            pending_date: model.pending_date,
            settled_date: model.settled_date,
        }
    }
}

/// Materialize an expected occurrence of a recurring schedule
#[utoipa::path(
    post,
    path = "/api/v1/schedules/{schedule_id}/occurrences",
    tag = "occurrences",
    params(
        ("schedule_id" = i32, Path, description = "Schedule ID"),
    ),
    request_body = CreateOccurrenceRequest,
    responses(
        (status = 201, description = "Occurrence created successfully", body = ApiResponse<OccurrenceResponse>),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_occurrence(
    Path(schedule_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateOccurrenceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OccurrenceResponse>>), StatusCode> {
    trace!("Entering create_occurrence function for schedule_id: {}", schedule_id);

    // The occurrence denormalizes account and kind from its schedule.
    let schedule = match recurring_schedule::Entity::find_by_id(schedule_id)
        .one(&state.db)
        .await
    {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            warn!("Schedule with ID {} not found", schedule_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to fetch schedule {}: {}", schedule_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let new_occurrence = expected_occurrence::ActiveModel {
        schedule_id: Set(schedule.id),
        account_id: Set(schedule.account_id),
        kind: Set(schedule.kind),
        expected_date: Set(request.expected_date),
        expected_amount: Set(request.expected_amount.unwrap_or(schedule.expected_amount)),
        pending_date: Set(None),
        settled_date: Set(None),
        ..Default::default()
    };

    match new_occurrence.insert(&state.db).await {
        Ok(occurrence) => {
            info!(
                "Occurrence created with ID: {} for schedule {}",
                occurrence.id, schedule_id
            );
            let response = ApiResponse {
                data: OccurrenceResponse::from(occurrence),
                message: "Occurrence created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create occurrence for schedule {}: {}",
                schedule_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Record the realization state of an expected occurrence
#[utoipa::path(
    put,
    path = "/api/v1/occurrences/{occurrence_id}/realization",
    tag = "occurrences",
    params(
        ("occurrence_id" = i32, Path, description = "Occurrence ID"),
    ),
    request_body = RealizeOccurrenceRequest,
    responses(
        (status = 200, description = "Occurrence updated successfully", body = ApiResponse<OccurrenceResponse>),
        (status = 404, description = "Occurrence not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn realize_occurrence(
    Path(occurrence_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<RealizeOccurrenceRequest>,
) -> Result<Json<ApiResponse<OccurrenceResponse>>, StatusCode> {
    trace!(
        "Entering realize_occurrence function for occurrence_id: {}",
        occurrence_id
    );
    debug!(
        "Setting realization: pending_date={:?}, settled_date={:?}",
        request.pending_date, request.settled_date
    );

    let occurrence = match expected_occurrence::Entity::find_by_id(occurrence_id)
        .one(&state.db)
        .await
    {
        Ok(Some(occurrence)) => occurrence,
        Ok(None) => {
            warn!("Occurrence with ID {} not found", occurrence_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to fetch occurrence {}: {}",
                occurrence_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active_model: expected_occurrence::ActiveModel = occurrence.into();
    active_model.pending_date = Set(request.pending_date);
    active_model.settled_date = Set(request.settled_date);

    match active_model.update(&state.db).await {
        Ok(updated) => {
            info!("Occurrence {} realization updated", updated.id);
            let response = ApiResponse {
                data: OccurrenceResponse::from(updated),
                message: "Occurrence updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update occurrence {}: {}",
                occurrence_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
