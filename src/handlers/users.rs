use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Username (must be unique)
    pub username: String,
}

/// Request body for updating a user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Username (must be unique)
    pub username: Option<String>,
}

/// User response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), StatusCode> {
    trace!("Entering create_user function");
    debug!("Creating user with username: {}", request.username);

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        ..Default::default()
    };

    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!("User created successfully with ID: {}", user_model.id);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create user '{}': {}", request.username, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, StatusCode> {
    trace!("Entering get_users function");

    match user::Entity::find().all(&state.db).await {
        Ok(users) => {
            debug!("Retrieved {} users from database", users.len());
            let user_responses: Vec<UserResponse> =
                users.into_iter().map(UserResponse::from).collect();

            let response = ApiResponse {
                data: user_responses,
                message: "Users retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve users from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering get_user function for user_id: {}", user_id);

    match user::Entity::find_by_id(user_id).one(&state.db).await {
        Ok(Some(user_model)) => {
            info!("Successfully retrieved user with ID: {}", user_model.id);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering update_user function for user_id: {}", user_id);

    let user_model = match user::Entity::find_by_id(user_id).one(&state.db).await {
        Ok(Some(user_model)) => user_model,
        Ok(None) => {
            warn!("User with ID {} not found for update", user_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to fetch user {} for update: {}", user_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active_model: user::ActiveModel = user_model.into();
    if let Some(username) = request.username {
        active_model.username = Set(username);
    }

    match active_model.update(&state.db).await {
        Ok(updated) => {
            info!("User {} updated successfully", updated.id);
            let response = ApiResponse {
                data: UserResponse::from(updated),
                message: "User updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    trace!("Entering delete_user function for user_id: {}", user_id);

    match user::Entity::delete_by_id(user_id).exec(&state.db).await {
        Ok(result) if result.rows_affected > 0 => {
            info!("User {} deleted successfully", user_id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(_) => {
            warn!("User with ID {} not found for deletion", user_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
