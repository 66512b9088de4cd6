use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::bank_account::{self, AccountKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new bank account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name
    pub name: String,
    /// ISO 4217 currency code (e.g., "USD")
    pub currency_code: String,
    /// Owner user ID
    pub owner_id: i32,
    /// Latest balance reported by the aggregator
    pub current_balance: Decimal,
    /// Main income schedule, once detection has confirmed one
    pub main_income_schedule_id: Option<i32>,
    /// Account kind: "Linked" or "Spending"
    pub kind: String,
}

/// Request body for updating a bank account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAccountRequest {
    /// Account name
    pub name: Option<String>,
    /// ISO 4217 currency code (e.g., "USD")
    pub currency_code: Option<String>,
    /// Latest balance reported by the aggregator
    pub current_balance: Option<Decimal>,
    /// Main income schedule id; pass null to clear
    pub main_income_schedule_id: Option<Option<i32>>,
    /// Account kind: "Linked" or "Spending"
    pub kind: Option<String>,
}

/// Bank account response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
    pub currency_code: String,
    pub owner_id: i32,
    pub current_balance: Decimal,
    pub main_income_schedule_id: Option<i32>,
    pub kind: String,
}

impl From<bank_account::Model> for AccountResponse {
    fn from(model: bank_account::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            currency_code: model.currency_code,
            owner_id: model.owner_id,
            current_balance: model.current_balance,
            main_income_schedule_id: model.main_income_schedule_id,
            kind: format!("{:?}", model.kind),
        }
    }
}

// Helper function to parse the account kind string
fn parse_account_kind(kind: &str) -> Result<AccountKind, String> {
    match kind {
        "Linked" => Ok(AccountKind::Linked),
        "Spending" => Ok(AccountKind::Spending),
        _ => Err(format!("Invalid account kind: {}", kind)),
    }
}

fn invalid_kind_response(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: "INVALID_ACCOUNT_KIND".to_string(),
            success: false,
        }),
    )
}

/// Create a new bank account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_account function");
    debug!(
        "Creating account with name: {}, currency: {}, owner_id: {}",
        request.name, request.currency_code, request.owner_id
    );

    let kind = match parse_account_kind(&request.kind) {
        Ok(kind) => kind,
        Err(e) => {
            warn!("Invalid account kind: {}", e);
            return Err(invalid_kind_response(e));
        }
    };

    let new_account = bank_account::ActiveModel {
        name: Set(request.name.clone()),
        currency_code: Set(request.currency_code.clone()),
        owner_id: Set(request.owner_id),
        current_balance: Set(request.current_balance),
        main_income_schedule_id: Set(request.main_income_schedule_id),
        kind: Set(kind),
        ..Default::default()
    };

    match new_account.insert(&state.db).await {
        Ok(account_model) => {
            info!(
                "Account created successfully with ID: {}, name: {}",
                account_model.id, account_model.name
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create account '{}' for owner {}: {}",
                request.name, request.owner_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create account".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all bank accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_accounts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, StatusCode> {
    trace!("Entering get_accounts function");

    match bank_account::Entity::find().all(&state.db).await {
        Ok(accounts) => {
            debug!("Retrieved {} accounts from database", accounts.len());
            let account_responses: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();

            let response = ApiResponse {
                data: account_responses,
                message: "Accounts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve accounts from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific bank account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!("Entering get_account function for account_id: {}", account_id);

    match bank_account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account_model)) => {
            info!(
                "Successfully retrieved account with ID: {}, name: {}",
                account_model.id, account_model.name
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Account with ID {} not found", account_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve account {}: {}", account_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a bank account
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!("Entering update_account function for account_id: {}", account_id);

    let account_model = match bank_account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account_model)) => account_model,
        Ok(None) => {
            warn!("Account with ID {} not found for update", account_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to fetch account {} for update: {}",
                account_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active_model: bank_account::ActiveModel = account_model.into();
    if let Some(name) = request.name {
        active_model.name = Set(name);
    }
    if let Some(currency_code) = request.currency_code {
        active_model.currency_code = Set(currency_code);
    }
    if let Some(current_balance) = request.current_balance {
        active_model.current_balance = Set(current_balance);
    }
    if let Some(main_income_schedule_id) = request.main_income_schedule_id {
        active_model.main_income_schedule_id = Set(main_income_schedule_id);
    }
    if let Some(kind) = request.kind {
        match parse_account_kind(&kind) {
            Ok(kind) => active_model.kind = Set(kind),
            Err(e) => {
                warn!("Invalid account kind on update: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        }
    }

    match active_model.update(&state.db).await {
        Ok(updated) => {
            info!("Account {} updated successfully", updated.id);
            let response = ApiResponse {
                data: AccountResponse::from(updated),
                message: "Account updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update account {}: {}", account_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a bank account
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    trace!("Entering delete_account function for account_id: {}", account_id);

    match bank_account::Entity::delete_by_id(account_id).exec(&state.db).await {
        Ok(result) if result.rows_affected > 0 => {
            info!("Account {} deleted successfully", account_id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(_) => {
            warn!("Account with ID {} not found for deletion", account_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete account {}: {}", account_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
