use crate::schemas::{ApiResponse, AppState, ErrorResponse, TransactionQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::bank_transaction;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for recording a bank transaction
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Signed amount: deposits positive, debits negative
    pub amount: Decimal,
    /// Transaction date
    pub transaction_date: NaiveDate,
    /// Normalized merchant/counterparty name
    pub display_name: String,
    /// Whether the transaction is still pending (default: false)
    pub pending: Option<bool>,
}

/// Bank transaction response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub account_id: i32,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub display_name: String,
    pub pending: bool,
}

impl From<bank_transaction::Model> for TransactionResponse {
    fn from(model: bank_transaction::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            amount: model.amount,
            transaction_date: model.transaction_date,
            display_name: model.display_name,
            pending: model.pending,
        }
    }
}

/// Record a bank transaction on an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/transactions",
    tag = "transactions",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = ApiResponse<TransactionResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_transaction(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), StatusCode> {
    trace!("Entering create_transaction function for account_id: {}", account_id);
    debug!(
        "Creating transaction '{}' amount {} on {}",
        request.display_name, request.amount, request.transaction_date
    );

    let new_transaction = bank_transaction::ActiveModel {
        account_id: Set(account_id),
        amount: Set(request.amount),
        transaction_date: Set(request.transaction_date),
        display_name: Set(request.display_name.clone()),
        pending: Set(request.pending.unwrap_or(false)),
        ..Default::default()
    };

    match new_transaction.insert(&state.db).await {
        Ok(transaction) => {
            info!(
                "Transaction created with ID: {} for account {}",
                transaction.id, account_id
            );
            let response = ApiResponse {
                data: TransactionResponse::from(transaction),
                message: "Transaction created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create transaction for account {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get transactions for an account
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/transactions",
    tag = "transactions",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
        TransactionQuery,
    ),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account_transactions(
    Path(account_id): Path<i32>,
    Query(query): Query<TransactionQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, StatusCode> {
    trace!(
        "Entering get_account_transactions function for account_id: {}",
        account_id
    );

    let mut query_builder = bank_transaction::Entity::find()
        .filter(bank_transaction::Column::AccountId.eq(account_id));
    if let Some(pending) = query.pending {
        query_builder = query_builder.filter(bank_transaction::Column::Pending.eq(pending));
    }

    match query_builder
        .order_by_desc(bank_transaction::Column::TransactionDate)
        .all(&state.db)
        .await
    {
        Ok(transactions) => {
            debug!(
                "Retrieved {} transactions for account {}",
                transactions.len(),
                account_id
            );
            let response_data: Vec<TransactionResponse> = transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect();

            let response = ApiResponse {
                data: response_data,
                message: "Transactions retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transactions for account {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
