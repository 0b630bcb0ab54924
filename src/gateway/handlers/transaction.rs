//! Transfer submission handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{transfer_error_reply, ErrorReply, MessageResponse};
use crate::transfer::TransferRequest;

/// Transfer submission body
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionRequest {
    #[schema(example = "user1")]
    pub sender_id: String,
    #[schema(example = "user2")]
    pub receiver_id: String,
    /// Amount in minor units, strictly positive
    #[schema(example = 100_i64)]
    pub amount: i64,
    /// Caller-supplied idempotency key
    #[schema(example = "tx-2024-000001")]
    pub transaction_id: String,
    /// RFC3339, strictly in the future
    pub effective_date: DateTime<Utc>,
}

/// Submit a transfer
///
/// POST /transactions
#[utoipa::path(
    post,
    path = "/transactions",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transfer committed", body = MessageResponse),
        (status = 400, description = "Malformed or invalid request"),
        (status = 404, description = "Sender or receiver not found"),
        (status = 409, description = "Duplicate transaction id"),
        (status = 500, description = "Store failure")
    ),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ErrorReply> {
    let transfer = TransferRequest {
        sender_id: req.sender_id,
        receiver_id: req.receiver_id,
        amount: req.amount,
        transaction_id: req.transaction_id,
        effective_date: req.effective_date,
    };

    state
        .engine
        .create_transfer(&transfer)
        .await
        .map_err(transfer_error_reply)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "transaction created successfully".to_string(),
        }),
    ))
}
