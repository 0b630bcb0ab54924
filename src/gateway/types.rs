//! Gateway response types and error → status-code mapping

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::query::QueryError;
use crate::transfer::TransferError;

/// Success envelope for write operations
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "transaction created successfully")]
    pub message: String,
}

/// Error envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "insufficient balance")]
    pub error: String,
}

pub type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub fn error_reply(status: StatusCode, msg: impl Into<String>) -> ErrorReply {
    (status, Json(ErrorResponse { error: msg.into() }))
}

/// Map an engine error to its HTTP reply.
///
/// Store causes are logged here and never forwarded to the client.
pub fn transfer_error_reply(err: TransferError) -> ErrorReply {
    let status = match &err {
        TransferError::InvalidAmount
        | TransferError::InvalidEffectiveDate
        | TransferError::TransactionIdRequired
        | TransferError::SameParty
        | TransferError::InsufficientBalance => StatusCode::BAD_REQUEST,
        TransferError::UserNotFound => StatusCode::NOT_FOUND,
        TransferError::DuplicateTransaction => StatusCode::CONFLICT,
        TransferError::Store(cause) => {
            tracing::error!("transfer failed on store error: {cause}");
            return error_reply(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
        }
    };
    error_reply(status, err.to_string())
}

/// Map a query error to its HTTP reply
pub fn query_error_reply(err: QueryError) -> ErrorReply {
    match err {
        QueryError::NotFound => error_reply(StatusCode::NOT_FOUND, "balance not found"),
        QueryError::Store(cause) => {
            tracing::error!("query failed on store error: {cause}");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_status_mapping() {
        let cases = [
            (TransferError::InvalidAmount, StatusCode::BAD_REQUEST),
            (TransferError::InvalidEffectiveDate, StatusCode::BAD_REQUEST),
            (TransferError::TransactionIdRequired, StatusCode::BAD_REQUEST),
            (TransferError::SameParty, StatusCode::BAD_REQUEST),
            (TransferError::InsufficientBalance, StatusCode::BAD_REQUEST),
            (TransferError::UserNotFound, StatusCode::NOT_FOUND),
            (TransferError::DuplicateTransaction, StatusCode::CONFLICT),
            (
                TransferError::Store(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = transfer_error_reply(err);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_store_error_is_not_leaked() {
        let (_, Json(body)) =
            transfer_error_reply(TransferError::Store(sqlx::Error::PoolTimedOut));
        assert_eq!(body.error, "internal server error");
    }

    #[test]
    fn test_query_error_status_mapping() {
        let (status, _) = query_error_reply(QueryError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = query_error_reply(QueryError::Store(sqlx::Error::PoolTimedOut));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
