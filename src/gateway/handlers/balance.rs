//! Balance query handler

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::super::state::AppState;
use super::super::types::{error_reply, query_error_reply, ErrorReply};
use crate::store::Balance;

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Observation time, RFC3339. Defaults to the currently-effective row.
    pub at: Option<String>,
}

/// Query a user's balance as of a point in time
///
/// GET /balances/{user_id}?at=<RFC3339>
#[utoipa::path(
    get,
    path = "/balances/{user_id}",
    params(
        ("user_id" = String, Path, description = "Account identifier"),
        ("at" = Option<String>, Query, description = "Observation time (RFC3339)")
    ),
    responses(
        (status = 200, description = "Balance effective at the requested time", body = Balance),
        (status = 400, description = "Unparseable 'at' parameter"),
        (status = 404, description = "No balance interval covers the requested time"),
        (status = 500, description = "Store failure")
    ),
    tag = "Balances"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<BalanceQuery>,
) -> Result<Json<Balance>, ErrorReply> {
    let at = parse_rfc3339(params.at.as_deref(), "at")?;

    let balance = state
        .query
        .get_balance(&user_id, at)
        .await
        .map_err(query_error_reply)?;

    Ok(Json(balance))
}

/// Parse an optional RFC3339 query parameter, rejecting garbage with a 400
pub(super) fn parse_rfc3339(
    value: Option<&str>,
    name: &str,
) -> Result<Option<DateTime<Utc>>, ErrorReply> {
    match value {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                error_reply(
                    StatusCode::BAD_REQUEST,
                    format!("invalid '{name}' parameter: expected RFC3339 timestamp"),
                )
            }),
    }
}
