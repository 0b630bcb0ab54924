//! Transfer history handler

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::super::state::AppState;
use super::super::types::{query_error_reply, ErrorReply};
use super::balance::parse_rfc3339;
use crate::store::HistoryEntry;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Upper bound on effective date, RFC3339. Defaults to unbounded.
    pub until: Option<String>,
}

/// Query a user's transfer history up to a point in time
///
/// GET /transactions/{user_id}?until=<RFC3339>
#[utoipa::path(
    get,
    path = "/transactions/{user_id}",
    params(
        ("user_id" = String, Path, description = "Account identifier"),
        ("until" = Option<String>, Query, description = "Upper bound on effective date (RFC3339)")
    ),
    responses(
        (status = 200, description = "Transfers involving the user, newest effective first", body = [HistoryEntry]),
        (status = 400, description = "Unparseable 'until' parameter"),
        (status = 500, description = "Store failure")
    ),
    tag = "Transactions"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, ErrorReply> {
    let until = parse_rfc3339(params.until.as_deref(), "until")?;

    let entries = state
        .query
        .get_history(&user_id, until)
        .await
        .map_err(query_error_reply)?;

    Ok(Json(entries))
}
