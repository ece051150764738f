use a2g_core::store::DEFAULT_HISTORY_HOURS;
use a2g_core::Absence;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{responses, AppState};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Window size in hours, 1 to 720 (default 24).
    pub hours: Option<String>,
}

/// Most recent observability snapshot, or `null` before the first sync.
#[utoipa::path(
    get,
    path = "/api/observability/latest",
    tag = "Observability",
    responses(
        (status = 200, description = "Latest snapshot", body = serde_json::Value),
        (status = 500, description = "Store unavailable", body = serde_json::Value),
    )
)]
pub async fn latest(State(state): State<AppState>) -> Response {
    match state.query().latest_observability(Absence::Allowed).await {
        Ok(snapshot) => responses::json_ok(json!({ "snapshot": snapshot })),
        Err(err) => responses::query_failure(&err, "Failed to fetch observability snapshot"),
    }
}

/// Snapshots in the trailing window, oldest first.
#[utoipa::path(
    get,
    path = "/api/observability/history",
    tag = "Observability",
    params(HistoryParams),
    responses(
        (status = 200, description = "Snapshot series", body = serde_json::Value),
        (status = 500, description = "Store unavailable", body = serde_json::Value),
    )
)]
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let hours = super::loose_u32(params.hours.as_deref(), DEFAULT_HISTORY_HOURS);
    match state.query().observability_history(hours).await {
        Ok(points) => responses::json_ok(points),
        Err(err) => responses::query_failure(&err, "Failed to fetch observability history"),
    }
}
