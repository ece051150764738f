use axum::{extract::State, response::Response};

use crate::{responses, AppState};

/// Release counts per workflow status.
#[utoipa::path(
    get,
    path = "/api/releases/summary",
    tag = "Releases",
    responses(
        (status = 200, description = "Counts by status", body = serde_json::Value),
        (status = 500, description = "Store unavailable", body = serde_json::Value),
    )
)]
pub async fn summary(State(state): State<AppState>) -> Response {
    match state.query().releases_summary().await {
        Ok(summary) => responses::json_ok(summary),
        Err(err) => responses::query_failure(&err, "Failed to fetch release summary"),
    }
}
