use a2g_core::launches::DEFAULT_UPCOMING_LIMIT;
use a2g_core::LaunchFilter;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{responses, AppState};

pub(crate) const LAUNCHES_FAILED: &str = "Failed to fetch launches";
pub(crate) const UPCOMING_FAILED: &str = "Failed to fetch upcoming launches";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LaunchListParams {
    /// Page size, 1 to 100 (default 10).
    pub limit: Option<String>,
    /// Zero-based offset (default 0).
    pub offset: Option<String>,
    /// Provider status filter, passed through verbatim.
    pub status: Option<String>,
    /// Free-text search term.
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingParams {
    /// Page size, 1 to 100 (default 5).
    pub limit: Option<String>,
}

/// Paginated launch listing.
#[utoipa::path(
    get,
    path = "/api/launches",
    tag = "Launches",
    params(LaunchListParams),
    responses(
        (status = 200, description = "Launch page", body = serde_json::Value),
        (status = 500, description = "Launch provider unavailable", body = serde_json::Value),
    )
)]
pub async fn launches(
    State(state): State<AppState>,
    Query(params): Query<LaunchListParams>,
) -> Response {
    let filter = LaunchFilter::from_params(
        params.limit.as_deref(),
        params.offset.as_deref(),
        params.status.as_deref(),
        params.search.as_deref(),
    );
    match state.query().launches(&filter).await {
        Ok(page) => responses::json_ok(page),
        Err(err) => responses::query_failure(&err, LAUNCHES_FAILED),
    }
}

/// Next upcoming launches.
#[utoipa::path(
    get,
    path = "/api/launches/upcoming",
    tag = "Launches",
    params(UpcomingParams),
    responses(
        (status = 200, description = "Upcoming launch page", body = serde_json::Value),
        (status = 500, description = "Launch provider unavailable", body = serde_json::Value),
    )
)]
pub async fn upcoming(
    State(state): State<AppState>,
    Query(params): Query<UpcomingParams>,
) -> Response {
    let limit = super::loose_u32(params.limit.as_deref(), DEFAULT_UPCOMING_LIMIT);
    match state.query().upcoming_launches(limit).await {
        Ok(page) => responses::json_ok(page),
        Err(err) => responses::query_failure(&err, UPCOMING_FAILED),
    }
}
