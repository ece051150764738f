use axum::{routing::get, Router};

use crate::{api, AppState};

pub(crate) mod paths {
    pub const HEALTHZ: &str = "/healthz";
    pub const OPENAPI_JSON: &str = "/spec/openapi.json";
    pub const DEBUG: &str = "/api/debug";
    pub const LAUNCHES: &str = "/api/launches";
    pub const LAUNCHES_UPCOMING: &str = "/api/launches/upcoming";
    pub const RELEASES_SUMMARY: &str = "/api/releases/summary";
    pub const OBSERVABILITY_LATEST: &str = "/api/observability/latest";
    pub const OBSERVABILITY_HISTORY: &str = "/api/observability/history";

    #[cfg(test)]
    pub const ALL: &[&str] = &[
        HEALTHZ,
        OPENAPI_JSON,
        DEBUG,
        LAUNCHES,
        LAUNCHES_UPCOMING,
        RELEASES_SUMMARY,
        OBSERVABILITY_LATEST,
        OBSERVABILITY_HISTORY,
    ];
}

pub(crate) fn build(state: AppState) -> Router {
    Router::new()
        .route(paths::HEALTHZ, get(api::meta::healthz))
        .route(paths::OPENAPI_JSON, get(api::meta::openapi_json))
        .route(paths::DEBUG, get(api::debug::debug))
        .route(paths::LAUNCHES, get(api::launches::launches))
        .route(paths::LAUNCHES_UPCOMING, get(api::launches::upcoming))
        .route(paths::RELEASES_SUMMARY, get(api::releases::summary))
        .route(paths::OBSERVABILITY_LATEST, get(api::observability::latest))
        .route(paths::OBSERVABILITY_HISTORY, get(api::observability::history))
        .with_state(state)
}
