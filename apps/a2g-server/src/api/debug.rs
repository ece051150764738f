use axum::{extract::State, response::Response};
use serde_json::{json, Value};

use crate::{responses, AppState};

/// Rows read by the releases probe.
pub(crate) const PROBE_ROWS: u32 = 5;

/// Credential presence plus a live read of the newest releases.
#[utoipa::path(
    get,
    path = "/api/debug",
    tag = "Meta",
    description = "Reports which store credentials are set and probes the releases table.",
    responses(
        (status = 200, description = "Diagnostics", body = serde_json::Value),
        (status = 500, description = "Probe failed; diagnostics include `error`", body = serde_json::Value),
    )
)]
pub async fn debug(State(state): State<AppState>) -> Response {
    let env = state.credentials();
    match state.query().probe_releases(PROBE_ROWS).await {
        Ok(rows) => responses::json_ok(json!({
            "env": env,
            "releases": { "count": rows.len(), "rows": rows },
        })),
        Err(err) => {
            let payload = json!({
                "env": env,
                "releases": { "count": 0, "rows": Vec::<Value>::new() },
            });
            responses::query_failure_with(&err, err.message(), payload)
        }
    }
}
