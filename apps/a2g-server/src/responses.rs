use a2g_core::{ErrorKind, QueryError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

pub(crate) fn json_ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::UpstreamUnavailable
        | ErrorKind::StoreQueryFailed
        | ErrorKind::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs the failure detail and answers with a fixed `{"error": ...}` body.
pub(crate) fn query_failure(err: &QueryError, public_message: &str) -> Response {
    tracing::error!(
        target: "a2g::http",
        kind = err.kind().as_str(),
        detail = %err.message(),
        "{public_message}"
    );
    (status_for(err.kind()), Json(json!({ "error": public_message }))).into_response()
}

/// Same as [`query_failure`] but keeps an already-built payload next to the
/// error field.
pub(crate) fn query_failure_with(
    err: &QueryError,
    public_message: &str,
    mut payload: Value,
) -> Response {
    tracing::error!(
        target: "a2g::http",
        kind = err.kind().as_str(),
        detail = %err.message(),
        "{public_message}"
    );
    if let Value::Object(map) = &mut payload {
        map.insert("error".into(), Value::String(public_message.to_string()));
    }
    (status_for(err.kind()), Json(payload)).into_response()
}
