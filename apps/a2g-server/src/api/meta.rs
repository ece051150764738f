use axum::response::Response;
use serde_json::json;

/// Health probe.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Meta",
    operation_id = "healthz_doc",
    description = "Service readiness probe.",
    responses(
        (status = 200, description = "Service healthy", body = crate::openapi::HealthOk)
    )
)]
pub async fn healthz() -> Response {
    crate::responses::json_ok(json!({"ok": true}))
}

/// Generated OpenAPI document.
#[utoipa::path(
    get,
    path = "/spec/openapi.json",
    tag = "Meta",
    responses(
        (status = 200, description = "OpenAPI 3.1 document", body = serde_json::Value)
    )
)]
pub async fn openapi_json() -> Response {
    crate::responses::json_ok(crate::openapi::document())
}
