use utoipa::{OpenApi, ToSchema};

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct HealthOk {
    pub ok: bool,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "A2G command center", description = "Launch, release, and observability aggregation"),
    paths(
        crate::api::meta::healthz,
        crate::api::meta::openapi_json,
        crate::api::debug::debug,
        crate::api::launches::launches,
        crate::api::launches::upcoming,
        crate::api::releases::summary,
        crate::api::observability::latest,
        crate::api::observability::history,
    ),
    components(schemas(HealthOk)),
    tags(
        (name = "Meta", description = "Service health and diagnostics"),
        (name = "Launches", description = "Cached launch provider listings"),
        (name = "Releases", description = "Release workflow counts"),
        (name = "Observability", description = "Synced observability snapshots"),
    )
)]
pub struct ApiDoc;

pub fn document() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
