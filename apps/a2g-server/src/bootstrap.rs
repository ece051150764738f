use a2g_core::config::ConfigError;
use a2g_core::{QueryError, QueryService, SourcesConfig};
use axum::Router;

use crate::{access_log, router, AppState};

#[derive(Debug, thiserror::Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} (set A2G_STORE_OPTIONAL=1 to start without the relational store)")]
    Sources(#[from] QueryError),
}

/// Reads configuration from `lookup`, wires every source, and returns the
/// routed application. Store credentials are checked here, once.
pub(crate) fn build_with<F>(lookup: F) -> Result<Router, BootstrapError>
where
    F: Fn(&str) -> Option<String>,
{
    let require_store = lookup("A2G_STORE_OPTIONAL").as_deref() != Some("1");
    let sources = SourcesConfig::from_lookup(&lookup)?;
    let query = QueryService::from_config(&sources, require_store)?;
    tracing::info!(
        launch_api = sources.launches.base(),
        store = query.store_configured(),
        "sources configured"
    );
    let state = AppState::new(query, sources.store.presence());
    Ok(router::build(state))
}

pub(crate) fn build() -> Result<Router, BootstrapError> {
    build_with(|key| std::env::var(key).ok())
}

pub(crate) fn attach_http_layers(router: Router, concurrency_limit: usize) -> Router {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::{compression::CompressionLayer, trace::TraceLayer};

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
}

pub(crate) fn attach_global_layers(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(access_log::access_log_mw))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum HttpConfigError {
    #[error("invalid A2G_HTTP_MAX_CONC: {0}")]
    InvalidConcurrency(String),
    #[error("invalid A2G_PORT: {0}")]
    InvalidPort(String),
    #[error("invalid A2G_BIND: {0}")]
    InvalidBind(String),
}

#[derive(Debug)]
pub(crate) struct HttpConfig {
    pub addr: std::net::SocketAddr,
    pub concurrency_limit: usize,
}

pub(crate) fn http_config_from_env() -> Result<HttpConfig, HttpConfigError> {
    http_config_from_lookup(|key| std::env::var(key).ok())
}

pub(crate) fn http_config_from_lookup<F>(lookup: F) -> Result<HttpConfig, HttpConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let concurrency_limit = lookup("A2G_HTTP_MAX_CONC")
        .map(|raw| match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(HttpConfigError::InvalidConcurrency(raw)),
        })
        .transpose()?
        .unwrap_or(1024);

    let bind = lookup("A2G_BIND").unwrap_or_else(|| "127.0.0.1".into());
    let port_raw = lookup("A2G_PORT").unwrap_or_else(|| "8092".into());
    let port: u16 = port_raw
        .parse()
        .map_err(|_| HttpConfigError::InvalidPort(port_raw))?;

    let addr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|_| HttpConfigError::InvalidBind(bind.clone()))?;

    Ok(HttpConfig {
        addr,
        concurrency_limit,
    })
}
