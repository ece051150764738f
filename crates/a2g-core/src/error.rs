use serde::Serialize;

/// The four failure classes every source error is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Third-party API unreachable or answered with a non-success status.
    UpstreamUnavailable,
    /// Relational query failed for a reason other than zero rows.
    StoreQueryFailed,
    /// Single-row lookup where the caller asked for absence to be an error.
    NotFound,
    /// Required credential or endpoint absent.
    ConfigurationMissing,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::StoreQueryFailed => "store_query_failed",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ConfigurationMissing => "configuration_missing",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized error returned across the query boundary.
///
/// Carries only a kind and a message; driver and client error values are
/// rendered to text before they get here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct QueryError {
    kind: ErrorKind,
    message: String,
}

impl QueryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamUnavailable, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreQueryFailed, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationMissing, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        // Only launch-provider traffic converts implicitly; the store client
        // maps its own failures through `StoreFailure`.
        let detail = match err.status() {
            Some(status) => format!("upstream returned {status}"),
            None if err.is_timeout() => "upstream request timed out".to_string(),
            None if err.is_decode() => format!("upstream body could not be decoded: {err}"),
            None => format!("upstream request failed: {err}"),
        };
        QueryError::upstream(detail)
    }
}
