use a2g_core::{CredentialPresence, QueryService};

/// Shared handler state, cloned per request.
#[derive(Clone)]
pub(crate) struct AppState {
    query: QueryService,
    credentials: CredentialPresence,
}

impl AppState {
    pub(crate) fn new(query: QueryService, credentials: CredentialPresence) -> Self {
        Self { query, credentials }
    }

    pub(crate) fn query(&self) -> &QueryService {
        &self.query
    }

    pub(crate) fn credentials(&self) -> CredentialPresence {
        self.credentials
    }
}
