//! The boundary the presentation layer talks to.
//!
//! Dispatches each resource to the launch adapter or the store gateway and
//! hands back either the typed payload or a [`QueryError`]. Nothing here
//! caches or retries.

use serde::Serialize;
use serde_json::Value;

use crate::config::SourcesConfig;
use crate::error::QueryError;
use crate::http_client;
use crate::launches::{LaunchAdapter, LaunchCollection, LaunchFilter};
use crate::store::{
    ObservabilityPoint, ObservabilitySnapshot, ReleasesSummary, StoreGateway,
};

/// What an empty single-row lookup means to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Absence {
    /// Empty is a normal outcome (`Ok(None)`).
    #[default]
    Allowed,
    /// Empty is a `NotFound` error.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Launches(LaunchFilter),
    UpcomingLaunches { limit: u32 },
    ReleasesSummary,
    LatestObservability(Absence),
    ObservabilityHistory { hours: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Launches(LaunchCollection),
    ReleasesSummary(ReleasesSummary),
    LatestObservability(Option<ObservabilitySnapshot>),
    ObservabilityHistory(Vec<ObservabilityPoint>),
}

#[derive(Debug, Clone)]
pub struct QueryService {
    launches: LaunchAdapter,
    store: Option<StoreGateway>,
}

impl QueryService {
    pub fn new(launches: LaunchAdapter, store: Option<StoreGateway>) -> Self {
        Self { launches, store }
    }

    /// Wires every source from configuration.
    ///
    /// With `require_store`, missing store credentials fail here; without it
    /// the service starts and store resources answer `ConfigurationMissing`.
    pub fn from_config(cfg: &SourcesConfig, require_store: bool) -> Result<Self, QueryError> {
        let client = http_client::client(&cfg.client)
            .map_err(|e| QueryError::configuration(format!("http client unavailable: {e}")))?;
        let launches = LaunchAdapter::new(&cfg.launches, client.clone());
        let store = match StoreGateway::connect(&cfg.store, client) {
            Ok(gateway) => Some(gateway),
            Err(err) if !require_store => {
                tracing::warn!(error = %err, "relational store not configured; store resources disabled");
                None
            }
            Err(err) => return Err(err),
        };
        Ok(Self::new(launches, store))
    }

    pub fn store_configured(&self) -> bool {
        self.store.is_some()
    }

    pub async fn fetch(&self, resource: Resource) -> Result<Payload, QueryError> {
        match resource {
            Resource::Launches(filter) => self.launches(&filter).await.map(Payload::Launches),
            Resource::UpcomingLaunches { limit } => self
                .upcoming_launches(limit)
                .await
                .map(Payload::Launches),
            Resource::ReleasesSummary => self
                .releases_summary()
                .await
                .map(Payload::ReleasesSummary),
            Resource::LatestObservability(absence) => self
                .latest_observability(absence)
                .await
                .map(Payload::LatestObservability),
            Resource::ObservabilityHistory { hours } => self
                .observability_history(hours)
                .await
                .map(Payload::ObservabilityHistory),
        }
    }

    pub async fn launches(&self, filter: &LaunchFilter) -> Result<LaunchCollection, QueryError> {
        self.launches.list_launches(filter).await
    }

    pub async fn upcoming_launches(&self, limit: u32) -> Result<LaunchCollection, QueryError> {
        self.launches.list_upcoming_launches(limit).await
    }

    pub async fn releases_summary(&self) -> Result<ReleasesSummary, QueryError> {
        self.gateway()?.releases_summary().await.into_result()
    }

    /// Latest snapshot. Under [`Absence::NotFound`] an `Ok` is always `Some`.
    pub async fn latest_observability(
        &self,
        absence: Absence,
    ) -> Result<Option<ObservabilitySnapshot>, QueryError> {
        let latest = self.gateway()?.latest_observability().await.into_result()?;
        match (latest, absence) {
            (None, Absence::NotFound) => Err(QueryError::not_found(
                "no observability snapshot has been synced yet",
            )),
            (latest, _) => Ok(latest),
        }
    }

    pub async fn observability_history(
        &self,
        hours: u32,
    ) -> Result<Vec<ObservabilityPoint>, QueryError> {
        self.gateway()?
            .observability_history(hours)
            .await
            .into_result()
    }

    /// Newest release rows for the diagnostic probe.
    pub async fn probe_releases(&self, limit: u32) -> Result<Vec<Value>, QueryError> {
        self.gateway()?.recent_releases(limit).await.into_result()
    }

    fn gateway(&self) -> Result<&StoreGateway, QueryError> {
        self.store.as_ref().ok_or_else(|| {
            QueryError::configuration("relational store credentials were not provided")
        })
    }
}
