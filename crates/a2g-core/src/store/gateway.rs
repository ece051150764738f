use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    FilterOp, ObservabilityPoint, ObservabilitySnapshot, PostgrestStore, RelationalStore,
    ReleaseRecord, ReleasesSummary, SelectQuery, OBSERVABILITY_TABLE, RELEASES_TABLE,
};
use crate::config::{StoreConfig, ENV_SUPABASE_SERVICE_ROLE_KEY, ENV_SUPABASE_URL};
use crate::error::QueryError;

pub const DEFAULT_HISTORY_HOURS: u32 = 24;
pub const MAX_HISTORY_HOURS: u32 = 24 * 30;

/// Outcome of a gateway read.
///
/// `value` is always usable: on failure it is the empty/absent value and
/// `error` says why. Callers that want a hard failure use
/// [`StoreRead::into_result`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRead<T> {
    pub value: T,
    pub error: Option<QueryError>,
}

impl<T> StoreRead<T> {
    fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    fn failed(value: T, error: QueryError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, QueryError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

/// Elevated-privilege reads over the releases and observability tables.
///
/// Built once by [`StoreGateway::connect`]; cloning shares the same backend.
#[derive(Clone)]
pub struct StoreGateway {
    store: Arc<dyn RelationalStore>,
}

impl std::fmt::Debug for StoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreGateway").finish_non_exhaustive()
    }
}

impl StoreGateway {
    /// Validates credentials and builds the PostgREST backend.
    pub fn connect(cfg: &StoreConfig, client: reqwest::Client) -> Result<Self, QueryError> {
        let url = cfg
            .url
            .as_deref()
            .ok_or_else(|| QueryError::configuration(format!("{ENV_SUPABASE_URL} is not set")))?;
        let key = cfg.service_role_key.as_deref().ok_or_else(|| {
            QueryError::configuration(format!("{ENV_SUPABASE_SERVICE_ROLE_KEY} is not set"))
        })?;
        url::Url::parse(url).map_err(|e| {
            QueryError::configuration(format!("{ENV_SUPABASE_URL} is not a valid URL: {e}"))
        })?;
        Ok(Self::with_store(Arc::new(PostgrestStore::new(client, url, key))))
    }

    pub fn with_store(store: Arc<dyn RelationalStore>) -> Self {
        Self { store }
    }

    /// Total and per-status counts over the whole releases table.
    pub async fn releases_summary(&self) -> StoreRead<ReleasesSummary> {
        let query = SelectQuery::from(RELEASES_TABLE).columns(&["status"]);
        match self.rows::<ReleaseRecord>(&query).await {
            Ok(rows) => StoreRead::ok(ReleasesSummary::tally(&rows)),
            Err(err) => StoreRead::failed(ReleasesSummary::default(), err),
        }
    }

    /// Most recent snapshot; `None` when the table is empty.
    pub async fn latest_observability(&self) -> StoreRead<Option<ObservabilitySnapshot>> {
        let query = SelectQuery::from(OBSERVABILITY_TABLE)
            .order_by("synced_at", false)
            .limit(1);
        match self.rows::<ObservabilitySnapshot>(&query).await {
            Ok(rows) => StoreRead::ok(rows.into_iter().max_by_key(|s| s.synced_at)),
            Err(err) => StoreRead::failed(None, err),
        }
    }

    /// Snapshots from the last `window_hours` hours, oldest first.
    pub async fn observability_history(
        &self,
        window_hours: u32,
    ) -> StoreRead<Vec<ObservabilityPoint>> {
        self.observability_history_at(Utc::now(), window_hours)
            .await
    }

    pub async fn observability_history_at(
        &self,
        now: DateTime<Utc>,
        window_hours: u32,
    ) -> StoreRead<Vec<ObservabilityPoint>> {
        let hours = window_hours.clamp(1, MAX_HISTORY_HOURS);
        let cutoff = now - Duration::hours(i64::from(hours));
        let query = SelectQuery::from(OBSERVABILITY_TABLE)
            .columns(&ObservabilityPoint::COLUMNS)
            .filter(
                "synced_at",
                FilterOp::Gte,
                cutoff.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .order_by("synced_at", true);
        match self.rows::<ObservabilityPoint>(&query).await {
            Ok(rows) => {
                let mut points: Vec<ObservabilityPoint> =
                    rows.into_iter().filter(|p| p.synced_at >= cutoff).collect();
                points.sort_by_key(|p| p.synced_at);
                StoreRead::ok(points)
            }
            Err(err) => StoreRead::failed(Vec::new(), err),
        }
    }

    /// Up to `limit` newest release rows, untyped. Diagnostic probe only.
    pub async fn recent_releases(&self, limit: u32) -> StoreRead<Vec<Value>> {
        let query = SelectQuery::from(RELEASES_TABLE)
            .order_by("created_at", false)
            .limit(limit.max(1));
        match self.rows::<Value>(&query).await {
            Ok(rows) => StoreRead::ok(rows),
            Err(err) => StoreRead::failed(Vec::new(), err),
        }
    }

    async fn rows<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>, QueryError> {
        let raw = self.store.select(query).await.map_err(|failure| {
            tracing::error!(target: "a2g::store", table = %query.table, error = %failure, "store query failed");
            QueryError::store(failure.to_string())
        })?;
        raw.into_iter()
            .map(serde_json::from_value::<T>)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| {
                tracing::error!(target: "a2g::store", table = %query.table, error = %e, "store row did not match expected shape");
                QueryError::store(format!("{} row did not match expected shape: {e}", query.table))
            })
    }
}
