use std::time::{Duration, Instant};

use moka::future::Cache;

use super::{clamp_limit, upcoming_url, LaunchCollection, LaunchFilter};
use crate::config::LaunchApiConfig;
use crate::error::QueryError;

type PageCache = Cache<String, LaunchCollection>;

fn page_cache(capacity: u64, ttl: Duration) -> Option<PageCache> {
    if capacity == 0 {
        return None;
    }
    Some(
        Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build(),
    )
}

/// Client for the launch provider's collection endpoints.
///
/// Pages are cached per resolved URL with a fixed time-to-live; a miss (or an
/// expired entry) goes upstream synchronously. Two concurrent misses for the
/// same URL may both go upstream; whichever inserts last wins, and both
/// values are equivalent.
#[derive(Clone)]
pub struct LaunchAdapter {
    client: reqwest::Client,
    base: String,
    listing: Option<PageCache>,
    upcoming: Option<PageCache>,
}

impl std::fmt::Debug for LaunchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchAdapter")
            .field("base", &self.base)
            .field("listing_cached", &self.listing.is_some())
            .field("upcoming_cached", &self.upcoming.is_some())
            .finish_non_exhaustive()
    }
}

impl LaunchAdapter {
    pub fn new(cfg: &LaunchApiConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base: cfg.base().to_string(),
            listing: page_cache(cfg.cache_capacity, cfg.listing_ttl),
            upcoming: page_cache(cfg.cache_capacity, cfg.upcoming_ttl),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// General listing with pagination, status, and free-text search.
    pub async fn list_launches(&self, filter: &LaunchFilter) -> Result<LaunchCollection, QueryError> {
        let filter = filter.clone().normalized();
        let url = filter.request_url(&self.base);
        self.cached_page(self.listing.as_ref(), url, filter.limit)
            .await
    }

    /// The provider's upcoming sub-resource; takes no status or search.
    pub async fn list_upcoming_launches(&self, limit: u32) -> Result<LaunchCollection, QueryError> {
        let limit = clamp_limit(limit);
        let url = upcoming_url(&self.base, limit);
        self.cached_page(self.upcoming.as_ref(), url, limit).await
    }

    async fn cached_page(
        &self,
        cache: Option<&PageCache>,
        url: String,
        limit: u32,
    ) -> Result<LaunchCollection, QueryError> {
        if let Some(cache) = cache {
            if let Some(page) = cache.get(&url).await {
                tracing::debug!(target: "a2g::launches", %url, "launch page cache hit");
                return Ok(page);
            }
        }
        let page = self.fetch_page(&url, limit).await?;
        if let Some(cache) = cache {
            cache.insert(url, page.clone()).await;
        }
        Ok(page)
    }

    async fn fetch_page(&self, url: &str, limit: u32) -> Result<LaunchCollection, QueryError> {
        let started = Instant::now();
        match self.request_page(url).await {
            Ok(mut page) => {
                page.results.truncate(limit as usize);
                tracing::debug!(
                    target: "a2g::launches",
                    %url,
                    count = page.count,
                    returned = page.results.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "launch page fetched"
                );
                Ok(page)
            }
            Err(err) => {
                let err = QueryError::from(err);
                tracing::warn!(target: "a2g::launches", %url, error = %err, "launch provider request failed");
                Err(err)
            }
        }
    }

    async fn request_page(&self, url: &str) -> Result<LaunchCollection, reqwest::Error> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        resp.json::<LaunchCollection>().await
    }
}
