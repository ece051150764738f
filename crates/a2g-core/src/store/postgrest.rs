use async_trait::async_trait;
use serde_json::Value;

use super::{RelationalStore, SelectQuery, StoreFailure};

/// PostgREST's default `max-rows` on hosted projects.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Store backend speaking PostgREST (`{url}/rest/v1/{table}`) with the
/// service-role key.
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    rest_url: String,
    service_key: String,
    page_size: u32,
}

impl PostgrestStore {
    pub fn new(client: reqwest::Client, project_url: &str, service_key: &str) -> Self {
        Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Rows requested per round trip. Reads larger than this are fetched in
    /// consecutive pages.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

/// PostgREST error bodies look like `{"message": ..., "code": ..., "hint": ...}`.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let message = v.get("message")?.as_str()?.to_string();
            match v.get("code").and_then(Value::as_str) {
                Some(code) => Some(format!("{message} (code {code})")),
                None => Some(message),
            }
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Total row count from a `Content-Range` header such as `0-999/2500`;
/// `None` when the server did not count (`*`).
fn content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

struct Page {
    rows: Vec<Value>,
    total: Option<u64>,
}

impl PostgrestStore {
    async fn fetch_page(
        &self,
        query: &SelectQuery,
        offset: u32,
        limit: u32,
    ) -> Result<Page, StoreFailure> {
        let url = format!("{}/{}", self.rest_url, query.table);
        let mut params = query.to_params();
        params.retain(|(key, _)| key != "limit");
        params.push(("limit".to_string(), limit.to_string()));
        params.push(("offset".to_string(), offset.to_string()));

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| StoreFailure::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreFailure::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let total = resp
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total);
        let rows = resp
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreFailure::Decode(e.to_string()))?;
        Ok(Page { rows, total })
    }
}

#[async_trait]
impl RelationalStore for PostgrestStore {
    /// Reads every matching row (up to the query's own limit), paging with
    /// `limit`/`offset` so the server's `max-rows` cap never truncates the
    /// result. Paging stops at the counted total, or at a short page when
    /// the server does not report one.
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreFailure> {
        let wanted = query.limit.map(|l| l as usize);
        let mut rows: Vec<Value> = Vec::new();
        loop {
            let remaining = wanted.map(|w| w.saturating_sub(rows.len()));
            if remaining == Some(0) {
                break;
            }
            let page_limit = remaining
                .map(|r| r.min(self.page_size as usize))
                .unwrap_or(self.page_size as usize);
            let page = self
                .fetch_page(query, rows.len() as u32, page_limit as u32)
                .await?;
            let got = page.rows.len();
            rows.extend(page.rows);
            let exhausted = match page.total {
                Some(total) => rows.len() as u64 >= total,
                None => got < page_limit,
            };
            if got == 0 || exhausted {
                break;
            }
        }
        Ok(rows)
    }
}
