//! Launch schedule data relayed from the third-party provider.

mod adapter;

pub use adapter::LaunchAdapter;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_UPCOMING_LIMIT: u32 = 5;
/// Provider page cap.
pub const MAX_LIMIT: u32 = 100;

/// Typed view of a record's `status` object. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LaunchStatus {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbrev: Option<String>,
}

/// One launch as published by the provider.
///
/// The object is held exactly as received and serialized back unchanged;
/// the accessors read the fields the dashboard cares about and return
/// `None` when a field is missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchRecord(Map<String, Value>);

impl LaunchRecord {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn net(&self) -> Option<&str> {
        self.str_field("net")
    }

    pub fn status(&self) -> Option<LaunchStatus> {
        self.0
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for LaunchRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One page of launches. `count` is the provider's total across all pages.
/// Top-level keys beyond the pagination envelope are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchCollection {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<LaunchRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing filter for the general launch collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaunchFilter {
    pub limit: u32,
    pub offset: u32,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl Default for LaunchFilter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            status: None,
            search: None,
        }
    }
}

impl LaunchFilter {
    /// Builds a filter from loosely-typed request parameters. Missing or
    /// unparseable numbers fall back to their defaults; blank strings are
    /// dropped.
    pub fn from_params(
        limit: Option<&str>,
        offset: Option<&str>,
        status: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            limit: clamp_limit(parse_u32(limit).unwrap_or(DEFAULT_LIMIT)),
            offset: parse_u32(offset).unwrap_or(0),
            status: non_blank(status),
            search: non_blank(search),
        }
        .normalized()
    }

    pub fn normalized(mut self) -> Self {
        self.limit = clamp_limit(self.limit);
        self.status = non_blank(self.status.as_deref());
        self.search = non_blank(self.search.as_deref());
        self
    }

    /// Resolved collection URL; doubles as the cache key.
    pub fn request_url(&self, base: &str) -> String {
        let mut url = format!(
            "{base}/launch/?limit={}&offset={}",
            self.limit, self.offset
        );
        if let Some(status) = &self.status {
            url.push_str("&status=");
            url.push_str(&urlencoding::encode(status));
        }
        if let Some(search) = &self.search {
            url.push_str("&search=");
            url.push_str(&urlencoding::encode(search));
        }
        url
    }
}

/// Resolved upcoming-launches URL for `limit` (already clamped by callers).
pub fn upcoming_url(base: &str, limit: u32) -> String {
    format!("{base}/launch/upcoming/?limit={}", clamp_limit(limit))
}

pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

pub(crate) fn parse_u32(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
