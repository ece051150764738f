use std::time::Duration;

use serde::Serialize;
use url::Url;

pub const ENV_SUPABASE_URL: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";
pub const ENV_SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";

const DEFAULT_LAUNCH_API_BASE: &str = "https://ll.thespacedevs.com/2.2.0";
const DEFAULT_LISTING_TTL_SECS: u64 = 60;
const DEFAULT_UPCOMING_TTL_SECS: u64 = 30;
const DEFAULT_CACHE_CAPACITY: u64 = 256;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} is not a non-negative integer")]
    InvalidNumber { key: &'static str, value: String },
    #[error("invalid {key}: {value:?} ({reason})")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the aggregation layer reads from the environment.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub launches: LaunchApiConfig,
    pub store: StoreConfig,
    pub client: ClientConfig,
}

impl SourcesConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_raw =
            get("A2G_LAUNCH_API_BASE").unwrap_or_else(|| DEFAULT_LAUNCH_API_BASE.to_string());
        let base_url = parse_base_url("A2G_LAUNCH_API_BASE", &base_raw)?;

        let launches = LaunchApiConfig {
            base_url,
            listing_ttl: Duration::from_secs(
                number(&get, "A2G_LAUNCH_CACHE_TTL_SECS", DEFAULT_LISTING_TTL_SECS)?.max(1),
            ),
            upcoming_ttl: Duration::from_secs(
                number(&get, "A2G_UPCOMING_CACHE_TTL_SECS", DEFAULT_UPCOMING_TTL_SECS)?.max(1),
            ),
            cache_capacity: number(&get, "A2G_LAUNCH_CACHE_CAP", DEFAULT_CACHE_CAPACITY)?,
        };

        let store = StoreConfig {
            url: get(ENV_SUPABASE_URL),
            anon_key: get(ENV_SUPABASE_ANON_KEY),
            service_role_key: get(ENV_SUPABASE_SERVICE_ROLE_KEY),
        };

        let client = ClientConfig {
            timeout: Duration::from_secs(
                number(&get, "A2G_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?.max(1),
            ),
            connect_timeout: Duration::from_secs(
                number(
                    &get,
                    "A2G_HTTP_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?
                .max(1),
            ),
        };

        Ok(Self {
            launches,
            store,
            client,
        })
    }
}

fn number<G>(get: &G, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key,
            value: raw.to_string(),
            reason: "scheme must be http or https".into(),
        });
    }
    Ok(url)
}

/// Third-party launch provider settings.
#[derive(Debug, Clone)]
pub struct LaunchApiConfig {
    pub base_url: Url,
    pub listing_ttl: Duration,
    pub upcoming_ttl: Duration,
    pub cache_capacity: u64,
}

impl LaunchApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            listing_ttl: Duration::from_secs(DEFAULT_LISTING_TTL_SECS),
            upcoming_ttl: Duration::from_secs(DEFAULT_UPCOMING_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Base URL rendered without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

/// Relational store credentials. Only the URL and the service-role key are
/// required to talk to the store; the anon key is reported, never used here.
#[derive(Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
}

impl StoreConfig {
    pub fn presence(&self) -> CredentialPresence {
        CredentialPresence {
            supabase_url: self.url.is_some(),
            supabase_anon_key: self.anon_key.is_some(),
            supabase_service_role_key: self.service_role_key.is_some(),
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Which credentials were supplied, without their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialPresence {
    pub supabase_url: bool,
    pub supabase_anon_key: bool,
    pub supabase_service_role_key: bool,
}

/// Outbound HTTP client tunables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}
