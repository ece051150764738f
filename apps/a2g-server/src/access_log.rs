use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Clone, Debug)]
struct Cfg {
    enabled: bool,
    sample_n: u64,
}

impl Cfg {
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            enabled: lookup("A2G_ACCESS_LOG").as_deref() == Some("1"),
            sample_n: lookup("A2G_ACCESS_SAMPLE_N")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(1)
                .max(1),
        }
    }

    fn sampled(&self, n: u64) -> bool {
        self.sample_n <= 1 || n % self.sample_n == 0
    }
}

static CFG: Lazy<Cfg> = Lazy::new(|| Cfg::from_lookup(|key| std::env::var(key).ok()));

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub async fn access_log_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    if !CFG.enabled {
        return next.run(req).await;
    }
    let started = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let remote = req
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
        .map(|c| c.0.ip().to_string());
    let res = next.run(req).await;
    let n = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    if !CFG.sampled(n) {
        return res;
    }
    let dur_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        target: "http.access",
        ts = %chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        method = method.as_str(),
        path = %path,
        status = res.status().as_u16(),
        dur_ms,
        remote = remote.as_deref().unwrap_or("-"),
        "request"
    );
    res
}
