use once_cell::sync::OnceCell;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Target used by the server's access-log middleware.
pub const ACCESS_TARGET: &str = "http.access";

static ACCESS_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Minutely,
    Hourly,
    Daily,
}

impl Rotation {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hourly" => Rotation::Hourly,
            "minutely" => Rotation::Minutely,
            _ => Rotation::Daily,
        }
    }
}

/// Rolling file sink for `http.access` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogSink {
    pub dir: String,
    pub prefix: String,
    pub rotation: Rotation,
}

impl AccessLogSink {
    /// Reads `A2G_ACCESS_LOG_ROLL` and friends; `None` unless rolling is on.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("A2G_ACCESS_LOG_ROLL").as_deref() != Some("1") {
            return None;
        }
        let dir = lookup("A2G_ACCESS_LOG_DIR")
            .or_else(|| lookup("A2G_LOGS_DIR"))
            .unwrap_or_else(|| "logs".to_string());
        let prefix = lookup("A2G_ACCESS_LOG_PREFIX").unwrap_or_else(|| "http-access".into());
        let rotation = Rotation::parse(
            &lookup("A2G_ACCESS_LOG_ROTATION").unwrap_or_else(|| "daily".into()),
        );
        Some(Self {
            dir,
            prefix,
            rotation,
        })
    }
}

/// Install the global subscriber: console output filtered by `RUST_LOG`
/// (default `info`), plus the optional rolling access log. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = AccessLogSink::from_lookup(|key| std::env::var(key).ok());
    install_console(filter, sink);
}

fn install_console(filter: EnvFilter, sink: Option<AccessLogSink>) {
    let fmt_layer = fmt::layer();
    let registry = tracing_subscriber::registry().with(fmt_layer.with_filter(filter));
    let Some(sink) = sink else {
        let _ = registry.try_init();
        return;
    };

    if std::fs::create_dir_all(&sink.dir).is_err() {
        tracing::warn!(directory = %sink.dir, "failed to create access log directory");
    }
    let writer = match sink.rotation {
        Rotation::Hourly => tracing_appender::rolling::hourly(&sink.dir, &sink.prefix),
        Rotation::Minutely => tracing_appender::rolling::minutely(&sink.dir, &sink.prefix),
        Rotation::Daily => tracing_appender::rolling::daily(&sink.dir, &sink.prefix),
    };
    let (nb, guard) = tracing_appender::non_blocking(writer);
    let _ = ACCESS_GUARD.set(guard);
    let targets = Targets::new().with_target(ACCESS_TARGET, tracing::Level::INFO);
    let access_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(nb)
        .with_filter(targets);
    let _ = registry.with(access_layer).try_init();
}
