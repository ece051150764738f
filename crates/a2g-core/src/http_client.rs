use crate::config::ClientConfig;

fn user_agent() -> String {
    format!("a2g-command-center/{}", env!("CARGO_PKG_VERSION"))
}

/// Base client builder with harmonized defaults.
pub fn builder(cfg: &ClientConfig) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(user_agent())
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.timeout)
        .pool_idle_timeout(std::time::Duration::from_secs(90))
}

/// Build a client; failure here means the TLS backend could not initialise.
pub fn client(cfg: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    builder(cfg).build()
}
