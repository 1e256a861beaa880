// src/config.rs
use std::env;
use std::time::Duration;

/// Runtime configuration for the admin client. Everything has a sensible
/// default so tests and local tools can run with no environment at all;
/// `from_env` overlays `.env` / process variables on top.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portfolio REST backend, without a trailing slash.
    pub api_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Background refresh cadence while outside the admin panel.
    pub poll_interval: Duration,
    /// The profile save is raced against this deadline; the request itself
    /// is not cancelled when it loses.
    pub profile_save_timeout: Duration,
    /// How long a just-saved timeline suppresses re-hydration.
    pub grace_window: Duration,
    /// How long the transient "saved" indicator stays visible.
    pub success_flash: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            request_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(30),
            profile_save_timeout: Duration::from_secs(15),
            grace_window: Duration::from_secs(3),
            success_flash: Duration::from_secs(4),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Config::default();
        if let Ok(url) = env::var("PORTFOLIO_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = read_secs("PORTFOLIO_POLL_SECS") {
            config.poll_interval = secs;
        }
        if let Some(secs) = read_secs("PORTFOLIO_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = secs;
        }
        config
    }
}

fn read_secs(key: &str) -> Option<Duration> {
    env::var(key).ok()?.parse().ok().map(Duration::from_secs)
}
