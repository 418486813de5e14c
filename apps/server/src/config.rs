use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use kantor_rates::provider::nbp::DEFAULT_BASE_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub rates_base_url: String,
    pub rates_timeout: Duration,
    /// Zero disables rate caching.
    pub rates_cache_ttl: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env_or(key, default);
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {key}: '{raw}'"))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = parse_env("KANTOR_LISTEN_ADDR", "0.0.0.0:8080")?;
        let db_path = env_or("KANTOR_DB_PATH", "./db/app.db");
        let cors_allow = env_or("KANTOR_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("KANTOR_REQUEST_TIMEOUT_MS", "30000")?;
        let rates_base_url = env_or("KANTOR_RATES_BASE_URL", DEFAULT_BASE_URL);
        let rates_timeout_ms: u64 = parse_env("KANTOR_RATES_TIMEOUT_MS", "10000")?;
        let rates_cache_ttl_secs: u64 = parse_env("KANTOR_RATES_CACHE_TTL_SECS", "30")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            rates_base_url,
            rates_timeout: Duration::from_millis(rates_timeout_ms),
            rates_cache_ttl: Duration::from_secs(rates_cache_ttl_secs),
        })
    }
}
