use std::time::Duration;

// Config is the one place runtime settings are read from the environment.
// Everything downstream gets typed values instead of raw strings.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: Option<String>,
    pub query_timeout: Duration,
    pub revalidate: Duration,
    pub migrate_on_startup: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is missing"))?;

        // unset -> default address; explicit "off" -> no HTTP listener
        let listen_addr = match env_or_fallback("JOBBOARD_LISTEN_ADDR", "LISTEN_ADDR") {
            Some(v) => normalize_optional_addr(&v),
            None => Some("0.0.0.0:3000".to_string()),
        };

        let query_timeout_ms: u64 = std::env::var("JOBBOARD_QUERY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3_000);

        let revalidate_secs: u64 = env_or_fallback("JOBBOARD_REVALIDATE_SECS", "REVALIDATE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3_600);

        let migrate_on_startup = env_bool("JOBBOARD_MIGRATE_ON_STARTUP").unwrap_or(false);

        Ok(Self {
            database_url,
            listen_addr,
            query_timeout: Duration::from_millis(query_timeout_ms.max(1)),
            revalidate: Duration::from_secs(revalidate_secs),
            migrate_on_startup,
        })
    }
}

pub(crate) fn env_or_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var(fallback).ok().filter(|s| !s.trim().is_empty()))
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_optional_addr(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if matches!(v.to_lowercase().as_str(), "0" | "off" | "false" | "none") {
        return None;
    }
    Some(v.to_string())
}
