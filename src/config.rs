use crate::error::Error;
use crate::loggers::common::LogLevel;
use crate::Result;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server origin, without the `/api` prefix.
    pub base_url: String,
    /// Session token; `None` means nobody is logged in.
    pub token: Option<String>,
    pub poll_interval: Duration,
    pub loop_interval: Duration,
    pub reconnect_initial: Duration,
    pub reconnect_max: Duration,
    pub request_timeout: Duration,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            poll_interval: Duration::from_secs(15),
            loop_interval: Duration::from_millis(250),
            reconnect_initial: Duration::from_millis(1000),
            reconnect_max: Duration::from_millis(30_000),
            request_timeout: Duration::from_secs(10),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    pub fn new(base_url: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Config::default()
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// `http` becomes `ws`, `https` becomes `wss`.
    pub fn ws_url(&self) -> String {
        let base = match self.base_url.strip_prefix("http") {
            Some(rest) => format!("ws{}", rest),
            None => self.base_url.clone(),
        };
        format!("{}/api/ws", base)
    }

    pub fn ws_url_with_token(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| format!("{}?token={}", self.ws_url(), urlencoding::encode(t)))
    }
}

/// Reads the configuration from the process environment, after loading `.env`
/// if one exists.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let defaults = Config::default();

    let mut config = Config::new(
        &lookup("FIELDNOTIFY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    );

    if let Some(token) = lookup("FIELDNOTIFY_TOKEN") {
        config = config.with_token(&token);
    }

    config.poll_interval = Duration::from_secs(parse_or(
        &lookup,
        "FIELDNOTIFY_POLL_INTERVAL_SECS",
        defaults.poll_interval.as_secs(),
    )?);
    config.loop_interval = Duration::from_millis(parse_or(
        &lookup,
        "FIELDNOTIFY_LOOP_INTERVAL_MS",
        defaults.loop_interval.as_millis() as u64,
    )?);
    config.reconnect_initial = Duration::from_millis(parse_or(
        &lookup,
        "FIELDNOTIFY_RECONNECT_INITIAL_MS",
        defaults.reconnect_initial.as_millis() as u64,
    )?);
    config.reconnect_max = Duration::from_millis(parse_or(
        &lookup,
        "FIELDNOTIFY_RECONNECT_MAX_MS",
        defaults.reconnect_max.as_millis() as u64,
    )?);

    if let Some(level) = lookup("FIELDNOTIFY_LOG_LEVEL") {
        config.log_level = level.parse()?;
    }

    if config.reconnect_max < config.reconnect_initial {
        return Err(Error::from_config(
            "FIELDNOTIFY_RECONNECT_MAX_MS must not be smaller than FIELDNOTIFY_RECONNECT_INITIAL_MS",
        ));
    }

    Ok(config)
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::from_config(&format!("{} is not a valid number: '{}'", key, raw))),
        None => Ok(default),
    }
}
