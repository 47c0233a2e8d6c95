// src/config.rs

use std::env;
use std::str::FromStr;

/// How collection fetches are paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleMode {
    /// Always wait `inter_fetch_delay_ms`
    Fixed,
    /// Start at `inter_fetch_delay_ms`, double per consecutive failure up to
    /// `max_backoff_ms`
    Adaptive,
}

impl FromStr for ThrottleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(ThrottleMode::Fixed),
            "adaptive" => Ok(ThrottleMode::Adaptive),
            other => Err(format!("unknown throttle mode '{}'", other)),
        }
    }
}

/// Runtime configuration, loaded from `MUSEUM_*` environment variables.
#[derive(Debug, Clone)]
pub struct MuseumConfig {
    /// Code-forge API root
    pub api_base_url: String,
    /// Records requested per account (one page only)
    pub page_size: u32,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Pause between consecutive fetches in collection mode
    pub inter_fetch_delay_ms: u64,
    pub throttle: ThrottleMode,
    /// Upper bound for adaptive backoff
    pub max_backoff_ms: u64,
    /// Top-N kept when browsing a collection
    pub collection_result_bound: usize,
    /// Threshold a fresh session starts with
    pub default_threshold_months: u32,
    pub user_agent: String,
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            page_size: 100,
            request_timeout_secs: 30,
            inter_fetch_delay_ms: 200,
            throttle: ThrottleMode::Fixed,
            max_backoff_ms: 5_000,
            collection_result_bound: 12,
            default_threshold_months: 6,
            user_agent: concat!("repomuseum/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl MuseumConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            api_base_url: env::var("MUSEUM_API_BASE_URL").unwrap_or(defaults.api_base_url),
            page_size: parse_var("MUSEUM_PAGE_SIZE", defaults.page_size)?,
            request_timeout_secs: parse_var(
                "MUSEUM_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            inter_fetch_delay_ms: parse_var(
                "MUSEUM_INTER_FETCH_DELAY_MS",
                defaults.inter_fetch_delay_ms,
            )?,
            throttle: parse_var("MUSEUM_THROTTLE", defaults.throttle)?,
            max_backoff_ms: parse_var("MUSEUM_MAX_BACKOFF_MS", defaults.max_backoff_ms)?,
            collection_result_bound: parse_var(
                "MUSEUM_COLLECTION_RESULT_BOUND",
                defaults.collection_result_bound,
            )?,
            default_threshold_months: parse_var(
                "MUSEUM_DEFAULT_THRESHOLD_MONTHS",
                defaults.default_threshold_months,
            )?,
            user_agent: env::var("MUSEUM_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue("MUSEUM_PAGE_SIZE"));
        }
        if self.collection_result_bound == 0 {
            return Err(ConfigError::InvalidValue("MUSEUM_COLLECTION_RESULT_BOUND"));
        }
        if self.default_threshold_months == 0 {
            return Err(ConfigError::InvalidValue("MUSEUM_DEFAULT_THRESHOLD_MONTHS"));
        }
        if self.throttle == ThrottleMode::Adaptive
            && self.max_backoff_ms < self.inter_fetch_delay_ms
        {
            return Err(ConfigError::InvalidValue("MUSEUM_MAX_BACKOFF_MS"));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
