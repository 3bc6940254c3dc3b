//! Environment-driven configuration

use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::models::ledger::DEFAULT_CASHBACK_RATE_BPS;

pub const DEFAULT_API_ENDPOINT: &str = "https://toncenter.com/api/v2";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONTRACT_ADDRESS: &str = "EQExample...";

/// Settings for the HTTP balance provider
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

/// Full tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub api: ApiConfig,
    pub poll_interval: Duration,
    pub wallet_address: Option<String>,
    pub wallet_name: String,
    pub contract_address: String,
    pub cashback_rate_bps: u32,
    pub log_level: LevelFilter,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            wallet_address: None,
            wallet_name: "Local".to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            cashback_rate_bps: DEFAULT_CASHBACK_RATE_BPS,
            log_level: LevelFilter::INFO,
        }
    }
}

impl TrackerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = non_empty("TON_API_ENDPOINT")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api.endpoint);

        let request_timeout = non_empty("REQUEST_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.api.request_timeout);

        let poll_interval = non_empty("POLL_INTERVAL_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        Self {
            api: ApiConfig {
                endpoint,
                api_key: non_empty("TON_API_KEY"),
                request_timeout,
            },
            poll_interval,
            wallet_address: non_empty("WALLET_ADDRESS"),
            wallet_name: non_empty("WALLET_NAME").unwrap_or(defaults.wallet_name),
            contract_address: non_empty("CONTRACT_ADDRESS").unwrap_or(defaults.contract_address),
            cashback_rate_bps: non_empty("CASHBACK_RATE_BPS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cashback_rate_bps),
            log_level: non_empty("LOG_LEVEL")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}
