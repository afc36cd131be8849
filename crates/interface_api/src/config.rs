//! API configuration

use serde::Deserialize;

/// API configuration, loadable from `CASHBOOK_`-prefixed environment
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level filter
    pub log_level: String,
    /// Hold a per-customer lock across credit check + insert
    pub serialize_credit_checks: bool,
    /// Advice cache time-to-live in seconds
    pub advice_cache_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/cashbook".to_string(),
            log_level: "info".to_string(),
            serialize_credit_checks: false,
            advice_cache_ttl_secs: 600,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CASHBOOK"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
