use std::path::PathBuf;

use crate::filter::UnsetPricePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Root of the store data source; `/api/stores` and `/api/types` are
    /// resolved against it.
    pub base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
    pub price_level_buttons: usize,
    pub unset_price_policy: UnsetPricePolicy,
    /// When set, the catalog is read from this YAML file instead of HTTP.
    pub catalog_file: Option<PathBuf>,
}
