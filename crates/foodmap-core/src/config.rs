use crate::app_config::{AppConfig, Environment};
use crate::filter::UnsetPricePolicy;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can feed a `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("FOODMAP_ENV", "development"))?;

    let base_url = or_default("FOODMAP_BASE_URL", "http://localhost:8080");
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "FOODMAP_BASE_URL",
            format!("'{base_url}' must start with http:// or https://"),
        ));
    }

    let log_level = or_default("FOODMAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("FOODMAP_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "FOODMAP_REQUEST_TIMEOUT_SECS",
            "timeout must be at least one second".to_string(),
        ));
    }
    let max_retries = parse_u32("FOODMAP_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("FOODMAP_RETRY_BACKOFF_BASE_MS", "250")?;
    let user_agent = or_default("FOODMAP_USER_AGENT", "foodmap/0.1 (store-finder)");

    let price_level_buttons = parse_usize("FOODMAP_PRICE_LEVEL_BUTTONS", "4")?;
    if price_level_buttons == 0 {
        return Err(invalid(
            "FOODMAP_PRICE_LEVEL_BUTTONS",
            "at least one price button is required".to_string(),
        ));
    }
    let unset_price_policy =
        parse_unset_price_policy(&or_default("FOODMAP_UNSET_PRICE_POLICY", "unbounded"))?;

    let catalog_file = lookup("FOODMAP_CATALOG_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        base_url,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        user_agent,
        price_level_buttons,
        unset_price_policy,
        catalog_file,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FOODMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parses the policy applied when no price button is selected.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `unbounded` or `hide-all`.
pub fn parse_unset_price_policy(s: &str) -> Result<UnsetPricePolicy, ConfigError> {
    match s {
        "unbounded" => Ok(UnsetPricePolicy::Unbounded),
        "hide-all" => Ok(UnsetPricePolicy::HideAll),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FOODMAP_UNSET_PRICE_POLICY".to_string(),
            reason: format!("expected 'unbounded' or 'hide-all', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
