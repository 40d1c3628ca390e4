use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "FOODMAP_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.base_url, "http://localhost:8080");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 250);
    assert_eq!(cfg.user_agent, "foodmap/0.1 (store-finder)");
    assert_eq!(cfg.price_level_buttons, 4);
    assert_eq!(cfg.unset_price_policy, UnsetPricePolicy::Unbounded);
    assert!(cfg.catalog_file.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("FOODMAP_ENV", "production");
    map.insert("FOODMAP_BASE_URL", "https://food.example.com");
    map.insert("FOODMAP_MAX_RETRIES", "0");
    map.insert("FOODMAP_PRICE_LEVEL_BUTTONS", "3");
    map.insert("FOODMAP_UNSET_PRICE_POLICY", "hide-all");
    map.insert("FOODMAP_CATALOG_FILE", "./config/stores.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.base_url, "https://food.example.com");
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.price_level_buttons, 3);
    assert_eq!(cfg.unset_price_policy, UnsetPricePolicy::HideAll);
    assert_eq!(
        cfg.catalog_file.as_deref(),
        Some(std::path::Path::new("./config/stores.yaml"))
    );
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("FOODMAP_BASE_URL", "ftp://food.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODMAP_BASE_URL"),
        "expected InvalidEnvVar(FOODMAP_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    for raw in ["not-a-number", "0"] {
        let mut map = HashMap::new();
        map.insert("FOODMAP_REQUEST_TIMEOUT_SECS", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODMAP_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_rejects_zero_price_buttons() {
    let mut map = HashMap::new();
    map.insert("FOODMAP_PRICE_LEVEL_BUTTONS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODMAP_PRICE_LEVEL_BUTTONS"),
        "expected InvalidEnvVar(FOODMAP_PRICE_LEVEL_BUTTONS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_price_policy() {
    let mut map = HashMap::new();
    map.insert("FOODMAP_UNSET_PRICE_POLICY", "nan");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FOODMAP_UNSET_PRICE_POLICY"),
        "expected InvalidEnvVar(FOODMAP_UNSET_PRICE_POLICY), got: {result:?}"
    );
}

#[test]
fn blank_catalog_file_is_ignored() {
    let mut map = HashMap::new();
    map.insert("FOODMAP_CATALOG_FILE", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.catalog_file.is_none());
}
