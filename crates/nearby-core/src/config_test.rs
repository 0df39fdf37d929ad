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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("NEARBY_PLACES_API_KEY", "test-key");
    m
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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "NEARBY_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEARBY_PLACES_API_KEY"),
        "expected MissingEnvVar(NEARBY_PLACES_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_api_key() {
    let mut map = full_env();
    map.insert("NEARBY_PLACES_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_PLACES_API_KEY"));
}

#[test]
fn build_app_config_applies_defaults() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, PathBuf::from("./.nearby"));
    assert_eq!(
        cfg.places_base_url,
        "https://maps.googleapis.com/maps/api/place/"
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "nearby/0.1 (place-discovery)");
    assert_eq!(cfg.location_ttl_ms, 600_000);
    assert_eq!(cfg.location_timeout_ms, 10_000);
    assert_eq!(cfg.enrich_batch_size, 3);
    assert_eq!(cfg.enrich_batch_delay_ms, 200);
    assert!(cfg.fixed_location.is_none());
}

#[test]
fn enrich_batch_delay_override() {
    let mut map = full_env();
    map.insert("NEARBY_ENRICH_BATCH_DELAY_MS", "500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.enrich_batch_delay_ms, 500);
}

#[test]
fn enrich_batch_size_invalid() {
    let mut map = full_env();
    map.insert("NEARBY_ENRICH_BATCH_SIZE", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_ENRICH_BATCH_SIZE"),
        "expected InvalidEnvVar(NEARBY_ENRICH_BATCH_SIZE), got: {result:?}"
    );
}

#[test]
fn enrich_batch_size_zero_is_rejected() {
    let mut map = full_env();
    map.insert("NEARBY_ENRICH_BATCH_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_ENRICH_BATCH_SIZE"));
}

#[test]
fn location_ttl_invalid() {
    let mut map = full_env();
    map.insert("NEARBY_LOCATION_TTL_MS", "ten minutes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_LOCATION_TTL_MS"));
}

#[test]
fn fixed_location_requires_both_coordinates() {
    let mut map = full_env();
    map.insert("NEARBY_LATITUDE", "47.6");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEARBY_LONGITUDE"),
        "got: {result:?}"
    );
}

#[test]
fn fixed_location_parses_pair() {
    let mut map = full_env();
    map.insert("NEARBY_LATITUDE", "47.6062");
    map.insert("NEARBY_LONGITUDE", "-122.3321");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fixed_location, Some(Coordinate::new(47.6062, -122.3321)));
}

#[test]
fn fixed_location_rejects_out_of_range_latitude() {
    let mut map = full_env();
    map.insert("NEARBY_LATITUDE", "91");
    map.insert("NEARBY_LONGITUDE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_LATITUDE"));
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = full_env();
    map.insert("NEARBY_PLACES_API_KEY", "super-secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-key"));
    assert!(rendered.contains("[redacted]"));
}
