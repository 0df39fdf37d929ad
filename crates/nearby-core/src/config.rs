use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;
use crate::geo::Coordinate;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let places_api_key = require("NEARBY_PLACES_API_KEY")?;
    if places_api_key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_PLACES_API_KEY".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("NEARBY_ENV", "development"))?;
    let log_level = or_default("NEARBY_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("NEARBY_DATA_DIR", "./.nearby"));
    let places_base_url = or_default(
        "NEARBY_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place/",
    );
    let geolocation_url = or_default("NEARBY_GEOLOCATION_URL", "http://ip-api.com/json/");

    let request_timeout_secs = parse_var(&lookup, "NEARBY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEARBY_USER_AGENT", "nearby/0.1 (place-discovery)");
    let location_ttl_ms = parse_var(&lookup, "NEARBY_LOCATION_TTL_MS", "600000")?;
    let location_timeout_ms = parse_var(&lookup, "NEARBY_LOCATION_TIMEOUT_MS", "10000")?;
    let enrich_batch_size: usize = parse_var(&lookup, "NEARBY_ENRICH_BATCH_SIZE", "3")?;
    if enrich_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_ENRICH_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let enrich_batch_delay_ms = parse_var(&lookup, "NEARBY_ENRICH_BATCH_DELAY_MS", "200")?;
    let fixed_location = parse_fixed_location(&lookup)?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        places_api_key,
        places_base_url,
        geolocation_url,
        request_timeout_secs,
        user_agent,
        location_ttl_ms,
        location_timeout_ms,
        enrich_batch_size,
        enrich_batch_delay_ms,
        fixed_location,
    })
}

fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// `NEARBY_LATITUDE` and `NEARBY_LONGITUDE` must be set together.
fn parse_fixed_location<F>(lookup: &F) -> Result<Option<Coordinate>, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    match (lookup("NEARBY_LATITUDE").ok(), lookup("NEARBY_LONGITUDE").ok()) {
        (None, None) => Ok(None),
        (Some(_), Some(_)) => {
            let lat: f64 = parse_var(lookup, "NEARBY_LATITUDE", "")?;
            let lng: f64 = parse_var(lookup, "NEARBY_LONGITUDE", "")?;
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "NEARBY_LATITUDE".to_string(),
                    reason: format!("{lat} is outside -90..=90"),
                });
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "NEARBY_LONGITUDE".to_string(),
                    reason: format!("{lng} is outside -180..=180"),
                });
            }
            Ok(Some(Coordinate::new(lat, lng)))
        }
        (Some(_), None) => Err(ConfigError::MissingEnvVar("NEARBY_LONGITUDE".to_string())),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar("NEARBY_LATITUDE".to_string())),
    }
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
