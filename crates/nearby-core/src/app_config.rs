use std::path::PathBuf;

use crate::geo::Coordinate;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub places_api_key: String,
    pub places_base_url: String,
    pub geolocation_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub location_ttl_ms: i64,
    pub location_timeout_ms: u64,
    pub enrich_batch_size: usize,
    pub enrich_batch_delay_ms: u64,
    /// Fixed position that replaces network geolocation when set.
    pub fixed_location: Option<Coordinate>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("geolocation_url", &self.geolocation_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("location_ttl_ms", &self.location_ttl_ms)
            .field("location_timeout_ms", &self.location_timeout_ms)
            .field("enrich_batch_size", &self.enrich_batch_size)
            .field("enrich_batch_delay_ms", &self.enrich_batch_delay_ms)
            .field("fixed_location", &self.fixed_location)
            .finish()
    }
}
