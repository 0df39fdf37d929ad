pub mod app_config;
pub mod config;
pub mod criteria;
pub mod error;
pub mod geo;
pub mod place;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{SearchCriteria, SortKey};
pub use error::{ConfigError, LocationError};
pub use geo::{distance_meters, haversine_meters, Coordinate, EARTH_RADIUS_METERS};
pub use place::{DetailedPlace, NormalizedPlace, Rating, Review};
