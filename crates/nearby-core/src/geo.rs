//! Great-circle distance between coordinates.
//!
//! Uses the haversine formula on a spherical Earth. Accurate to well under 1%
//! at the search radii the pipeline works with.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Haversine distance in meters between two coordinates.
#[must_use]
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

/// Distance from `origin` to an optional place coordinate.
///
/// Returns `f64::INFINITY` when the place has no coordinate so that callers
/// always get a defined, sortable value.
#[must_use]
pub fn distance_meters(origin: Coordinate, place: Option<Coordinate>) -> f64 {
    place.map_or(f64::INFINITY, |p| haversine_meters(origin, p))
}
