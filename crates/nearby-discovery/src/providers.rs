//! Collaborator seams consumed by the pipeline.
//!
//! Each trait has a production implementation here (backed by
//! `nearby-places`) and is object-safe so the pipeline can hold
//! `Arc<dyn _>` and tests can swap in fakes.

use std::time::Duration;

use async_trait::async_trait;
use nearby_core::{Coordinate, LocationError};
use nearby_places::{
    GooglePlacesClient, IpGeolocator, NearbyRequest, PlacesError, RawPlace, RawPlaceDetail,
};

/// Source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn request_position(&self, timeout: Duration) -> Result<Coordinate, LocationError>;
}

/// Nearby search provider.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Zero results must be `Ok(vec![])`, not an error.
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<RawPlace>, PlacesError>;
}

/// Per-place detail provider.
#[async_trait]
pub trait PlaceDetails: Send + Sync {
    async fn get_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<Option<RawPlaceDetail>, PlacesError>;
}

/// Wall clock in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Geolocator that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coordinate: Coordinate,
}

impl FixedGeolocator {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn request_position(&self, _timeout: Duration) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn request_position(&self, timeout: Duration) -> Result<Coordinate, LocationError> {
        self.locate(timeout).await
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<RawPlace>, PlacesError> {
        GooglePlacesClient::nearby_search(self, request).await
    }
}

#[async_trait]
impl PlaceDetails for GooglePlacesClient {
    async fn get_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<Option<RawPlaceDetail>, PlacesError> {
        GooglePlacesClient::get_details(self, place_id, fields).await
    }
}
