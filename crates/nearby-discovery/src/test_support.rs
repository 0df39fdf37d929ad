//! Fakes shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nearby_core::{Coordinate, LocationError, NormalizedPlace, Rating};
use nearby_places::{NearbyRequest, PlacesError, RawPlace, RawPlaceDetail, RawReview};
use tokio::time::Instant;

use crate::providers::{Clock, Geolocator, PlaceDetails, PlaceSearch};

pub(crate) struct ManualClock(AtomicI64);

impl ManualClock {
    pub(crate) fn at(now_ms: i64) -> Self {
        Self(AtomicI64::new(now_ms))
    }

    pub(crate) fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Geolocator returning a fixed result, optionally after a delay.
pub(crate) struct FakeGeolocator {
    result: Result<Coordinate, LocationError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeGeolocator {
    pub(crate) fn ok(coordinate: Coordinate) -> Self {
        Self::with_result(Ok(coordinate))
    }

    pub(crate) fn with_result(result: Result<Coordinate, LocationError>) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geolocator for FakeGeolocator {
    async fn request_position(&self, _timeout: Duration) -> Result<Coordinate, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Search provider answering with a fixed page or a provider status error.
pub(crate) struct FakeSearch {
    places: Vec<serde_json::Value>,
    status_error: Option<String>,
    delay: Duration,
    requests: Mutex<Vec<NearbyRequest>>,
}

impl FakeSearch {
    pub(crate) fn returning(places: Vec<serde_json::Value>) -> Self {
        Self {
            places,
            status_error: None,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(status: &str) -> Self {
        let mut fake = Self::returning(Vec::new());
        fake.status_error = Some(status.to_owned());
        fake
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn requests(&self) -> Vec<NearbyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for FakeSearch {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<RawPlace>, PlacesError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(status) = &self.status_error {
            return Err(PlacesError::Status {
                status: status.clone(),
                message: String::new(),
            });
        }
        Ok(self
            .places
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap())
            .collect())
    }
}

/// Detail provider that records every call with its start instant.
///
/// IDs listed in `failing` return a provider error; IDs listed in `missing`
/// return `Ok(None)`; everything else gets one review and a URL.
#[derive(Default)]
pub(crate) struct FakeDetails {
    failing: Vec<String>,
    missing: Vec<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    pub(crate) calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
}

impl FakeDetails {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_for(mut self, id: &str) -> Self {
        self.failing.push(id.to_owned());
        self
    }

    pub(crate) fn missing_for(mut self, id: &str) -> Self {
        self.missing.push(id.to_owned());
        self
    }

    pub(crate) fn delay_for(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_owned(), delay);
        self
    }

    pub(crate) fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub(crate) fn call_ids(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Groups recorded calls by identical start instant, in call order.
    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        let calls = self.calls.lock().unwrap();
        let mut sizes: Vec<(Instant, usize)> = Vec::new();
        for (_, at) in calls.iter() {
            match sizes.last_mut() {
                Some((last, n)) if last == at => *n += 1,
                _ => sizes.push((*at, 1)),
            }
        }
        sizes.into_iter().map(|(_, n)| n).collect()
    }

    pub(crate) fn batch_starts(&self) -> Vec<Instant> {
        let calls = self.calls.lock().unwrap();
        let mut starts: Vec<Instant> = calls.iter().map(|(_, at)| *at).collect();
        starts.dedup();
        starts
    }
}

#[async_trait]
impl PlaceDetails for FakeDetails {
    async fn get_details(
        &self,
        place_id: &str,
        _fields: &[&str],
    ) -> Result<Option<RawPlaceDetail>, PlacesError> {
        self.calls
            .lock()
            .unwrap()
            .push((place_id.to_owned(), Instant::now()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(place_id)
            .copied()
            .unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.iter().any(|id| id == place_id) {
            return Err(PlacesError::Status {
                status: "UNKNOWN_ERROR".to_owned(),
                message: format!("detail for {place_id} failed"),
            });
        }
        if self.missing.iter().any(|id| id == place_id) {
            return Ok(None);
        }
        Ok(Some(RawPlaceDetail {
            place_id: Some(place_id.to_owned()),
            name: Some(format!("Detail {place_id}")),
            rating: Some(4.0),
            url: Some(format!("https://maps.example/{place_id}")),
            reviews: vec![RawReview {
                author_name: Some("Reviewer".to_owned()),
                rating: Some(5.0),
                text: Some(format!("Loved {place_id}")),
            }],
            ..RawPlaceDetail::default()
        }))
    }
}

pub(crate) fn place(id: &str, rating: Option<f64>, distance_meters: f64) -> NormalizedPlace {
    NormalizedPlace {
        id: id.to_owned(),
        name: id.to_owned(),
        rating: Rating::from(rating),
        rating_count: 0,
        photo_ref: None,
        coordinate: None,
        vicinity: String::new(),
        distance_meters,
    }
}

pub(crate) fn places(ids: &[&str]) -> Vec<NormalizedPlace> {
    ids.iter().map(|id| place(id, Some(4.0), 100.0)).collect()
}
