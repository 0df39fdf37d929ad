//! Position resolution behind a time-bounded cache.

use std::sync::Arc;
use std::time::Duration;

use nearby_core::{Coordinate, LocationError};
use serde::{Deserialize, Serialize};

use crate::providers::{Clock, Geolocator};
use crate::store::KvStore;

pub const LOCATION_CACHE_KEY: &str = "cached_location";
pub const DEFAULT_TTL_MS: i64 = 600_000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Persisted form of the last known position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCacheEntry {
    pub coordinate: Coordinate,
    /// Epoch milliseconds when the position was captured.
    pub captured_at_ms: i64,
}

impl LocationCacheEntry {
    /// An entry is fresh iff `0 <= now - captured_at < ttl`. A capture time
    /// in the future (clock moved backwards) counts as stale.
    #[must_use]
    pub fn is_valid_at(&self, now_ms: i64, ttl_ms: i64) -> bool {
        match now_ms.checked_sub(self.captured_at_ms) {
            Some(age) => age >= 0 && age < ttl_ms,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub from_cache: bool,
}

pub struct LocationCache {
    geolocator: Arc<dyn Geolocator>,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
    timeout: Duration,
}

impl LocationCache {
    #[must_use]
    pub fn new(
        geolocator: Arc<dyn Geolocator>,
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            geolocator,
            store,
            clock,
            ttl_ms: DEFAULT_TTL_MS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a cached position if fresh, otherwise asks the geolocator.
    ///
    /// Cache read and write failures are logged and never fail the call. A
    /// provider failure leaves the existing cache entry untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] when no fresh entry exists and the
    /// geolocator fails or exceeds the configured timeout.
    pub async fn resolve_location(&self) -> Result<ResolvedLocation, LocationError> {
        let now = self.clock.now_ms();
        if let Some(entry) = self.read_entry().await {
            if entry.is_valid_at(now, self.ttl_ms) {
                tracing::debug!(
                    age_ms = now - entry.captured_at_ms,
                    "using cached location"
                );
                return Ok(ResolvedLocation {
                    coordinate: entry.coordinate,
                    from_cache: true,
                });
            }
            tracing::debug!(captured_at_ms = entry.captured_at_ms, "cached location expired");
        }

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let coordinate = tokio::time::timeout(
            self.timeout,
            self.geolocator.request_position(self.timeout),
        )
        .await
        .map_err(|_| LocationError::Timeout { timeout_ms })??;

        let entry = LocationCacheEntry {
            coordinate,
            captured_at_ms: self.clock.now_ms(),
        };
        self.write_entry(&entry).await;

        Ok(ResolvedLocation {
            coordinate,
            from_cache: false,
        })
    }

    async fn read_entry(&self) -> Option<LocationCacheEntry> {
        let bytes = match self.store.get(LOCATION_CACHE_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "location cache read failed; treating as miss");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "cached location is corrupt; treating as miss");
                None
            }
        }
    }

    async fn write_entry(&self, entry: &LocationCacheEntry) {
        let bytes = match serde_json::to_vec(entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode location cache entry");
                return;
            }
        };
        if let Err(e) = self.store.set(LOCATION_CACHE_KEY, &bytes).await {
            tracing::warn!(error = %e, "location cache write failed");
        }
    }
}
