//! Discovery-to-curation pipeline.
//!
//! Resolves the user's position through a TTL cache, runs a nearby search,
//! normalizes, filters and sorts the results, enriches them with place detail
//! in rate-limited batches, and keeps a persistent set of saved place IDs.

pub mod enrich;
pub mod error;
pub mod location;
pub mod markers;
pub mod pipeline;
pub mod providers;
pub mod rank;
pub mod saved;
pub mod store;

pub use enrich::{DetailEnricher, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
pub use error::{DiscoveryError, StoreError};
pub use location::{LocationCache, LocationCacheEntry, ResolvedLocation, LOCATION_CACHE_KEY};
pub use markers::{map_markers, MapMarker, MAX_MARKERS};
pub use nearby_core::LocationError;
pub use pipeline::{DiscoveryPipeline, SearchPhase, SearchResults, SearchRun};
pub use providers::{Clock, FixedGeolocator, Geolocator, PlaceDetails, PlaceSearch, SystemClock};
pub use rank::filter_and_sort;
pub use saved::{SavedSet, SAVED_PLACES_KEY};
pub use store::{FileStore, KvStore, MemoryStore};

#[cfg(test)]
pub(crate) mod test_support;
