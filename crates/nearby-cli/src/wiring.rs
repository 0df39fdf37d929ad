//! Builds the discovery pipeline from configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use nearby_core::AppConfig;
use nearby_discovery::{
    DetailEnricher, DiscoveryPipeline, FileStore, FixedGeolocator, Geolocator, KvStore,
    LocationCache, SavedSet, SystemClock,
};
use nearby_places::{GooglePlacesClient, IpGeolocator};

/// Real providers, a JSON-file store under `data_dir`, and the configured
/// cache and batching parameters.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be constructed or the Places
/// base URL is invalid.
pub(crate) fn build_pipeline(config: &AppConfig) -> anyhow::Result<DiscoveryPipeline> {
    let places = Arc::new(
        GooglePlacesClient::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )
        .context("failed to build Places client")?,
    );

    let geolocator: Arc<dyn Geolocator> = match config.fixed_location {
        Some(coordinate) => {
            tracing::info!(%coordinate, "using fixed location from configuration");
            Arc::new(FixedGeolocator::new(coordinate))
        }
        None => Arc::new(
            IpGeolocator::new(&config.geolocation_url, &config.user_agent)
                .context("failed to build geolocation client")?,
        ),
    };

    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(&config.data_dir));
    let location = LocationCache::new(geolocator, store.clone(), Arc::new(SystemClock))
        .with_ttl_ms(config.location_ttl_ms)
        .with_timeout(Duration::from_millis(config.location_timeout_ms));
    let enricher = DetailEnricher::with_batching(
        places.clone(),
        config.enrich_batch_size,
        Duration::from_millis(config.enrich_batch_delay_ms),
    );

    Ok(DiscoveryPipeline::new(
        location,
        places,
        enricher,
        SavedSet::new(store),
    ))
}
