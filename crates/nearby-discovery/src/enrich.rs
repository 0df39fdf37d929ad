//! Rate-limited detail enrichment.
//!
//! Places are fetched in fixed-size batches. Requests inside a batch run
//! concurrently; consecutive batches are separated by a fixed delay so the
//! provider never sees more than `batch_size` detail requests at once.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use nearby_core::{Coordinate, DetailedPlace, NormalizedPlace};
use nearby_places::{detail_additions, normalize_detail, ENRICH_FIELDS, REHYDRATE_FIELDS};
use tokio_util::sync::CancellationToken;

use crate::providers::PlaceDetails;

pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(200);

pub struct DetailEnricher {
    details: Arc<dyn PlaceDetails>,
    batch_size: usize,
    batch_delay: Duration,
}

impl DetailEnricher {
    #[must_use]
    pub fn new(details: Arc<dyn PlaceDetails>) -> Self {
        Self::with_batching(details, DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY)
    }

    /// A `batch_size` of zero is treated as one.
    #[must_use]
    pub fn with_batching(
        details: Arc<dyn PlaceDetails>,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self {
            details,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Attaches reviews and the canonical URL to every place.
    ///
    /// Output has the same length and order as `items`. A place whose
    /// detail fetch fails keeps its base fields with empty additions.
    pub async fn enrich(&self, items: Vec<NormalizedPlace>) -> Vec<DetailedPlace> {
        self.enrich_until(items, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// Like [`Self::enrich`], but gives up with `None` once `cancel` fires.
    ///
    /// Cancellation is observed between batches and during the inter-batch
    /// delay; an in-flight batch is allowed to finish.
    pub async fn enrich_until(
        &self,
        items: Vec<NormalizedPlace>,
        cancel: &CancellationToken,
    ) -> Option<Vec<DetailedPlace>> {
        let total = items.len();
        let out = self
            .in_batches(items, cancel, |place| self.enrich_one(place))
            .await?;
        let with_detail = out
            .iter()
            .filter(|p| p.external_url.is_some() || !p.reviews.is_empty())
            .count();
        tracing::info!(total, with_detail, "enrichment complete");
        Some(out)
    }

    /// Rebuilds full places from bare IDs, e.g. for the saved list.
    ///
    /// IDs whose detail cannot be fetched come back as
    /// [`DetailedPlace::placeholder`]. Distances are measured from `origin`
    /// when one is known.
    pub async fn rehydrate(
        &self,
        ids: Vec<String>,
        origin: Option<Coordinate>,
    ) -> Vec<DetailedPlace> {
        self.in_batches(ids, &CancellationToken::new(), |id| self.rehydrate_one(id, origin))
            .await
            .unwrap_or_default()
    }

    async fn in_batches<T, O, F, Fut>(
        &self,
        items: Vec<T>,
        cancel: &CancellationToken,
        mut fetch: F,
    ) -> Option<Vec<O>>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = O>,
    {
        let mut out = Vec::with_capacity(items.len());
        let mut pending = items.into_iter().peekable();
        let mut batch_index = 0usize;

        while pending.peek().is_some() {
            if batch_index > 0 {
                tokio::select! {
                    () = cancel.cancelled() => return None,
                    () = tokio::time::sleep(self.batch_delay) => {}
                }
            }
            if cancel.is_cancelled() {
                return None;
            }

            let batch: Vec<T> = pending.by_ref().take(self.batch_size).collect();
            tracing::debug!(batch = batch_index, size = batch.len(), "fetching detail batch");
            out.extend(join_all(batch.into_iter().map(&mut fetch)).await);
            batch_index += 1;
        }

        if cancel.is_cancelled() {
            return None;
        }
        Some(out)
    }

    async fn enrich_one(&self, place: NormalizedPlace) -> DetailedPlace {
        match self.details.get_details(&place.id, ENRICH_FIELDS).await {
            Ok(Some(detail)) => {
                let additions = detail_additions(detail);
                DetailedPlace {
                    place,
                    reviews: additions.reviews,
                    external_url: additions.external_url,
                }
            }
            Ok(None) => {
                tracing::debug!(place_id = %place.id, "no detail record for place");
                DetailedPlace::without_detail(place)
            }
            Err(e) => {
                tracing::warn!(place_id = %place.id, error = %e, "detail fetch failed; keeping base fields");
                DetailedPlace::without_detail(place)
            }
        }
    }

    async fn rehydrate_one(&self, id: String, origin: Option<Coordinate>) -> DetailedPlace {
        match self.details.get_details(&id, REHYDRATE_FIELDS).await {
            Ok(Some(detail)) => {
                let place = normalize_detail(&id, &detail, origin);
                let additions = detail_additions(detail);
                DetailedPlace {
                    place,
                    reviews: additions.reviews,
                    external_url: additions.external_url,
                }
            }
            Ok(None) => {
                tracing::debug!(place_id = %id, "saved place no longer known to provider");
                DetailedPlace::placeholder(&id)
            }
            Err(e) => {
                tracing::warn!(place_id = %id, error = %e, "could not rehydrate saved place");
                DetailedPlace::placeholder(&id)
            }
        }
    }
}
