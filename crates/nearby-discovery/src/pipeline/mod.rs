//! Search orchestration and the presentation-facing contract.

mod run;

use std::collections::HashMap;
use std::sync::Arc;

use nearby_core::{Coordinate, DetailedPlace, SearchCriteria};
use nearby_places::{normalize_all, NearbyRequest};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub use run::{SearchPhase, SearchRun};

use crate::enrich::DetailEnricher;
use crate::error::DiscoveryError;
use crate::location::LocationCache;
use crate::providers::PlaceSearch;
use crate::rank::filter_and_sort;
use crate::saved::SavedSet;

/// Outcome of a successful [`DiscoveryPipeline::run_search`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub places: Vec<DetailedPlace>,
    pub origin: Coordinate,
    pub location_from_cache: bool,
    pub generation: u64,
    pub phases: Vec<SearchPhase>,
}

/// Mutable state shared across runs. Only the newest generation publishes.
#[derive(Debug, Default)]
struct Session {
    generation: u64,
    cancel: CancellationToken,
    origin: Option<Coordinate>,
    latest: Vec<DetailedPlace>,
}

pub struct DiscoveryPipeline {
    location: LocationCache,
    search: Arc<dyn PlaceSearch>,
    enricher: DetailEnricher,
    saved: SavedSet,
    session: Mutex<Session>,
}

impl DiscoveryPipeline {
    #[must_use]
    pub fn new(
        location: LocationCache,
        search: Arc<dyn PlaceSearch>,
        enricher: DetailEnricher,
        saved: SavedSet,
    ) -> Self {
        Self {
            location,
            search,
            enricher,
            saved,
            session: Mutex::new(Session::default()),
        }
    }

    /// Locates the user, searches, filters and sorts, then enriches.
    ///
    /// Starting a run cancels any run still in flight; the older run returns
    /// [`DiscoveryError::Superseded`] at its next checkpoint and never
    /// replaces the latest results.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Location`] or [`DiscoveryError::Search`] on
    /// the first hard failure, or [`DiscoveryError::Superseded`] if a newer
    /// run started. Detail failures never fail the run.
    pub async fn run_search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<SearchResults, DiscoveryError> {
        let (generation, cancel) = self.begin_run().await;
        let mut run = SearchRun::new(generation);

        match self.execute(criteria, &mut run, &cancel).await {
            Ok(results) => Ok(results),
            Err(e) => {
                run.fail();
                match &e {
                    DiscoveryError::Superseded { .. } => {
                        tracing::info!(generation, "search superseded by a newer run");
                    }
                    _ => tracing::warn!(generation, error = %e, "search failed"),
                }
                Err(e)
            }
        }
    }

    async fn begin_run(&self) -> (u64, CancellationToken) {
        let mut session = self.session.lock().await;
        session.cancel.cancel();
        session.generation += 1;
        session.cancel = CancellationToken::new();
        (session.generation, session.cancel.clone())
    }

    async fn execute(
        &self,
        criteria: &SearchCriteria,
        run: &mut SearchRun,
        cancel: &CancellationToken,
    ) -> Result<SearchResults, DiscoveryError> {
        run.advance(SearchPhase::LocatingUser);
        let resolved = self.location.resolve_location().await?;
        ensure_current(run, cancel)?;

        run.advance(SearchPhase::Searching);
        let request = NearbyRequest {
            coordinate: resolved.coordinate,
            radius_meters: criteria.radius_meters,
            category: criteria.category.clone(),
            open_now_only: criteria.open_now_only,
        };
        let raw = self.search.nearby_search(&request).await?;
        let found = raw.len();
        let normalized = normalize_all(raw, resolved.coordinate);
        let ranked = filter_and_sort(&normalized, criteria.min_rating, criteria.sort_key);
        tracing::info!(
            generation = run.generation(),
            category = %criteria.category,
            found,
            kept = ranked.len(),
            "search complete"
        );
        ensure_current(run, cancel)?;

        run.advance(SearchPhase::Enriching);
        let Some(places) = self.enricher.enrich_until(ranked, cancel).await else {
            return Err(superseded(run));
        };

        let mut session = self.session.lock().await;
        if session.generation != run.generation() {
            return Err(superseded(run));
        }
        session.origin = Some(resolved.coordinate);
        session.latest.clone_from(&places);
        drop(session);

        run.advance(SearchPhase::Ready);
        Ok(SearchResults {
            places,
            origin: resolved.coordinate,
            location_from_cache: resolved.from_cache,
            generation: run.generation(),
            phases: run.history().to_vec(),
        })
    }

    /// Results published by the newest completed run, empty before any.
    pub async fn latest_results(&self) -> Vec<DetailedPlace> {
        self.session.lock().await.latest.clone()
    }

    /// # Errors
    ///
    /// Returns [`DiscoveryError::Persistence`] if the saved set cannot be
    /// loaded or written.
    pub async fn toggle_save(&self, place_id: &str) -> Result<bool, DiscoveryError> {
        Ok(self.saved.toggle(place_id).await?)
    }

    /// # Errors
    ///
    /// Returns [`DiscoveryError::Persistence`] if the saved set cannot be loaded.
    pub async fn is_saved(&self, place_id: &str) -> Result<bool, DiscoveryError> {
        Ok(self.saved.contains(place_id).await?)
    }

    /// # Errors
    ///
    /// Returns [`DiscoveryError::Persistence`] if the empty set cannot be written.
    pub async fn clear_saved(&self) -> Result<(), DiscoveryError> {
        Ok(self.saved.clear().await?)
    }

    /// Saved places in ID order.
    ///
    /// Places present in the latest results are reused as-is; the rest are
    /// rebuilt from the detail provider, falling back to a placeholder that
    /// carries only the ID.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Persistence`] if the saved set cannot be loaded.
    pub async fn list_saved(&self) -> Result<Vec<DetailedPlace>, DiscoveryError> {
        let ids = self.saved.all().await?;
        let (latest, origin) = {
            let session = self.session.lock().await;
            (session.latest.clone(), session.origin)
        };

        let mut known: HashMap<String, DetailedPlace> = latest
            .into_iter()
            .filter(|p| ids.contains(p.id()))
            .map(|p| (p.id().to_owned(), p))
            .collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !known.contains_key(*id))
            .cloned()
            .collect();
        tracing::debug!(
            saved = ids.len(),
            rehydrating = missing.len(),
            "listing saved places"
        );

        for place in self.enricher.rehydrate(missing, origin).await {
            known.insert(place.id().to_owned(), place);
        }

        Ok(ids
            .iter()
            .map(|id| {
                known
                    .remove(id)
                    .unwrap_or_else(|| DetailedPlace::placeholder(id))
            })
            .collect())
    }
}

fn ensure_current(run: &SearchRun, cancel: &CancellationToken) -> Result<(), DiscoveryError> {
    if cancel.is_cancelled() {
        return Err(superseded(run));
    }
    Ok(())
}

fn superseded(run: &SearchRun) -> DiscoveryError {
    DiscoveryError::Superseded {
        generation: run.generation(),
        phase: run.phase(),
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
