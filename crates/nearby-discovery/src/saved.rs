//! Persistent set of saved place IDs.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::KvStore;

pub const SAVED_PLACES_KEY: &str = "saved_places";

/// Saved place IDs, loaded lazily from the store on first use.
///
/// Stored as a JSON array of strings. Every mutation is a read-modify-write
/// performed under one lock, so concurrent toggles never lose an update.
/// The in-memory copy only changes after the store accepts the write.
pub struct SavedSet {
    store: Arc<dyn KvStore>,
    ids: Mutex<Option<BTreeSet<String>>>,
}

impl SavedSet {
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            ids: Mutex::new(None),
        }
    }

    /// Flips membership of `place_id` and returns the new membership.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the set cannot be loaded or persisted; the
    /// membership is unchanged in that case.
    pub async fn toggle(&self, place_id: &str) -> Result<bool, StoreError> {
        let mut guard = self.ids.lock().await;
        let current = self.loaded(&mut guard).await?;

        let mut next = current.clone();
        let saved = if next.remove(place_id) {
            false
        } else {
            next.insert(place_id.to_owned());
            true
        };

        self.persist(&next).await?;
        *guard = Some(next);
        tracing::info!(place_id, saved, "toggled saved place");
        Ok(saved)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the set cannot be loaded.
    pub async fn contains(&self, place_id: &str) -> Result<bool, StoreError> {
        let mut guard = self.ids.lock().await;
        Ok(self.loaded(&mut guard).await?.contains(place_id))
    }

    /// All saved IDs in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the set cannot be loaded.
    pub async fn all(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut guard = self.ids.lock().await;
        Ok(self.loaded(&mut guard).await?.clone())
    }

    /// Removes every saved ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the empty set cannot be persisted.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.ids.lock().await;
        let empty = BTreeSet::new();
        self.persist(&empty).await?;
        *guard = Some(empty);
        Ok(())
    }

    async fn loaded<'a>(
        &self,
        slot: &'a mut Option<BTreeSet<String>>,
    ) -> Result<&'a BTreeSet<String>, StoreError> {
        if slot.is_none() {
            *slot = Some(self.load().await?);
        }
        Ok(slot.get_or_insert_with(BTreeSet::new))
    }

    async fn load(&self) -> Result<BTreeSet<String>, StoreError> {
        let Some(bytes) = self.store.get(SAVED_PLACES_KEY).await? else {
            return Ok(BTreeSet::new());
        };
        let ids: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                key: SAVED_PLACES_KEY.to_owned(),
                source,
            })?;
        tracing::debug!(count = ids.len(), "loaded saved places");
        Ok(ids.into_iter().collect())
    }

    async fn persist(&self, ids: &BTreeSet<String>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(ids).map_err(|source| StoreError::Encode {
            key: SAVED_PLACES_KEY.to_owned(),
            source,
        })?;
        self.store.set(SAVED_PLACES_KEY, &bytes).await
    }
}
